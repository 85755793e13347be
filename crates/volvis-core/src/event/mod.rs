// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Event-driven communication between collaborators and the frame loop.
//!
//! Collaborators (window, configuration panel) never mutate viewer state
//! directly. They publish a [`ViewerEvent`] on an [`EventBus`] and the frame loop
//! drains the bus once per frame, before making any decision.

mod bus;

pub use self::bus::EventBus;

use crate::math::{Extent2D, Vec2};
use crate::platform::{Key, MouseButton};
use crate::renderer::{BackendKind, GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig};

/// Everything that can happen to the viewer between two frames.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The window was resized (window units).
    WindowResized(Extent2D),
    /// A mouse button changed state. `position` is the cursor in window units,
    /// origin at the top-left.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// `true` on press, `false` on release.
        pressed: bool,
        /// Cursor position when the button changed state.
        position: Vec2,
    },
    /// The cursor moved to a new position in window units.
    CursorMoved(Vec2),
    /// A key was pressed.
    KeyPressed(Key),
    /// The user asked to close the window.
    CloseRequested,
    /// The panel produced a new render configuration.
    RenderConfigChanged(RenderConfig),
    /// The user picked another interpolation mode.
    InterpolationModeChanged(InterpolationMode),
    /// The user edited the GPU mesh configuration.
    GpuMeshConfigChanged(GpuMeshConfig),
    /// The user edited the GPU brick configuration.
    GpuVolumeConfigChanged(GpuVolumeConfig),
    /// The user switched the active backend.
    BackendChanged(BackendKind),
}
