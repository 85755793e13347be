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

//! The configuration panel contract.

use std::time::Duration;

use crate::event::ViewerEvent;
use crate::math::{Extent2D, Extent3D, Origin2D};
use crate::renderer::{
    BackendKind, GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig,
};

/// A rectangle on the volume's front face, in normalized `[0, 1]` face coordinates.
///
/// `(x0, y0)` comes from the drag's press point and `(x1, y1)` from its current point;
/// the corners are not reordered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionRect {
    /// Horizontal coordinate of the press corner.
    pub x0: f32,
    /// Vertical coordinate of the press corner.
    pub y0: f32,
    /// Horizontal coordinate of the current corner.
    pub x1: f32,
    /// Vertical coordinate of the current corner.
    pub y1: f32,
}

impl SelectionRect {
    /// Creates a rectangle from its two corners.
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Timing figures shown by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTimings {
    /// Duration of the last backend render.
    pub last_render: Duration,
    /// Mean frame duration over the last completed window.
    pub average_frame: Duration,
}

/// The immediate-mode configuration panel.
///
/// The panel owns the configuration. The frame loop reads it, pushes the base
/// render resolution and the selection rectangle into it, and receives user
/// edits as events published while the panel draws.
pub trait ConfigPanel {
    /// The current render configuration.
    fn render_config(&self) -> RenderConfig;

    /// The current GPU mesh configuration.
    fn mesh_config(&self) -> GpuMeshConfig;

    /// The current GPU brick configuration.
    fn volume_config(&self) -> GpuVolumeConfig;

    /// The current interpolation mode.
    fn interpolation_mode(&self) -> InterpolationMode;

    /// The backend the user selected.
    fn active_backend(&self) -> BackendKind;

    /// Sets the resolution the render resolution is derived from.
    ///
    /// The panel re-validates its configuration and returns it. The returned
    /// configuration is an echo, not a user edit.
    fn set_base_render_resolution(&mut self, resolution: Extent2D) -> RenderConfig;

    /// Replaces the transfer-function region of interest.
    fn set_selection_rect(&mut self, rect: SelectionRect);

    /// Tells the panel which volume is loaded.
    fn set_loaded_volume(&mut self, dims: Extent3D);

    /// Draws the panel. User edits made while drawing are published to `sink`.
    fn draw(
        &mut self,
        origin: Origin2D,
        size: Extent2D,
        timings: FrameTimings,
        sink: &flume::Sender<ViewerEvent>,
    );
}
