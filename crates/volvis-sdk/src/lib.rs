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


//! # Volvis SDK
//!
//! The public-facing viewer. [`Viewer`] wires the window, the configuration
//! panel, the camera, the raster target and the two volume backends into one
//! adaptive frame loop.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod viewer;
pub mod volume;

pub use config::ViewerConfig;
pub use error::{ConfigError, ViewerError};
pub use viewer::Viewer;
pub use volume::{LoadedVolume, VolumeState};

/// Re-exports of the types needed to drive a [`Viewer`].
pub mod prelude {
    pub use volvis_core::camera::Camera;
    pub use volvis_core::event::ViewerEvent;
    pub use volvis_core::math::{Extent2D, Extent3D, Origin2D, Vec2, Vec3};
    pub use volvis_core::panel::{ConfigPanel, FrameTimings, SelectionRect};
    pub use volvis_core::platform::{Key, MouseButton, ViewerWindow};
    pub use volvis_core::renderer::{
        BackendKind, CpuVolumeRenderer, GpuMeshConfig, GpuVolumeConfig, GpuVolumeRenderer,
        InterpolationMode, RasterTarget, RenderConfig, RenderError,
    };

    pub use crate::{LoadedVolume, Viewer, ViewerConfig, ViewerError, VolumeState};
}
