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

//! Rendering contracts.
//!
//! This module holds everything the frame loop needs to talk to rendering code
//! without knowing how it works: configuration types owned by the configuration
//! panel, the two interchangeable volume backends, the raster target the
//! compositor drives, and the fixed-function state it toggles between draws.

pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod traits;

pub use self::config::{
    BackendKind, GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig,
};
pub use self::error::RenderError;
pub use self::frame::FrameImage;
pub use self::pipeline::{
    BlendComponentDescriptor, BlendFactor, BlendOperation, BlendStateDescriptor, CompareFunction,
};
pub use self::traits::{CpuVolumeRenderer, GpuVolumeRenderer, RasterTarget};
