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

//! Configuration types owned by the configuration panel and consumed by the backends.

use serde::{Deserialize, Serialize};

use crate::math::Extent2D;

/// Which rendering backend is active. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackendKind {
    /// Software ray-marching into a framebuffer that is composited as an image.
    #[default]
    Cpu,
    /// GPU mesh and brick rasterization.
    Gpu,
}

/// Voxel sampling mode used by both backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Nearest voxel.
    NearestNeighbour,
    /// Trilinear interpolation.
    #[default]
    Linear,
    /// Tricubic interpolation.
    Cubic,
}

/// The authoritative description of what to render and at which resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Target render resolution in pixels.
    pub render_resolution: Extent2D,
    /// Set when the transfer function changed with this configuration.
    pub update_tf: bool,
    /// Ray-marching step size in voxels.
    pub step_size: f32,
    /// Iso value used by isosurface rendering.
    pub iso_value: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_resolution: Extent2D::square(760),
            update_tf: false,
            step_size: 1.0,
            iso_value: 95.0,
        }
    }
}

/// Mesh extraction settings of the GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpuMeshConfig {
    /// Iso value of the extracted surface.
    pub iso_value: f32,
    /// Edge length of a mesh extraction cell, in voxels.
    pub cell_size: u32,
}

impl Default for GpuMeshConfig {
    fn default() -> Self {
        Self {
            iso_value: 95.0,
            cell_size: 4,
        }
    }
}

/// Brick streaming settings of the GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuVolumeConfig {
    /// Edge length of a brick, in voxels.
    pub brick_size: u32,
    /// Voxels of padding shared between neighbouring bricks.
    pub brick_padding: u32,
}

impl Default for GpuVolumeConfig {
    fn default() -> Self {
        Self {
            brick_size: 32,
            brick_padding: 1,
        }
    }
}
