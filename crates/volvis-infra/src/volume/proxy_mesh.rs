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


//! A stand-in for the GPU mesh and brick-streaming backend.
//!
//! It keeps the bookkeeping a real device backend would (brick partitioning,
//! which iso-value the mesh was extracted at) and rasterizes the volume as a
//! shaded box through the shared [`RasterTarget`].

use volvis_core::camera::Camera;
use volvis_core::math::{Aabb, Extent2D, Extent3D, LinearRgba, Vec3};
use volvis_core::renderer::{
    GpuMeshConfig, GpuVolumeConfig, GpuVolumeRenderer, InterpolationMode, RasterTarget,
    RenderConfig, RenderError,
};

/// How many times each unit of work ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpuWorkStats {
    /// Iso-surface mesh rebuilds.
    pub mesh_rebuilds: u64,
    /// Opacity-driven mesh rebuilds.
    pub opacity_rebuilds: u64,
    /// Brick uploads.
    pub brick_uploads: u64,
    /// Brick re-partitions.
    pub brick_resizes: u64,
    /// Sampler updates.
    pub interpolation_updates: u64,
    /// Frames rendered.
    pub renders: u64,
}

/// The GPU stand-in backend.
#[derive(Debug, Clone)]
pub struct ProxyMeshRenderer {
    dims: Extent3D,
    render_size: Extent2D,
    mesh_config: GpuMeshConfig,
    render_config: RenderConfig,
    volume_config: GpuVolumeConfig,
    interpolation: InterpolationMode,
    mesh_iso_value: Option<f32>,
    brick_count: u32,
    stats: GpuWorkStats,
}

impl ProxyMeshRenderer {
    /// Creates a backend for a volume of `dims` voxels. Nothing is built until
    /// the first update calls.
    pub fn new(dims: Extent3D) -> Self {
        Self {
            dims,
            render_size: Extent2D::new(0, 0),
            mesh_config: GpuMeshConfig::default(),
            render_config: RenderConfig::default(),
            volume_config: GpuVolumeConfig::default(),
            interpolation: InterpolationMode::default(),
            mesh_iso_value: None,
            brick_count: 0,
            stats: GpuWorkStats::default(),
        }
    }

    /// Work counters.
    pub fn stats(&self) -> GpuWorkStats {
        self.stats
    }

    /// Number of bricks the volume is currently split into.
    pub fn brick_count(&self) -> u32 {
        self.brick_count
    }

    /// The render target size last pushed by the frame loop.
    pub fn render_size(&self) -> Extent2D {
        self.render_size
    }
}

impl GpuVolumeRenderer for ProxyMeshRenderer {
    fn render(
        &mut self,
        camera: &dyn Camera,
        target: &mut dyn RasterTarget,
    ) -> Result<(), RenderError> {
        let Some(iso) = self.mesh_iso_value else {
            return Err(RenderError::ResourceUnavailable(
                "GPU mesh has not been built".to_string(),
            ));
        };
        let shade = (iso / 255.0).clamp(0.0, 1.0);
        let color = LinearRgba::rgb(shade, 0.6 * shade + 0.2, 1.0 - 0.5 * shade);
        let bounds = Aabb::from_offset_size(Vec3::ZERO, self.dims.as_vec3());
        target.draw_solid_box(&camera.view_projection(), &bounds, color);
        self.stats.renders += 1;
        Ok(())
    }

    fn set_render_size(&mut self, size: Extent2D) {
        self.render_size = size;
    }

    fn set_mesh_config(&mut self, config: GpuMeshConfig) {
        self.mesh_config = config;
    }

    fn set_render_config(&mut self, config: RenderConfig) {
        self.render_config = config;
    }

    fn set_volume_config(&mut self, config: GpuVolumeConfig) {
        self.volume_config = config;
    }

    fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }

    fn update_gpu_mesh(&mut self, use_isosurface_mode: bool) -> Result<(), RenderError> {
        if self.mesh_config.cell_size == 0 {
            return Err(RenderError::BackendFailure(
                "mesh cell size must be positive".to_string(),
            ));
        }
        if use_isosurface_mode {
            self.mesh_iso_value = Some(self.mesh_config.iso_value);
            self.stats.mesh_rebuilds += 1;
        } else {
            self.mesh_iso_value = Some(self.render_config.iso_value);
            self.stats.opacity_rebuilds += 1;
        }
        log::debug!(
            "Rebuilt GPU mesh (isosurface: {use_isosurface_mode}, cell size {})",
            self.mesh_config.cell_size
        );
        Ok(())
    }

    fn update_volume_bricks(&mut self) -> Result<(), RenderError> {
        if self.brick_count == 0 {
            return Err(RenderError::ResourceUnavailable(
                "volume has not been partitioned into bricks".to_string(),
            ));
        }
        self.stats.brick_uploads += 1;
        log::debug!("Uploaded {} volume bricks", self.brick_count);
        Ok(())
    }

    fn set_volume_bricks_size(&mut self) -> Result<(), RenderError> {
        let brick = self.volume_config.brick_size;
        if brick == 0 {
            return Err(RenderError::BackendFailure(
                "brick size must be positive".to_string(),
            ));
        }
        let per_axis = |n: u32| n.div_ceil(brick).max(1);
        self.brick_count =
            per_axis(self.dims.width) * per_axis(self.dims.height) * per_axis(self.dims.depth);
        self.stats.brick_resizes += 1;
        log::debug!(
            "Partitioned volume into {} bricks of {} voxels (padding {})",
            self.brick_count,
            brick,
            self.volume_config.brick_padding
        );
        Ok(())
    }

    fn update_interpolation(&mut self) -> Result<(), RenderError> {
        self.stats.interpolation_updates += 1;
        log::debug!("Applied {:?} interpolation to GPU samplers", self.interpolation);
        Ok(())
    }
}
