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

//! Traits implemented by the two volume backends and by the raster target.

use crate::camera::Camera;
use crate::math::{Aabb, Extent2D, LinearRgba, Mat4, Origin2D};

use super::config::{GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig};
use super::error::RenderError;
use super::frame::FrameImage;
use super::pipeline::{BlendStateDescriptor, CompareFunction};

/// The software ray-marching backend.
///
/// Rendering is blocking and produces a framebuffer at the resolution of the
/// last configuration it received.
pub trait CpuVolumeRenderer {
    /// Renders the volume from the camera's point of view into the internal framebuffer.
    fn render(&mut self, camera: &dyn Camera) -> Result<(), RenderError>;

    /// The most recently rendered framebuffer.
    fn frame_buffer(&self) -> &FrameImage;

    /// Replaces the render configuration.
    fn set_config(&mut self, config: RenderConfig);

    /// Updates the voxel interpolation mode.
    fn set_interpolation_mode(&mut self, mode: InterpolationMode);
}

/// The GPU mesh and brick-streaming backend.
///
/// Each update method is one atomic unit of work. A returned error means the
/// work did not happen and must be retried.
pub trait GpuVolumeRenderer {
    /// Rasterizes the scene into the target using the current GPU resources.
    fn render(
        &mut self,
        camera: &dyn Camera,
        target: &mut dyn RasterTarget,
    ) -> Result<(), RenderError>;

    /// Sets the size of the GPU render target.
    fn set_render_size(&mut self, size: Extent2D);

    /// Replaces the mesh extraction configuration.
    fn set_mesh_config(&mut self, config: GpuMeshConfig);

    /// Replaces the render configuration.
    fn set_render_config(&mut self, config: RenderConfig);

    /// Replaces the brick streaming configuration.
    fn set_volume_config(&mut self, config: GpuVolumeConfig);

    /// Updates the voxel interpolation mode.
    fn set_interpolation_mode(&mut self, mode: InterpolationMode);

    /// Rebuilds the GPU mesh. `use_isosurface_mode` selects iso-value extraction,
    /// otherwise the mesh follows the opacity table.
    fn update_gpu_mesh(&mut self, use_isosurface_mode: bool) -> Result<(), RenderError>;

    /// Re-uploads the volume bricks.
    fn update_volume_bricks(&mut self) -> Result<(), RenderError>;

    /// Re-partitions the volume into bricks of the configured size.
    fn set_volume_bricks_size(&mut self) -> Result<(), RenderError>;

    /// Applies the last interpolation mode to GPU-side samplers.
    fn update_interpolation(&mut self) -> Result<(), RenderError>;
}

/// A raster surface with a colour buffer, a depth buffer and fixed-function state.
///
/// Depth values lie in `[0, 1]` with `1` the far plane. The default state is:
/// depth test `LessEqual`, depth writes on, colour writes on, blending off.
pub trait RasterTarget {
    /// Full size of the surface in pixels.
    fn size(&self) -> Extent2D;

    /// Reallocates the surface. Contents are undefined until the next clear.
    fn resize(&mut self, size: Extent2D);

    /// Restricts subsequent clears and draws to a rectangle, `origin` being its
    /// lower-left corner.
    fn set_viewport(&mut self, origin: Origin2D, size: Extent2D);

    /// Clears colour to `color` and depth to the far plane inside the viewport.
    fn clear(&mut self, color: LinearRgba);

    /// Sets the depth test. `None` disables it.
    fn set_depth_test(&mut self, compare: Option<CompareFunction>);

    /// Enables or disables depth writes.
    fn set_depth_write(&mut self, enabled: bool);

    /// Enables or disables colour writes.
    fn set_color_write(&mut self, enabled: bool);

    /// Sets the blend state. `None` disables blending.
    fn set_blend(&mut self, blend: Option<BlendStateDescriptor>);

    /// Uploads an image to the full-screen texture.
    fn upload_image(&mut self, image: &FrameImage) -> Result<(), RenderError>;

    /// Draws the last uploaded image as a viewport-filling quad at depth 0.
    fn draw_image(&mut self) -> Result<(), RenderError>;

    /// Draws the faces of a box.
    fn draw_solid_box(&mut self, view_projection: &Mat4, aabb: &Aabb, color: LinearRgba);

    /// Draws the twelve edges of a box.
    fn draw_wireframe_box(&mut self, view_projection: &Mat4, aabb: &Aabb, color: LinearRgba);

    /// Restores the default fixed-function state.
    fn reset_state(&mut self) {
        self.set_blend(None);
        self.set_color_write(true);
        self.set_depth_write(true);
        self.set_depth_test(Some(CompareFunction::LessEqual));
    }
}
