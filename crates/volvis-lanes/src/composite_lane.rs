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

//! Merges a backend's output with the volume's bounding wireframe.
//!
//! The CPU backend produces a flat image with no depth. To have the wireframe
//! box correctly occlude and be occluded by it, the lane first writes the
//! volume's solid proxy box into the depth buffer only. Wireframe edges behind
//! the proxy's front faces are drawn before the image, edges in front after it:
//!
//! 1. viewport + clear (colour transparent, depth far)
//! 2. proxy box, depth only, `LessEqual`
//! 3. far wireframe, depth `Greater`, no depth writes, alpha blending
//! 4. the image, depth `Always`, premultiplied blending
//! 5. near wireframe, depth `LessEqual`, alpha blending
//! 6. fixed-function state restored
//!
//! The GPU backend rasterizes with real depth and only needs the frame
//! bracketed by [`CompositeLane::begin_gpu_frame`] and
//! [`CompositeLane::end_gpu_frame`].
//!
//! # Performance Characteristics
//! - **Draws**: one proxy box, two wireframe boxes and one quad per frame
//! - **State changes**: constant, independent of the image resolution

use volvis_core::math::{Aabb, LinearRgba, Mat4, Vec3};
use volvis_core::renderer::{BlendStateDescriptor, CompareFunction, RasterTarget, RenderError};

use crate::viewport::ViewportLayout;

/// Fraction of the volume's size added around it by the wireframe box.
pub const DEFAULT_WIREFRAME_MARGIN: f32 = 0.05;

/// Colours and margin used by the lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorSettings {
    /// Total fraction added to each dimension of the wireframe box.
    pub wireframe_margin: f32,
    /// Colour of the wireframe edges.
    pub wireframe_color: LinearRgba,
    /// Colour the viewport is cleared to.
    pub clear_color: LinearRgba,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            wireframe_margin: DEFAULT_WIREFRAME_MARGIN,
            wireframe_color: LinearRgba::WHITE,
            clear_color: LinearRgba::TRANSPARENT,
        }
    }
}

/// The two boxes derived from a volume's dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeBox {
    /// The volume itself, from the origin to its dimensions.
    pub proxy: Aabb,
    /// The proxy grown by the margin, centred on it.
    pub wireframe: Aabb,
}

impl WireframeBox {
    /// Builds both boxes for a volume of `dims`.
    pub fn new(dims: Vec3, margin: f32) -> Self {
        let proxy = Aabb::from_offset_size(Vec3::ZERO, dims);
        Self {
            proxy,
            wireframe: proxy.inflated(margin),
        }
    }
}

/// The compositing lane.
#[derive(Debug, Clone, Default)]
pub struct CompositeLane {
    settings: CompositorSettings,
}

impl CompositeLane {
    /// Creates a lane with the given settings.
    pub fn new(settings: CompositorSettings) -> Self {
        Self { settings }
    }

    /// A human-readable identifier for logging.
    pub fn strategy_name(&self) -> &'static str {
        "ProxyDepthComposite"
    }

    /// The lane's settings.
    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Positions the viewport and clears it. Used alone when no volume is loaded.
    pub fn clear_viewport(&self, target: &mut dyn RasterTarget, layout: &ViewportLayout) {
        target.set_viewport(layout.viewport_origin(), layout.base_resolution());
        target.clear(self.settings.clear_color);
    }

    /// Composites the last uploaded CPU image with the volume's wireframe.
    ///
    /// State is restored to the defaults even when drawing the image fails.
    pub fn composite_cpu_frame(
        &self,
        target: &mut dyn RasterTarget,
        layout: &ViewportLayout,
        view_projection: &Mat4,
        volume_dims: Vec3,
    ) -> Result<(), RenderError> {
        let boxes = WireframeBox::new(volume_dims, self.settings.wireframe_margin);
        let color = self.settings.wireframe_color;

        self.clear_viewport(target, layout);

        // Proxy: depth only.
        target.set_depth_write(true);
        target.set_depth_test(Some(CompareFunction::LessEqual));
        target.set_color_write(false);
        target.draw_solid_box(view_projection, &boxes.proxy, LinearRgba::WHITE);

        // Edges hidden by the proxy's front faces.
        target.set_color_write(true);
        target.set_blend(Some(BlendStateDescriptor::ALPHA_BLENDING));
        target.set_depth_write(false);
        target.set_depth_test(Some(CompareFunction::Greater));
        target.draw_wireframe_box(view_projection, &boxes.wireframe, color);

        target.set_depth_test(Some(CompareFunction::Always));
        target.set_blend(Some(BlendStateDescriptor::PREMULTIPLIED_ALPHA_BLENDING));
        let image = target.draw_image();

        // Edges in front of the proxy.
        if image.is_ok() {
            target.set_depth_test(Some(CompareFunction::LessEqual));
            target.set_blend(Some(BlendStateDescriptor::ALPHA_BLENDING));
            target.draw_wireframe_box(view_projection, &boxes.wireframe, color);
        }

        target.reset_state();
        image
    }

    /// Prepares the target for the GPU backend's render pass.
    pub fn begin_gpu_frame(&self, target: &mut dyn RasterTarget, layout: &ViewportLayout) {
        self.clear_viewport(target, layout);
        target.set_depth_test(Some(CompareFunction::LessEqual));
    }

    /// Restores default state after the GPU backend rendered.
    pub fn end_gpu_frame(&self, target: &mut dyn RasterTarget) {
        target.reset_state();
    }
}
