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

//! A CPU implementation of [`RasterTarget`].
//!
//! Colour and depth live in two `f32` buffers stored row by row, row 0 at the
//! top. The viewport origin follows the usual lower-left convention and is
//! converted on the fly. Triangles are filled with edge functions, lines are
//! walked with Bresenham's algorithm, and every fragment goes through the same
//! depth test / blend / write-mask stage.

use volvis_core::math::{Aabb, Extent2D, LinearRgba, Mat4, Origin2D, Vec3};
use volvis_core::renderer::{
    BlendStateDescriptor, CompareFunction, FrameImage, RasterTarget, RenderError,
};

/// Clip-space `w` below which a vertex is treated as behind the camera.
const MIN_CLIP_W: f32 = 1e-6;

/// A vertex after projection: pixel coordinates (top-left origin) and depth.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    z: f32,
}

/// Fixed-function state, reset by [`RasterTarget::reset_state`].
#[derive(Debug, Clone, Copy)]
struct PipelineState {
    depth_test: Option<CompareFunction>,
    depth_write: bool,
    color_write: bool,
    blend: Option<BlendStateDescriptor>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            depth_test: Some(CompareFunction::LessEqual),
            depth_write: true,
            color_write: true,
            blend: None,
        }
    }
}

/// Pixel rectangle in top-left coordinates, half-open on the max side.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PixelRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

/// A software framebuffer with a depth buffer.
#[derive(Debug, Clone)]
pub struct SoftwareRasterTarget {
    size: Extent2D,
    color: Vec<LinearRgba>,
    depth: Vec<f32>,
    viewport_origin: Origin2D,
    viewport_size: Extent2D,
    state: PipelineState,
    image: Option<FrameImage>,
}

impl SoftwareRasterTarget {
    /// Creates a target of `size` pixels, cleared to transparent black and far depth.
    pub fn new(size: Extent2D) -> Self {
        log::debug!("Creating software raster target {}x{}", size.width, size.height);
        Self {
            size,
            color: vec![LinearRgba::TRANSPARENT; size.area()],
            depth: vec![1.0; size.area()],
            viewport_origin: Origin2D::new(0, 0),
            viewport_size: size,
            state: PipelineState::default(),
            image: None,
        }
    }

    /// The colour at `(x, y)`, row 0 at the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<LinearRgba> {
        self.index(x as i64, y as i64).map(|i| self.color[i])
    }

    /// The depth at `(x, y)`, row 0 at the top.
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x as i64, y as i64).map(|i| self.depth[i])
    }

    /// A copy of the colour buffer.
    pub fn snapshot(&self) -> FrameImage {
        FrameImage::from_pixels(self.size, self.color.clone())
            .unwrap_or_else(|| FrameImage::new(self.size, LinearRgba::TRANSPARENT))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width as i64 || y >= self.size.height as i64 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// The viewport in top-left pixel coordinates, clipped to the framebuffer.
    fn viewport_rect(&self) -> PixelRect {
        let height = self.size.height as i64;
        let x0 = self.viewport_origin.x as i64;
        let x1 = x0 + self.viewport_size.width as i64;
        let y1 = height - self.viewport_origin.y as i64;
        let y0 = y1 - self.viewport_size.height as i64;
        PixelRect {
            x0: x0.max(0),
            y0: y0.max(0),
            x1: x1.min(self.size.width as i64),
            y1: y1.min(height),
        }
    }

    /// Projects a world point to pixel coordinates. `None` behind the camera.
    fn project(&self, view_projection: &Mat4, point: Vec3) -> Option<ScreenVertex> {
        let clip = *view_projection * point.extend(1.0);
        if clip.w <= MIN_CLIP_W {
            return None;
        }
        let ndc = clip.perspective_divide()?;
        let height = self.size.height as f32;
        let left = self.viewport_origin.x as f32;
        let bottom = self.viewport_origin.y as f32;
        let w = self.viewport_size.width as f32;
        let h = self.viewport_size.height as f32;
        Some(ScreenVertex {
            x: left + (ndc.x + 1.0) * 0.5 * w,
            y: height - (bottom + (ndc.y + 1.0) * 0.5 * h),
            z: ndc.z,
        })
    }

    /// Runs one fragment through depth test, blending and write masks.
    fn shade(&mut self, x: i64, y: i64, z: f32, src: LinearRgba) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if let Some(compare) = self.state.depth_test {
            if !compare.passes(z, self.depth[i]) {
                return;
            }
            if self.state.depth_write {
                self.depth[i] = z;
            }
        }
        if !self.state.color_write {
            return;
        }
        let dst = self.color[i];
        self.color[i] = match self.state.blend {
            None => src,
            Some(blend) => LinearRgba::new(
                blend.color.apply(src.r, dst.r, src.a),
                blend.color.apply(src.g, dst.g, src.a),
                blend.color.apply(src.b, dst.b, src.a),
                blend.alpha.apply(src.a, dst.a, src.a),
            ),
        };
    }

    fn fill_triangle(
        &mut self,
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
        color: LinearRgba,
    ) {
        let edge = |a: ScreenVertex, b: ScreenVertex, px: f32, py: f32| {
            (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
        };
        let area = edge(v0, v1, v2.x, v2.y);
        if area.abs() < f32::EPSILON {
            return;
        }
        let rect = self.viewport_rect();
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(rect.x0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(rect.x1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(rect.y0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(rect.y1);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let w0 = edge(v1, v2, px, py) / area;
                let w1 = edge(v2, v0, px, py) / area;
                let w2 = edge(v0, v1, px, py) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                self.shade(x, y, z, color);
            }
        }
    }

    fn draw_line(&mut self, a: ScreenVertex, b: ScreenVertex, color: LinearRgba) {
        let rect = self.viewport_rect();
        let (mut x, mut y) = (a.x.floor() as i64, a.y.floor() as i64);
        let (x_end, y_end) = (b.x.floor() as i64, b.y.floor() as i64);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let steps = dx.max(-dy).max(1) as f32;
        let mut err = dx + dy;
        let mut step = 0.0;

        loop {
            if x >= rect.x0 && x < rect.x1 && y >= rect.y0 && y < rect.y1 {
                let t = (step / steps).min(1.0);
                self.shade(x, y, a.z + (b.z - a.z) * t, color);
            }
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1.0;
        }
    }
}

impl RasterTarget for SoftwareRasterTarget {
    fn size(&self) -> Extent2D {
        self.size
    }

    fn resize(&mut self, size: Extent2D) {
        if size == self.size {
            return;
        }
        log::debug!("Resizing software raster target to {}x{}", size.width, size.height);
        *self = Self {
            image: self.image.take(),
            ..Self::new(size)
        };
    }

    fn set_viewport(&mut self, origin: Origin2D, size: Extent2D) {
        self.viewport_origin = origin;
        self.viewport_size = size;
    }

    fn clear(&mut self, color: LinearRgba) {
        let rect = self.viewport_rect();
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if let Some(i) = self.index(x, y) {
                    self.color[i] = color;
                    self.depth[i] = 1.0;
                }
            }
        }
    }

    fn set_depth_test(&mut self, compare: Option<CompareFunction>) {
        self.state.depth_test = compare;
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.state.depth_write = enabled;
    }

    fn set_color_write(&mut self, enabled: bool) {
        self.state.color_write = enabled;
    }

    fn set_blend(&mut self, blend: Option<BlendStateDescriptor>) {
        self.state.blend = blend;
    }

    fn upload_image(&mut self, image: &FrameImage) -> Result<(), RenderError> {
        let size = image.size();
        if size.is_empty() {
            return Err(RenderError::InvalidResolution {
                width: size.width,
                height: size.height,
            });
        }
        self.image = Some(image.clone());
        Ok(())
    }

    fn draw_image(&mut self) -> Result<(), RenderError> {
        let Some(image) = self.image.take() else {
            return Err(RenderError::ResourceUnavailable(
                "no image has been uploaded".to_string(),
            ));
        };
        let rect = self.viewport_rect();
        let height = self.size.height as f32;
        let left = self.viewport_origin.x as f32;
        let top = height - (self.viewport_origin.y as f32 + self.viewport_size.height as f32);
        let w = self.viewport_size.width.max(1) as f32;
        let h = self.viewport_size.height.max(1) as f32;
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                let u = (x as f32 + 0.5 - left) / w;
                let v = (y as f32 + 0.5 - top) / h;
                self.shade(x, y, 0.0, image.sample_nearest(u, v));
            }
        }
        self.image = Some(image);
        Ok(())
    }

    fn draw_solid_box(&mut self, view_projection: &Mat4, aabb: &Aabb, color: LinearRgba) {
        let corners = aabb.corners();
        for [a, b, c] in Aabb::TRIANGLES {
            let projected = (
                self.project(view_projection, corners[a]),
                self.project(view_projection, corners[b]),
                self.project(view_projection, corners[c]),
            );
            // No culling: both windings are filled.
            if let (Some(v0), Some(v1), Some(v2)) = projected {
                self.fill_triangle(v0, v1, v2, color);
            }
        }
    }

    fn draw_wireframe_box(&mut self, view_projection: &Mat4, aabb: &Aabb, color: LinearRgba) {
        let corners = aabb.corners();
        for (a, b) in Aabb::EDGES {
            let ends = (
                self.project(view_projection, corners[a]),
                self.project(view_projection, corners[b]),
            );
            if let (Some(v0), Some(v1)) = ends {
                self.draw_line(v0, v1, color);
            }
        }
    }
}
