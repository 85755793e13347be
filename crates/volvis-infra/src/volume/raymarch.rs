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


//! A software ray-marching backend.
//!
//! One ray per pixel is cast through the camera, clipped against the volume's
//! box and marched front to back with a fixed step. Samples go through a
//! simple ramp transfer function centred on the iso-value and are composited
//! with premultiplied alpha. Marching stops once the ray is nearly opaque.
//!
//! # Performance Characteristics
//! - **Cost**: `width * height * steps` samples per frame; halving the render
//!   resolution roughly quarters the cost

use std::sync::Arc;

use volvis_core::camera::Camera;
use volvis_core::math::{Aabb, Extent2D, LinearRgba, Ray, Vec2, Vec3};
use volvis_core::renderer::{
    CpuVolumeRenderer, FrameImage, InterpolationMode, RenderConfig, RenderError,
};

use super::SyntheticVolume;

/// Accumulated opacity at which a ray stops marching.
const EARLY_TERMINATION_ALPHA: f32 = 0.99;

/// Half-width of the transfer function ramp around the iso-value.
const RAMP_HALF_WIDTH: f32 = 24.0;

/// Opacity contributed by a fully dense sample over a unit step.
const DENSITY_SCALE: f32 = 0.15;

/// The CPU ray-marching backend.
#[derive(Debug)]
pub struct RayMarchRenderer {
    volume: Arc<SyntheticVolume>,
    bounds: Aabb,
    config: RenderConfig,
    interpolation: InterpolationMode,
    frame: FrameImage,
    renders: u64,
}

impl RayMarchRenderer {
    /// Creates a backend for `volume` with the default configuration.
    pub fn new(volume: Arc<SyntheticVolume>) -> Self {
        let bounds = Aabb::from_offset_size(Vec3::ZERO, volume.dims().as_vec3());
        Self {
            volume,
            bounds,
            config: RenderConfig::default(),
            interpolation: InterpolationMode::default(),
            frame: FrameImage::new(Extent2D::new(0, 0), LinearRgba::TRANSPARENT),
            renders: 0,
        }
    }

    /// The configuration the next render will use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of completed renders.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    fn sample(&self, p: Vec3) -> f32 {
        match self.interpolation {
            InterpolationMode::NearestNeighbour => self.volume.sample_nearest(p),
            // Cubic falls back to trilinear.
            InterpolationMode::Linear | InterpolationMode::Cubic => self.volume.sample_linear(p),
        }
    }

    fn transfer(&self, density: f32, step: f32) -> LinearRgba {
        let lo = self.config.iso_value - RAMP_HALF_WIDTH;
        let t = ((density - lo) / (2.0 * RAMP_HALF_WIDTH)).clamp(0.0, 1.0);
        let ramp = t * t * (3.0 - 2.0 * t);
        let alpha = (ramp * DENSITY_SCALE * step).min(1.0);
        let shade = density / 255.0;
        LinearRgba::new(shade, 0.6 * shade + 0.2, 1.0 - 0.5 * shade, alpha).premultiplied()
    }

    fn march(&self, ray: &Ray) -> LinearRgba {
        let Some((t0, t1)) = self.bounds.intersect_ray(ray) else {
            return LinearRgba::TRANSPARENT;
        };
        let step = if self.config.step_size > 0.0 {
            self.config.step_size
        } else {
            1.0
        };
        let mut acc = LinearRgba::TRANSPARENT;
        let mut t = t0 + step * 0.5;
        while t < t1 && acc.a < EARLY_TERMINATION_ALPHA {
            let src = self.transfer(self.sample(ray.at(t)), step);
            acc = acc + src * (1.0 - acc.a);
            t += step;
        }
        acc.saturate()
    }
}

impl CpuVolumeRenderer for RayMarchRenderer {
    fn render(&mut self, camera: &dyn Camera) -> Result<(), RenderError> {
        let size = self.config.render_resolution;
        if size.is_empty() {
            return Err(RenderError::InvalidResolution {
                width: size.width,
                height: size.height,
            });
        }
        if self.frame.size() != size {
            self.frame = FrameImage::new(size, LinearRgba::TRANSPARENT);
        }
        let (w, h) = (size.width as f32, size.height as f32);
        for y in 0..size.height {
            for x in 0..size.width {
                // Row 0 is the top of the image.
                let ndc = Vec2::new(
                    (x as f32 + 0.5) / w * 2.0 - 1.0,
                    1.0 - (y as f32 + 0.5) / h * 2.0,
                );
                let color = self.march(&camera.generate_ray(ndc));
                self.frame.set(x, y, color);
            }
        }
        self.renders += 1;
        log::trace!("Ray-marched {}x{} frame", size.width, size.height);
        Ok(())
    }

    fn frame_buffer(&self) -> &FrameImage {
        &self.frame
    }

    fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use volvis_core::math::Extent3D;

    fn renderer(resolution: u32) -> (RayMarchRenderer, OrbitCamera) {
        let volume = Arc::new(SyntheticVolume::sphere(Extent3D::new(16, 16, 16)));
        let mut renderer = RayMarchRenderer::new(volume);
        renderer.set_config(RenderConfig {
            render_resolution: Extent2D::square(resolution),
            iso_value: 60.0,
            ..RenderConfig::default()
        });
        let camera = OrbitCamera::new(Vec3::new(8.0, 8.0, 8.0), 40.0);
        (renderer, camera)
    }

    #[test]
    fn test_render_uses_configured_resolution() {
        let (mut renderer, camera) = renderer(12);
        renderer.render(&camera).unwrap();
        assert_eq!(renderer.frame_buffer().size(), Extent2D::square(12));
        assert_eq!(renderer.render_count(), 1);
    }

    #[test]
    fn test_center_is_opaque_and_corner_is_empty() {
        let (mut renderer, camera) = renderer(16);
        renderer.render(&camera).unwrap();
        let frame = renderer.frame_buffer();
        assert!(frame.get(8, 8).unwrap().a > 0.5);
        assert_eq!(frame.get(0, 0).unwrap(), LinearRgba::TRANSPARENT);
    }

    #[test]
    fn test_empty_resolution_is_rejected() {
        let (mut renderer, camera) = renderer(0);
        assert!(matches!(
            renderer.render(&camera),
            Err(RenderError::InvalidResolution { .. })
        ));
    }
}
