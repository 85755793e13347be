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

//! An orbiting perspective camera.

use volvis_core::camera::Camera;
use volvis_core::math::{Mat4, Ray, Vec2, Vec3, FRAC_PI_2, FRAC_PI_4, PI};

/// Radians of yaw/pitch per unit of NDC drag.
const DRAG_SENSITIVITY: f32 = PI;

/// Pitch is kept just short of the poles so `look_at_rh` stays defined.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// A camera orbiting a look-at point at a fixed distance.
///
/// Yaw turns around the world Y axis; at zero yaw and pitch the eye sits on
/// the `+Z` side of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    up: Vec3,
    fov_y: f32,
    aspect_ratio: f32,
    world_scale: f32,
    rotation_enabled: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            fov_y: FRAC_PI_4,
            aspect_ratio: 1.0,
            world_scale: 1.0,
            rotation_enabled: false,
        }
    }
}

impl OrbitCamera {
    /// Creates a camera looking at `target` from `distance` along `+Z`.
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance: distance.max(f32::EPSILON),
            ..Default::default()
        }
    }

    /// Sets the vertical field of view in radians.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Sets the camera's up direction.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Places the eye at the given yaw and pitch around the target.
    pub fn with_orbit(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self
    }

    /// The eye position.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + offset * self.distance
    }

    /// Whether drags rotate the camera.
    pub fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    fn clip_planes(&self) -> (f32, f32) {
        let near = (self.distance * 0.01).max(1e-4);
        let far = (self.distance + self.world_scale) * 4.0;
        (near, far.max(near * 2.0))
    }
}

impl Camera for OrbitCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.up).unwrap_or_else(|| {
            log::warn!("Degenerate camera orientation, falling back to identity view");
            Mat4::IDENTITY
        })
    }

    fn projection_matrix(&self) -> Mat4 {
        let (near, far) = self.clip_planes();
        Mat4::perspective_rh_zo(self.fov_y, self.aspect_ratio, near, far)
    }

    fn generate_ray(&self, ndc: Vec2) -> Ray {
        let eye = self.eye();
        let unproject = self.view_projection().inverse().and_then(|inverse| {
            let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0))?;
            let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0))?;
            Some(far - near)
        });
        match unproject {
            Some(direction) => Ray::new(eye, direction),
            None => Ray::new(eye, self.target - eye),
        }
    }

    fn enable_rotation(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(f32::EPSILON);
    }

    fn set_world_scale(&mut self, scale: f32) {
        self.world_scale = scale.max(f32::EPSILON);
    }

    fn set_look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    fn drag(&mut self, delta_ndc: Vec2) {
        if !self.rotation_enabled {
            return;
        }
        self.yaw -= delta_ndc.x * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + delta_ndc.y * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }
}
