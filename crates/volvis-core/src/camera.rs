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

//! Defines the narrow camera contract the frame loop depends on.

use crate::math::{FaceRect, Mat4, Ray, RayHit, Vec2, Vec3};

/// The camera as seen by the frame loop.
///
/// The loop never touches the camera's internal bookkeeping. It reads the view
/// matrix once per frame to detect motion, asks for rays when the user drags a
/// selection, and configures framing when a volume is loaded.
pub trait Camera {
    /// The current world-to-view matrix.
    fn view_matrix(&self) -> Mat4;

    /// The current view-to-clip matrix (right-handed, `[0, 1]` depth).
    fn projection_matrix(&self) -> Mat4;

    /// The combined world-to-clip matrix.
    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Generates a world-space ray through a point given in normalized device
    /// coordinates (`[-1, 1]` on both axes).
    fn generate_ray(&self, ndc: Vec2) -> Ray;

    /// Intersects a ray with an axis-aligned rectangle.
    ///
    /// Returns `None` on a miss.
    fn ray_intersects_rect(&self, ray: &Ray, rect: &FaceRect) -> Option<RayHit> {
        rect.intersect(ray)
    }

    /// Enables or disables user-driven rotation.
    fn enable_rotation(&mut self, enabled: bool);

    /// Sets the distance from the camera to its look-at point.
    fn set_distance(&mut self, distance: f32);

    /// Sets the world scale used to size clip planes and drag sensitivity.
    fn set_world_scale(&mut self, scale: f32);

    /// Sets the point the camera orbits around.
    fn set_look_at(&mut self, target: Vec3);

    /// Applies a pointer drag, expressed as a delta in normalized device coordinates.
    ///
    /// Cameras that are not user-controllable can ignore this.
    fn drag(&mut self, _delta_ndc: Vec2) {}

    /// Updates the aspect ratio after a viewport change.
    fn set_aspect_ratio(&mut self, _aspect_ratio: f32) {}
}
