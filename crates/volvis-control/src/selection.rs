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

//! Maps a pointer drag onto a rectangle on the volume's front face.
//!
//! Both ends of the drag are turned into camera rays and intersected with the
//! `z = 0` face of the volume. The hit points are normalized by the volume's
//! dimensions, with X mirrored, to give a [`SelectionRect`].

use volvis_core::camera::Camera;
use volvis_core::math::{FaceRect, Vec2, Vec3};
use volvis_core::panel::SelectionRect;

/// Where a drag happens: the viewport it is measured in and the volume it selects on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Viewport size, in the same units as pointer positions.
    pub viewport: Vec2,
    /// Dimensions of the loaded volume.
    pub volume_dims: Vec3,
}

impl DragGesture {
    /// Normalized face coordinates under a viewport position, or `None` on a miss.
    pub fn project(&self, camera: &dyn Camera, position: Vec2) -> Option<(f32, f32)> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let normalized = position / self.viewport;
        let ndc = normalized * 2.0 - Vec2::ONE;
        let ray = camera.generate_ray(ndc).with_flipped_xy();
        let face = FaceRect::volume_front_face(self.volume_dims);
        let hit = camera.ray_intersects_rect(&ray, &face)?;
        Some((
            1.0 - hit.point.x / self.volume_dims.x,
            hit.point.y / self.volume_dims.y,
        ))
    }
}

/// Tracks the current drag and the last valid selection.
///
/// A drag whose press or current point misses the face changes nothing:
/// the previous rectangle is kept and no update is produced.
#[derive(Debug, Clone, Default)]
pub struct RaySelector {
    press: Option<Vec2>,
    last: Option<SelectionRect>,
}

impl RaySelector {
    /// Creates a selector with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rectangle produced, if any.
    pub fn last(&self) -> Option<SelectionRect> {
        self.last
    }

    /// `true` between [`press`](Self::press) and [`release`](Self::release).
    pub fn is_dragging(&self) -> bool {
        self.press.is_some()
    }

    /// Starts a drag. Both corners of the rectangle come from the press point.
    pub fn press(
        &mut self,
        camera: &dyn Camera,
        gesture: &DragGesture,
        position: Vec2,
    ) -> Option<SelectionRect> {
        self.press = Some(position);
        self.update(camera, gesture, position, position)
    }

    /// Continues a drag to `position`. Ignored when no drag is in progress.
    pub fn drag(
        &mut self,
        camera: &dyn Camera,
        gesture: &DragGesture,
        position: Vec2,
    ) -> Option<SelectionRect> {
        let start = self.press?;
        self.update(camera, gesture, start, position)
    }

    /// Ends the drag. The last rectangle is kept.
    pub fn release(&mut self) {
        self.press = None;
    }

    fn update(
        &mut self,
        camera: &dyn Camera,
        gesture: &DragGesture,
        start: Vec2,
        current: Vec2,
    ) -> Option<SelectionRect> {
        let Some((x0, y0)) = gesture.project(camera, start) else {
            log::debug!("Selection start {start:?} misses the volume face");
            return None;
        };
        let Some((x1, y1)) = gesture.project(camera, current) else {
            log::debug!("Selection point {current:?} misses the volume face");
            return None;
        };
        let rect = SelectionRect::new(x0, y0, x1, y1);
        log::debug!("Selection rectangle {rect:?}");
        self.last = Some(rect);
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volvis_core::math::{Mat4, Ray};

    /// Looks straight down -Z from above the face center; maps NDC linearly
    /// onto a square patch of the plane, mirrored so that the flipped ray lands
    /// where the pointer is.
    struct TopDownCamera {
        eye: Vec3,
        half_extent: f32,
    }

    impl Camera for TopDownCamera {
        fn view_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }
        fn projection_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }
        fn generate_ray(&self, ndc: Vec2) -> Ray {
            let h = self.half_extent / self.eye.z;
            Ray::new(self.eye, Vec3::new(-ndc.x * h, -ndc.y * h, -1.0))
        }
        fn enable_rotation(&mut self, _enabled: bool) {}
        fn set_distance(&mut self, _distance: f32) {}
        fn set_world_scale(&mut self, _scale: f32) {}
        fn set_look_at(&mut self, _target: Vec3) {}
    }

    fn setup() -> (TopDownCamera, DragGesture) {
        let camera = TopDownCamera {
            eye: Vec3::new(50.0, 50.0, 100.0),
            half_extent: 50.0,
        };
        let gesture = DragGesture {
            viewport: Vec2::new(200.0, 200.0),
            volume_dims: Vec3::new(100.0, 100.0, 40.0),
        };
        (camera, gesture)
    }

    #[test]
    fn test_press_uses_press_point_for_both_corners() {
        let (camera, gesture) = setup();
        let mut selector = RaySelector::new();
        let rect = selector
            .press(&camera, &gesture, Vec2::new(100.0, 100.0))
            .unwrap();
        assert!((rect.x0 - 0.5).abs() < 0.001 && (rect.y0 - 0.5).abs() < 0.001);
        assert_eq!((rect.x0, rect.y0), (rect.x1, rect.y1));
        assert!(selector.is_dragging());
    }

    #[test]
    fn test_drag_spans_the_face_with_mirrored_x() {
        let (camera, gesture) = setup();
        let mut selector = RaySelector::new();
        selector.press(&camera, &gesture, Vec2::ZERO);
        let rect = selector
            .drag(&camera, &gesture, Vec2::new(200.0, 200.0))
            .unwrap();
        assert!((rect.x0 - 1.0).abs() < 0.001);
        assert!(rect.y0.abs() < 0.001);
        assert!(rect.x1.abs() < 0.001);
        assert!((rect.y1 - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_miss_keeps_last_rectangle() {
        let (camera, gesture) = setup();
        let mut selector = RaySelector::new();
        let first = selector
            .press(&camera, &gesture, Vec2::new(50.0, 50.0))
            .unwrap();
        // Far outside the viewport: the ray lands outside the face.
        assert!(selector
            .drag(&camera, &gesture, Vec2::new(1000.0, 1000.0))
            .is_none());
        assert_eq!(selector.last(), Some(first));
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let (camera, gesture) = setup();
        let mut selector = RaySelector::new();
        assert!(selector.drag(&camera, &gesture, Vec2::ONE).is_none());
        selector.press(&camera, &gesture, Vec2::ONE);
        selector.release();
        assert!(selector.drag(&camera, &gesture, Vec2::ONE).is_none());
    }
}
