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

//! Provides geometric primitive shapes for spatial calculations.
//!
//! This module contains the structures used for the volume's bounding box, for
//! camera rays and for the volume face that pointer selection is projected onto.

use super::{Vec3, EPSILON};

/// Relative tolerance applied to the bounds of a [`FaceRect`] hit test.
///
/// Rays aimed exactly at a corner of the face must count as hits even when the
/// unprojection lands a few ULPs outside.
pub const FACE_HIT_TOLERANCE: f32 = 1e-3;

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is a rectangular prism aligned with the coordinate axes, defined by its
/// minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from two corner points.
    ///
    /// This constructor automatically ensures that the `min` field holds the
    /// component-wise minimum and `max` holds the component-wise maximum,
    /// regardless of the order the points are passed in.
    #[inline]
    pub fn from_min_max(min_pt: Vec3, max_pt: Vec3) -> Self {
        Self {
            min: Vec3::new(
                min_pt.x.min(max_pt.x),
                min_pt.y.min(max_pt.y),
                min_pt.z.min(max_pt.z),
            ),
            max: Vec3::new(
                min_pt.x.max(max_pt.x),
                min_pt.y.max(max_pt.y),
                min_pt.z.max(max_pt.z),
            ),
        }
    }

    /// Creates a box spanning `offset` to `offset + size`.
    #[inline]
    pub fn from_offset_size(offset: Vec3, size: Vec3) -> Self {
        Self::from_min_max(offset, offset + size)
    }

    /// Calculates the center point of the `Aabb`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculates the full size (width, height, depth) of the `Aabb`.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Checks if a point is contained within or on the boundary of the `Aabb`.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns a box grown by `fraction` of its own size, split evenly on both sides
    /// of every axis, keeping the same center.
    #[inline]
    pub fn inflated(&self, fraction: f32) -> Self {
        let pad = self.size() * (fraction * 0.5);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Intersects a ray with the box using the slab method.
    ///
    /// Returns the entry and exit distances along the ray, entry clamped to zero
    /// when the origin is inside. `None` on a miss or when the box is behind.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        let axes = [
            (ray.origin.x, ray.direction.x, self.min.x, self.max.x),
            (ray.origin.y, ray.direction.y, self.min.y, self.max.y),
            (ray.origin.z, ray.direction.z, self.min.z, self.max.z),
        ];
        for (origin, direction, lo, hi) in axes {
            if direction.abs() < EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }

    /// Returns the eight corners of the box.
    ///
    /// Bit 0 of the index selects `max.x`, bit 1 `max.y` and bit 2 `max.z`.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut out = [Vec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        out
    }

    /// The twelve edges of the box as pairs of indices into [`Aabb::corners`].
    pub const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (2, 3),
        (4, 5),
        (6, 7),
        (0, 2),
        (1, 3),
        (4, 6),
        (5, 7),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    /// The twelve triangles of the box surface as index triples into [`Aabb::corners`].
    pub const TRIANGLES: [[usize; 3]; 12] = [
        [0, 2, 1],
        [1, 2, 3],
        [4, 5, 6],
        [5, 7, 6],
        [0, 1, 4],
        [1, 5, 4],
        [2, 6, 3],
        [3, 6, 7],
        [0, 4, 2],
        [2, 4, 6],
        [1, 3, 5],
        [3, 7, 5],
    ];
}

/// A ray with an origin and a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts, in world space.
    pub origin: Vec3,
    /// The unit direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns the ray with the X and Y components of its direction negated.
    ///
    /// Camera rays point in the opposite lateral direction from the volume's
    /// index frame; selection flips them before intersecting the front face.
    #[inline]
    pub fn with_flipped_xy(&self) -> Self {
        Self {
            origin: self.origin,
            direction: Vec3::new(-self.direction.x, -self.direction.y, self.direction.z),
        }
    }
}

/// The result of a successful ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The intersection point in world space.
    pub point: Vec3,
    /// The ray parameter at the intersection.
    pub distance: f32,
}

/// An axis-aligned rectangle lying in a plane, described by two opposite corners
/// and the plane normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRect {
    /// The corner with the smallest coordinates.
    pub min: Vec3,
    /// The corner with the largest coordinates.
    pub max: Vec3,
    /// The plane normal of the rectangle.
    pub normal: Vec3,
}

impl FaceRect {
    /// Creates a new face rectangle.
    #[inline]
    pub fn new(min: Vec3, max: Vec3, normal: Vec3) -> Self {
        Self { min, max, normal }
    }

    /// The `z = 0` face of a volume of the given dimensions, facing `+Z`.
    #[inline]
    pub fn volume_front_face(dims: Vec3) -> Self {
        Self::new(Vec3::ZERO, Vec3::new(dims.x, dims.y, 0.0), Vec3::Z)
    }

    /// Intersects a ray with the rectangle.
    ///
    /// Returns `None` when the ray is parallel to the plane, when the plane lies
    /// behind the ray origin, or when the plane hit falls outside the rectangle.
    /// Bounds are inclusive, widened by [`FACE_HIT_TOLERANCE`] of the rectangle's
    /// extent.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (self.min - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        let point = ray.at(t);
        let slack = (self.max - self.min) * FACE_HIT_TOLERANCE;
        let inside = |p: f32, lo: f32, hi: f32, s: f32| {
            let s = s.abs() + EPSILON;
            p >= lo - s && p <= hi + s
        };
        if inside(point.x, self.min.x, self.max.x, slack.x)
            && inside(point.y, self.min.y, self.max.y, slack.y)
            && inside(point.z, self.min.z, self.max.z, slack.z)
        {
            Some(RayHit { point, distance: t })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_aabb_from_min_max_reorders() {
        let b = Aabb::from_min_max(Vec3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 3.0, 1.0));
        assert_eq!(b.min, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn test_aabb_inflated_keeps_center() {
        let b = Aabb::from_offset_size(Vec3::ZERO, Vec3::new(100.0, 50.0, 20.0));
        let grown = b.inflated(0.05);
        assert_eq!(grown.center(), b.center());
        assert!(approx_eq(grown.size().x, 105.0));
        assert!(approx_eq(grown.min.x, -2.5));
        assert!(approx_eq(grown.max.y, 51.25));
    }

    #[test]
    fn test_aabb_corners_match_edges() {
        let b = Aabb::from_offset_size(Vec3::ZERO, Vec3::ONE);
        let corners = b.corners();
        for (a, c) in Aabb::EDGES {
            let d = corners[a] - corners[c];
            assert!(approx_eq(d.length(), 1.0), "edge ({a}, {c}) is not axis aligned");
        }
    }

    #[test]
    fn test_aabb_ray_slab_entry_and_exit() {
        let b = Aabb::from_offset_size(Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0));
        let ray = Ray::new(Vec3::new(5.0, 5.0, -5.0), Vec3::Z);
        let (t0, t1) = b.intersect_ray(&ray).unwrap();
        assert!(approx_eq(t0, 5.0));
        assert!(approx_eq(t1, 15.0));

        let miss = Ray::new(Vec3::new(20.0, 5.0, -5.0), Vec3::Z);
        assert!(b.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vec3::new(5.0, 5.0, 20.0), Vec3::Z);
        assert!(b.intersect_ray(&behind).is_none());
    }

    #[test]
    fn test_face_rect_hit_center() {
        let face = FaceRect::volume_front_face(Vec3::new(64.0, 32.0, 10.0));
        let ray = Ray::new(Vec3::new(32.0, 16.0, 20.0), -Vec3::Z);
        let hit = face.intersect(&ray).unwrap();
        assert_eq!(hit.point, Vec3::new(32.0, 16.0, 0.0));
        assert!(approx_eq(hit.distance, 20.0));
    }

    #[test]
    fn test_face_rect_corner_is_inclusive() {
        let face = FaceRect::volume_front_face(Vec3::new(64.0, 64.0, 64.0));
        let ray = Ray::new(Vec3::new(32.0, 32.0, 32.0), Vec3::new(32.0, 32.0, -32.0));
        let hit = face.intersect(&ray).unwrap();
        assert!((hit.point.x - 64.0).abs() < 1e-3);
        assert!((hit.point.y - 64.0).abs() < 1e-3);
    }

    #[test]
    fn test_face_rect_miss_outside_bounds() {
        let face = FaceRect::volume_front_face(Vec3::new(10.0, 10.0, 10.0));
        let ray = Ray::new(Vec3::new(50.0, 5.0, 5.0), -Vec3::Z);
        assert!(face.intersect(&ray).is_none());
    }

    #[test]
    fn test_face_rect_miss_parallel_or_behind() {
        let face = FaceRect::volume_front_face(Vec3::new(10.0, 10.0, 10.0));
        assert!(face
            .intersect(&Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::X))
            .is_none());
        assert!(face
            .intersect(&Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::Z))
            .is_none());
    }

    #[test]
    fn test_ray_with_flipped_xy() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, -1.0)).with_flipped_xy();
        assert!(ray.direction.x < 0.0 && ray.direction.y < 0.0 && ray.direction.z < 0.0);
    }
}
