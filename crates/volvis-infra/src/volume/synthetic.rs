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


//! Procedurally generated 8-bit scalar volumes.

use volvis_core::math::{Extent3D, Vec3};

/// A dense 8-bit scalar field, x fastest then y then z.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticVolume {
    dims: Extent3D,
    voxels: Vec<u8>,
}

impl SyntheticVolume {
    /// A radial density field: 255 at the centre, falling to 0 at the
    /// inscribed sphere's surface.
    pub fn sphere(dims: Extent3D) -> Self {
        let size = dims.as_vec3();
        let center = size * 0.5;
        let radius = (size.min_element() * 0.5).max(1.0);
        let count = dims.width as usize * dims.height as usize * dims.depth as usize;
        let mut voxels = Vec::with_capacity(count);
        for z in 0..dims.depth {
            for y in 0..dims.height {
                for x in 0..dims.width {
                    let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5);
                    let falloff = 1.0 - (p - center).length() / radius;
                    voxels.push((falloff.clamp(0.0, 1.0) * 255.0) as u8);
                }
            }
        }
        log::debug!(
            "Generated {}x{}x{} sphere volume",
            dims.width,
            dims.height,
            dims.depth
        );
        Self { dims, voxels }
    }

    /// Volume dimensions in voxels.
    pub fn dims(&self) -> Extent3D {
        self.dims
    }

    /// The voxel at integer coordinates, clamped to the volume.
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> f32 {
        if self.voxels.is_empty() {
            return 0.0;
        }
        let clamp = |v: i64, n: u32| v.clamp(0, n.saturating_sub(1) as i64) as usize;
        let (x, y, z) = (
            clamp(x, self.dims.width),
            clamp(y, self.dims.height),
            clamp(z, self.dims.depth),
        );
        let w = self.dims.width as usize;
        let h = self.dims.height as usize;
        self.voxels
            .get(x + w * (y + h * z))
            .copied()
            .map_or(0.0, f32::from)
    }

    /// Nearest-neighbour sample at a position in voxel space.
    pub fn sample_nearest(&self, p: Vec3) -> f32 {
        self.voxel(p.x.floor() as i64, p.y.floor() as i64, p.z.floor() as i64)
    }

    /// Trilinear sample at a position in voxel space (voxel centres at `+0.5`).
    pub fn sample_linear(&self, p: Vec3) -> f32 {
        let q = p - Vec3::new(0.5, 0.5, 0.5);
        let (x0, y0, z0) = (q.x.floor(), q.y.floor(), q.z.floor());
        let (fx, fy, fz) = (q.x - x0, q.y - y0, q.z - z0);
        let (x0, y0, z0) = (x0 as i64, y0 as i64, z0 as i64);
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let c = |dx: i64, dy: i64, dz: i64| self.voxel(x0 + dx, y0 + dy, z0 + dz);
        let c00 = lerp(c(0, 0, 0), c(1, 0, 0), fx);
        let c10 = lerp(c(0, 1, 0), c(1, 1, 0), fx);
        let c01 = lerp(c(0, 0, 1), c(1, 0, 1), fx);
        let c11 = lerp(c(0, 1, 1), c(1, 1, 1), fx);
        lerp(lerp(c00, c10, fy), lerp(c01, c11, fy), fz)
    }
}
