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

//! Provides structs for representing 2D and 3D dimensions and origins.
//!
//! These types describe window sizes, render resolutions, viewport placement and
//! volume grid dimensions. They use integer (`u32`) components.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// A two-dimensional extent, typically representing width and height.
///
/// This is used for window sizes, viewport sizes and render resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square extent of the given edge length.
    #[inline]
    pub const fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Divides both axes by an integer scale factor, never going below one pixel.
    ///
    /// A `divisor` of zero is treated as one.
    #[inline]
    pub fn divided_by(&self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        Self::new((self.width / divisor).max(1), (self.height / divisor).max(1))
    }

    /// Returns `true` if either axis is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total number of pixels covered by the extent.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A three-dimensional extent, representing width, height, and depth.
///
/// This is used for the voxel dimensions of a loaded volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth component of the extent.
    pub depth: u32,
}

impl Extent3D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the extent as a floating point vector.
    #[inline]
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.width as f32, self.height as f32, self.depth as f32)
    }

    /// Returns the largest of the three dimensions.
    #[inline]
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height).max(self.depth)
    }
}

/// A two-dimensional origin, typically representing an (x, y) offset.
///
/// This is used to specify the lower-left corner of the viewport and of the panel.
/// Offsets may be negative when the window is narrower than the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Origin2D {
    /// The x-coordinate of the origin.
    pub x: i32,
    /// The y-coordinate of the origin.
    pub y: i32,
}

impl Origin2D {
    /// Creates a new origin.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
