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

//! The framebuffer produced by the CPU backend.

use crate::math::{Extent2D, LinearRgba};

/// A 2D image of premultiplied linear RGBA pixels, stored row by row with row 0
/// at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameImage {
    size: Extent2D,
    pixels: Vec<LinearRgba>,
}

impl FrameImage {
    /// Creates an image of the given size filled with `fill`.
    pub fn new(size: Extent2D, fill: LinearRgba) -> Self {
        Self {
            size,
            pixels: vec![fill; size.area()],
        }
    }

    /// Creates an image from existing pixel data.
    ///
    /// Returns `None` when `pixels` does not hold exactly `width * height` entries.
    pub fn from_pixels(size: Extent2D, pixels: Vec<LinearRgba>) -> Option<Self> {
        (pixels.len() == size.area()).then_some(Self { size, pixels })
    }

    /// Image dimensions.
    #[inline]
    pub fn size(&self) -> Extent2D {
        self.size
    }

    /// Read-only access to all pixels.
    #[inline]
    pub fn pixels(&self) -> &[LinearRgba] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<LinearRgba> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// Writes the pixel at `(x, y)`. Writes outside the image are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: LinearRgba) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let idx = y as usize * self.size.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Samples the image with normalized coordinates, nearest-neighbour.
    ///
    /// `u` runs left to right and `v` top to bottom, both in `[0, 1]`.
    pub fn sample_nearest(&self, u: f32, v: f32) -> LinearRgba {
        if self.size.is_empty() {
            return LinearRgba::TRANSPARENT;
        }
        let x = ((u.clamp(0.0, 1.0) * self.size.width as f32) as u32).min(self.size.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.size.height as f32) as u32).min(self.size.height - 1);
        self.get(x, y).unwrap_or(LinearRgba::TRANSPARENT)
    }
}
