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

//! Square viewport placement next to the configuration panel.
//!
//! The layout is recomputed from scratch on every resize and never patched.

use volvis_core::math::{Extent2D, Origin2D, Vec2};

/// Where the volume viewport and the panel sit in the window.
///
/// Window sizes and the panel width are in DPI-independent window units; the
/// base render resolution and the viewport origin are in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    window: Extent2D,
    scale_factor: f32,
    menu_width: u32,
    viewport: u32,
    base_resolution: Extent2D,
}

impl ViewportLayout {
    /// Lays out a window of `window` units with a `menu_width` panel on the right.
    ///
    /// The viewport is the largest square left of the panel, at least one unit wide.
    pub fn compute(window: Extent2D, scale_factor: f32, menu_width: u32) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let available = window.width.saturating_sub(menu_width);
        let viewport = available.min(window.height).max(1);
        let edge = ((viewport as f32 * scale_factor).round() as u32).max(1);
        Self {
            window,
            scale_factor,
            menu_width,
            viewport,
            base_resolution: Extent2D::square(edge),
        }
    }

    /// The window size in window units.
    pub fn window(&self) -> Extent2D {
        self.window
    }

    /// Framebuffer pixels per window unit.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// The viewport edge in window units.
    pub fn viewport(&self) -> u32 {
        self.viewport
    }

    /// The native render resolution: the viewport in framebuffer pixels.
    pub fn base_resolution(&self) -> Extent2D {
        self.base_resolution
    }

    /// The framebuffer size in pixels.
    pub fn framebuffer_size(&self) -> Extent2D {
        Extent2D::new(
            self.to_pixels(self.window.width),
            self.to_pixels(self.window.height),
        )
    }

    /// Lower-left corner of the viewport in framebuffer pixels, centred in the
    /// area left of the panel. Negative when the window is narrower than the panel.
    pub fn viewport_origin(&self) -> Origin2D {
        let fb = self.framebuffer_size();
        let menu = self.to_pixels(self.menu_width) as i64;
        let base = self.base_resolution;
        let x = (fb.width as i64 - menu - base.width as i64) / 2;
        let y = (fb.height as i64 - base.height as i64) / 2;
        Origin2D::new(x as i32, y as i32)
    }

    /// Top-left corner of the panel in window units.
    pub fn panel_origin(&self) -> Origin2D {
        Origin2D::new(self.window.width as i32 - self.menu_width as i32, 0)
    }

    /// Panel size in window units.
    pub fn panel_size(&self) -> Extent2D {
        Extent2D::new(self.menu_width, self.window.height)
    }

    /// Converts a cursor position (window units, top-left origin) into viewport
    /// coordinates (window units, relative to the viewport's top-left corner).
    pub fn to_viewport(&self, cursor: Vec2) -> Vec2 {
        let left = (self.window.width as f32 - self.menu_width as f32 - self.viewport as f32) / 2.0;
        let top = (self.window.height as f32 - self.viewport as f32) / 2.0;
        cursor - Vec2::new(left.trunc(), top.trunc())
    }

    /// Returns `true` when a cursor position (window units) lies over the viewport.
    pub fn contains(&self, cursor: Vec2) -> bool {
        let local = self.to_viewport(cursor);
        let edge = self.viewport as f32;
        (0.0..edge).contains(&local.x) && (0.0..edge).contains(&local.y)
    }

    /// The viewport size in window units.
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport as f32, self.viewport as f32)
    }

    fn to_pixels(&self, units: u32) -> u32 {
        (units as f32 * self.scale_factor).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window_fits_viewport_exactly() {
        let layout = ViewportLayout::compute(Extent2D::new(760 + 560, 760), 1.0, 560);
        assert_eq!(layout.viewport(), 760);
        assert_eq!(layout.base_resolution(), Extent2D::square(760));
        assert_eq!(layout.viewport_origin(), Origin2D::new(0, 0));
        assert_eq!(layout.panel_origin(), Origin2D::new(760, 0));
        assert_eq!(layout.panel_size(), Extent2D::new(560, 760));
    }

    #[test]
    fn test_wide_window_centres_viewport_horizontally() {
        let layout = ViewportLayout::compute(Extent2D::new(1560, 800), 1.0, 560);
        assert_eq!(layout.viewport(), 800);
        assert_eq!(layout.viewport_origin(), Origin2D::new(100, 0));
        assert_eq!(layout.to_viewport(Vec2::new(100.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_tall_window_centres_viewport_vertically() {
        let layout = ViewportLayout::compute(Extent2D::new(960, 1000), 1.0, 560);
        assert_eq!(layout.viewport(), 400);
        assert_eq!(layout.viewport_origin(), Origin2D::new(0, 300));
    }

    #[test]
    fn test_hidpi_scales_base_resolution() {
        let layout = ViewportLayout::compute(Extent2D::new(1320, 760), 2.0, 560);
        assert_eq!(layout.viewport(), 760);
        assert_eq!(layout.base_resolution(), Extent2D::square(1520));
        assert_eq!(layout.framebuffer_size(), Extent2D::new(2640, 1520));
        assert_eq!(layout.viewport_origin(), Origin2D::new(0, 0));
    }

    #[test]
    fn test_contains_excludes_panel_and_borders() {
        let layout = ViewportLayout::compute(Extent2D::new(1560, 800), 1.0, 560);
        assert!(layout.contains(Vec2::new(100.0, 0.0)));
        assert!(layout.contains(Vec2::new(899.5, 799.5)));
        assert!(!layout.contains(Vec2::new(99.0, 400.0)));
        assert!(!layout.contains(Vec2::new(900.0, 400.0)));
        assert!(!layout.contains(Vec2::new(1200.0, 400.0)));
        assert!(!layout.contains(Vec2::new(500.0, 800.0)));
    }

    #[test]
    fn test_window_narrower_than_panel_keeps_one_pixel() {
        let layout = ViewportLayout::compute(Extent2D::new(300, 700), 1.0, 560);
        assert_eq!(layout.viewport(), 1);
        assert_eq!(layout.base_resolution(), Extent2D::square(1));
        assert!(layout.viewport_origin().x < 0);
    }
}
