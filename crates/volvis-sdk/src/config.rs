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


//! Startup configuration of the viewer, loaded from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use volvis_core::math::LinearRgba;
use volvis_lanes::CompositorSettings;

use crate::error::ConfigError;

/// Settings read once at startup. Every field has a default, so a partial
/// JSON document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Width of the configuration panel in window units.
    pub menu_width: u32,
    /// Edge of the square viewport of the initial window, in window units.
    pub initial_viewport: u32,
    /// Time budget of one CPU render, in milliseconds.
    pub target_frame_time_ms: f64,
    /// Number of frames averaged by the frame timing display.
    pub timing_window: usize,
    /// Fraction of the volume size added around the wireframe box.
    pub wireframe_margin: f32,
    /// Wireframe RGB.
    pub wireframe_color: [f32; 3],
    /// Viewport clear colour, RGBA.
    pub clear_color: [f32; 4],
    /// Window title.
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            menu_width: 560,
            initial_viewport: 760,
            target_frame_time_ms: 1000.0 / 60.0,
            timing_window: volvis_control::timing::DEFAULT_TIMING_WINDOW,
            wireframe_margin: volvis_lanes::composite_lane::DEFAULT_WIREFRAME_MARGIN,
            wireframe_color: [1.0, 1.0, 1.0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            title: "3D Visualization Viewer".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_frame_time_ms.is_finite() && self.target_frame_time_ms > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "target_frame_time_ms must be positive, got {}",
                self.target_frame_time_ms
            )));
        }
        if self.initial_viewport == 0 {
            return Err(ConfigError::Invalid(
                "initial_viewport must be at least 1".into(),
            ));
        }
        if self.timing_window == 0 {
            return Err(ConfigError::Invalid(
                "timing_window must be at least 1".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.wireframe_margin) {
            return Err(ConfigError::Invalid(format!(
                "wireframe_margin must lie in [0, 1), got {}",
                self.wireframe_margin
            )));
        }
        Ok(())
    }

    /// The CPU render budget.
    pub fn target_frame_time(&self) -> Duration {
        Duration::from_secs_f64(self.target_frame_time_ms / 1000.0)
    }

    /// Size of the initial window: the viewport plus the panel beside it.
    pub fn initial_window_size(&self) -> volvis_core::math::Extent2D {
        volvis_core::math::Extent2D::new(
            self.initial_viewport + self.menu_width,
            self.initial_viewport,
        )
    }

    /// The compositing lane settings described by this configuration.
    pub fn compositor_settings(&self) -> CompositorSettings {
        let [r, g, b] = self.wireframe_color;
        CompositorSettings {
            wireframe_margin: self.wireframe_margin,
            wireframe_color: LinearRgba::rgb(r, g, b),
            clear_color: LinearRgba::from_array(self.clear_color),
        }
    }
}
