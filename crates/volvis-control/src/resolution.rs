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

//! Dynamic render-resolution scaling for the CPU backend.
//!
//! Render cost grows with the pixel count, i.e. with the square of the linear
//! resolution. From the last render's duration and the divisor it ran at, the
//! controller estimates the full-resolution cost and picks the smallest integer
//! divisor expected to land near the frame budget.

use std::time::Duration;

/// Default frame budget (60 Hz).
pub const DEFAULT_TARGET_FRAME_TIME: Duration = Duration::from_nanos(16_666_667);

/// Chooses the integer resolution divisor for the next CPU render.
#[derive(Debug, Clone)]
pub struct ResolutionController {
    target: Duration,
    previous_scale: u32,
    previous_render: Option<Duration>,
}

impl ResolutionController {
    /// Creates a controller aiming for `target` per render.
    ///
    /// A zero target is raised to one microsecond.
    pub fn new(target: Duration) -> Self {
        Self {
            target: target.max(Duration::from_micros(1)),
            previous_scale: 1,
            previous_render: None,
        }
    }

    /// The frame budget.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// The divisor the last render ran at. Always `>= 1`.
    pub fn previous_scale(&self) -> u32 {
        self.previous_scale
    }

    /// Duration of the last render, if any render happened yet.
    pub fn previous_render(&self) -> Option<Duration> {
        self.previous_render
    }

    /// Estimated full-resolution cost divided by the budget.
    ///
    /// Returns `None` before the first render.
    pub fn performance_ratio(&self) -> Option<f64> {
        let last = self.previous_render?;
        let scale = f64::from(self.previous_scale);
        let estimated_full = last.as_secs_f64() * scale * scale;
        Some(estimated_full / self.target.as_secs_f64())
    }

    /// The divisor to use for the next render while the user interacts.
    ///
    /// `floor(sqrt(ratio)) + 1`, with `1` whenever the estimate already fits the
    /// budget and before any render has been measured.
    pub fn next_interactive_scale(&self) -> u32 {
        match self.performance_ratio() {
            None => 1,
            Some(ratio) if ratio <= 1.0 || !ratio.is_finite() => 1,
            Some(ratio) => {
                let scale = ratio.sqrt().floor() + 1.0;
                // `as` saturates, so absurd ratios still yield a usable divisor.
                (scale as u32).max(1)
            }
        }
    }

    /// The divisor for the next render: adaptive while interacting, native otherwise.
    pub fn plan(&self, interacting: bool) -> u32 {
        if interacting {
            self.next_interactive_scale()
        } else {
            1
        }
    }

    /// Stores the outcome of a completed render.
    pub fn record_render(&mut self, scale: u32, duration: Duration) {
        self.previous_scale = scale.max(1);
        self.previous_render = Some(duration);
    }
}

impl Default for ResolutionController {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FRAME_TIME)
    }
}
