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

//! Windowed frame-time averaging for display.

use std::time::Duration;

/// Number of frames averaged per window.
pub const DEFAULT_TIMING_WINDOW: usize = 10;

/// Averages frame durations over consecutive, non-overlapping windows.
///
/// Unlike a rolling buffer, the reported average only changes when a window
/// completes. Between completions [`average`](Self::average) keeps returning the
/// previous window's mean so the displayed figure does not jitter.
#[derive(Debug, Clone)]
pub struct FrameTimingAggregator {
    window: usize,
    accumulated: Duration,
    count: usize,
    last_average: Duration,
    completed_windows: u64,
}

impl FrameTimingAggregator {
    /// Creates an aggregator averaging over `window` frames. A window of zero is treated as one.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            accumulated: Duration::ZERO,
            count: 0,
            last_average: Duration::ZERO,
            completed_windows: 0,
        }
    }

    /// Records one frame's duration.
    ///
    /// When this completes a window, the mean is published and the accumulator
    /// and count restart from zero.
    pub fn record(&mut self, duration: Duration) {
        self.accumulated += duration;
        self.count += 1;
        if self.count == self.window {
            self.last_average = self.accumulated / self.window as u32;
            self.accumulated = Duration::ZERO;
            self.count = 0;
            self.completed_windows += 1;
            log::trace!("Frame timing window closed: {:?}", self.last_average);
        }
    }

    /// The mean of the last completed window, or zero before the first one.
    pub fn average(&self) -> Duration {
        self.last_average
    }

    /// Frames recorded in the window currently being filled.
    pub fn pending(&self) -> usize {
        self.count
    }

    /// Number of windows completed since creation.
    pub fn completed_windows(&self) -> u64 {
        self.completed_windows
    }

    /// The configured window length.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for FrameTimingAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TIMING_WINDOW)
    }
}
