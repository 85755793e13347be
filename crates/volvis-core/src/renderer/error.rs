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

//! Defines the error type shared by rendering backends and raster targets.

use thiserror::Error;

/// An error reported by a rendering backend or raster target.
///
/// None of these abort the frame loop. The caller logs them and leaves the
/// corresponding stale flag set so the work is retried on a later frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The backend failed while performing the requested work.
    #[error("Backend failure: {0}")]
    BackendFailure(String),
    /// A resource the operation depends on is not available yet.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// A zero-sized or otherwise unusable render resolution was requested.
    #[error("Invalid render resolution {width}x{height}")]
    InvalidResolution {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}
