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


//! Error types surfaced by the viewer.

use std::path::PathBuf;

use thiserror::Error;
use volvis_core::math::Extent3D;

/// An error while loading or validating a [`ViewerConfig`](crate::ViewerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// An error reported by the [`Viewer`](crate::Viewer).
///
/// Backend failures during a frame are not errors at this level: they are
/// logged and retried on a later frame.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The viewer configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A volume with a zero dimension cannot be displayed.
    #[error("cannot load an empty volume ({}x{}x{})", .0.width, .0.height, .0.depth)]
    EmptyVolume(Extent3D),
}
