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


//! What is displayed: nothing yet, or a volume with both of its backends.

use volvis_core::math::Extent3D;
use volvis_core::renderer::{CpuVolumeRenderer, GpuVolumeRenderer};

/// A volume ready to be displayed, with the two backends that render it.
pub struct LoadedVolume {
    /// Voxel dimensions of the volume.
    pub dims: Extent3D,
    /// The software ray-marching backend.
    pub cpu: Box<dyn CpuVolumeRenderer>,
    /// The GPU mesh and brick backend.
    pub gpu: Box<dyn GpuVolumeRenderer>,
}

impl LoadedVolume {
    /// Bundles a volume's dimensions with its backends.
    pub fn new(
        dims: Extent3D,
        cpu: Box<dyn CpuVolumeRenderer>,
        gpu: Box<dyn GpuVolumeRenderer>,
    ) -> Self {
        Self { dims, cpu, gpu }
    }
}

impl std::fmt::Debug for LoadedVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedVolume")
            .field("dims", &self.dims)
            .finish_non_exhaustive()
    }
}

/// The viewer's volume slot.
///
/// Rendering, compositing and selection all match on this explicitly; with
/// no volume the viewport is only cleared.
#[derive(Debug, Default)]
pub enum VolumeState {
    /// Nothing to render yet.
    #[default]
    NoVolumeLoaded,
    /// A volume and its backends.
    Loaded(LoadedVolume),
}

impl VolumeState {
    /// Dimensions of the loaded volume, if any.
    pub fn dims(&self) -> Option<Extent3D> {
        match self {
            VolumeState::NoVolumeLoaded => None,
            VolumeState::Loaded(volume) => Some(volume.dims),
        }
    }

    /// Returns `true` when a volume is loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, VolumeState::Loaded(_))
    }
}
