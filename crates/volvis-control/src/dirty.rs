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

//! Named staleness bits and the events that raise them.
//!
//! | Flag                      | Raised by                                                        | Cleared by                               |
//! |---------------------------|------------------------------------------------------------------|------------------------------------------|
//! | `USER_INTERACTED`         | camera motion, render config, interpolation, resize, load, backend switch | CPU render decision, GPU interpolation update |
//! | `PENDING_FULL_RESOLUTION` | reduced-resolution CPU render, failed CPU render                 | full-resolution CPU render               |
//! | `GPU_MESH_STALE`          | GPU mesh config                                                  | iso-surface mesh rebuild                 |
//! | `GPU_BRICKS_STALE`        | GPU volume config                                                | brick re-partition                       |
//! | `VOLUME_STALE`            | render config                                                    | brick upload                             |
//! | `OPACITY_TABLE_STALE`     | render config with a transfer-function change                    | opacity mesh rebuild                     |
//!
//! Every flag except `USER_INTERACTED` starts raised, so the first frame after a
//! volume is loaded builds every derived resource once.

use bitflags::bitflags;
use volvis_core::event::ViewerEvent;

bitflags! {
    /// The full state vector of the redraw coordinator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StaleFlags: u8 {
        /// The camera or the render configuration changed since the last CPU render.
        const USER_INTERACTED = 1 << 0;
        /// The last CPU render ran below native resolution; a native one is owed.
        const PENDING_FULL_RESOLUTION = 1 << 1;
        /// The iso-surface mesh of the GPU backend is out of date.
        const GPU_MESH_STALE = 1 << 2;
        /// The GPU brick partition no longer matches the brick configuration.
        const GPU_BRICKS_STALE = 1 << 3;
        /// Uploaded volume bricks are out of date.
        const VOLUME_STALE = 1 << 4;
        /// The opacity-driven GPU mesh is out of date.
        const OPACITY_TABLE_STALE = 1 << 5;
    }
}

impl StaleFlags {
    /// The state at startup.
    pub const INITIAL: Self = Self::PENDING_FULL_RESOLUTION
        .union(Self::GPU_MESH_STALE)
        .union(Self::GPU_BRICKS_STALE)
        .union(Self::VOLUME_STALE)
        .union(Self::OPACITY_TABLE_STALE);

    /// The flags an event raises.
    ///
    /// Pointer and keyboard events raise nothing: camera motion is detected by
    /// comparing view matrices, not by watching the mouse.
    pub fn raised_by(event: &ViewerEvent) -> Self {
        match event {
            ViewerEvent::WindowResized(_) => Self::USER_INTERACTED,
            ViewerEvent::RenderConfigChanged(config) => {
                let mut flags = Self::USER_INTERACTED | Self::VOLUME_STALE;
                if config.update_tf {
                    flags |= Self::OPACITY_TABLE_STALE;
                }
                flags
            }
            ViewerEvent::InterpolationModeChanged(_) => Self::USER_INTERACTED,
            ViewerEvent::GpuMeshConfigChanged(_) => Self::GPU_MESH_STALE,
            ViewerEvent::GpuVolumeConfigChanged(_) => Self::GPU_BRICKS_STALE,
            ViewerEvent::BackendChanged(_) => Self::USER_INTERACTED,
            ViewerEvent::MouseButton { .. }
            | ViewerEvent::CursorMoved(_)
            | ViewerEvent::KeyPressed(_)
            | ViewerEvent::CloseRequested => Self::empty(),
        }
    }
}

impl Default for StaleFlags {
    fn default() -> Self {
        Self::INITIAL
    }
}
