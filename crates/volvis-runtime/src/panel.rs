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


//! A configuration panel without a user interface.
//!
//! It owns the configuration like an interactive panel would, derives the
//! render resolution from the base resolution it is given, and logs the timing
//! figures it would display.

use volvis_core::event::ViewerEvent;
use volvis_core::math::{Extent2D, Extent3D, Origin2D};
use volvis_core::panel::{ConfigPanel, FrameTimings, SelectionRect};
use volvis_core::renderer::{
    BackendKind, GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig,
};

/// Frames between two timing log lines.
const TIMING_LOG_INTERVAL: u64 = 30;

#[derive(Debug, Default)]
pub struct DemoPanel {
    render_config: RenderConfig,
    mesh_config: GpuMeshConfig,
    volume_config: GpuVolumeConfig,
    interpolation: InterpolationMode,
    backend: BackendKind,
    selection: Option<SelectionRect>,
    draws: u64,
    pending: Vec<ViewerEvent>,
}

impl DemoPanel {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }

    /// Queues a user edit, published on the next draw.
    pub fn edit(&mut self, event: ViewerEvent) {
        match &event {
            ViewerEvent::RenderConfigChanged(config) => self.render_config = *config,
            ViewerEvent::InterpolationModeChanged(mode) => self.interpolation = *mode,
            ViewerEvent::GpuMeshConfigChanged(config) => self.mesh_config = *config,
            ViewerEvent::GpuVolumeConfigChanged(config) => self.volume_config = *config,
            ViewerEvent::BackendChanged(kind) => self.backend = *kind,
            _ => {}
        }
        self.pending.push(event);
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }
}

impl ConfigPanel for DemoPanel {
    fn render_config(&self) -> RenderConfig {
        self.render_config
    }

    fn mesh_config(&self) -> GpuMeshConfig {
        self.mesh_config
    }

    fn volume_config(&self) -> GpuVolumeConfig {
        self.volume_config
    }

    fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation
    }

    fn active_backend(&self) -> BackendKind {
        self.backend
    }

    fn set_base_render_resolution(&mut self, resolution: Extent2D) -> RenderConfig {
        self.render_config.render_resolution = Extent2D::new(
            resolution.width.max(1),
            resolution.height.max(1),
        );
        self.render_config.update_tf = false;
        self.render_config
    }

    fn set_selection_rect(&mut self, rect: SelectionRect) {
        self.selection = Some(rect);
    }

    fn set_loaded_volume(&mut self, dims: Extent3D) {
        log::debug!(
            "Panel now edits a {}x{}x{} volume",
            dims.width,
            dims.height,
            dims.depth
        );
    }

    fn draw(
        &mut self,
        _origin: Origin2D,
        _size: Extent2D,
        timings: FrameTimings,
        sink: &flume::Sender<ViewerEvent>,
    ) {
        self.draws += 1;
        if self.draws % TIMING_LOG_INTERVAL == 0 {
            log::info!(
                "Frame {}: last render {:.2} ms, average frame {:.2} ms",
                self.draws,
                timings.last_render.as_secs_f64() * 1000.0,
                timings.average_frame.as_secs_f64() * 1000.0
            );
        }
        for event in self.pending.drain(..) {
            if sink.send(event).is_err() {
                log::warn!("Viewer event bus closed, dropping panel edits");
                break;
            }
        }
    }
}
