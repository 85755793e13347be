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


//! The per-frame driver.
//!
//! One call to [`Viewer::run_frame`] does, in order:
//!
//! 1. Pump window input onto the event bus, then drain the bus.
//! 2. Apply every event: layout, selection, orbiting, backend configuration,
//!    and finally the coordinator's stale flags.
//! 3. Render with the active backend (or only clear with no volume), composite,
//!    and record the frame's duration.
//! 4. Draw the panel with the updated timings, then present.
//!
//! Backend failures are logged and never end the loop; the coordinator keeps
//! the corresponding work pending until it succeeds.

use std::time::Duration;

use volvis_control::{
    interaction_in_progress, DragGesture, FrameTimingAggregator, GpuTask, RaySelector,
    RedrawCoordinator, StaleFlags,
};
use volvis_core::camera::Camera;
use volvis_core::event::{EventBus, ViewerEvent};
use volvis_core::math::{Extent2D, Vec2};
use volvis_core::panel::{ConfigPanel, FrameTimings};
use volvis_core::platform::{Key, MouseButton, ViewerWindow};
use volvis_core::renderer::{BackendKind, RasterTarget};
use volvis_core::utils::timer::Stopwatch;
use volvis_lanes::{CompositeLane, ViewportLayout};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::volume::{LoadedVolume, VolumeState};

/// The interactive volume viewer.
///
/// Generic over its collaborators so the same loop drives a real window or a
/// headless test harness.
pub struct Viewer<W, P, C, T>
where
    W: ViewerWindow,
    P: ConfigPanel,
    C: Camera,
    T: RasterTarget,
{
    config: ViewerConfig,
    window: W,
    panel: P,
    camera: C,
    target: T,
    bus: EventBus<ViewerEvent>,
    sender: flume::Sender<ViewerEvent>,
    coordinator: RedrawCoordinator,
    timing: FrameTimingAggregator,
    selector: RaySelector,
    lane: CompositeLane,
    layout: ViewportLayout,
    volume: VolumeState,
    last_render: Duration,
    orbit_anchor: Option<Vec2>,
    running: bool,
    frames: u64,
}

impl<W, P, C, T> Viewer<W, P, C, T>
where
    W: ViewerWindow,
    P: ConfigPanel,
    C: Camera,
    T: RasterTarget,
{
    /// Creates a viewer with no volume loaded.
    ///
    /// The layout is computed from the window's current size, the base render
    /// resolution is pushed to the panel and the target is sized to the framebuffer.
    pub fn new(
        config: ViewerConfig,
        window: W,
        mut panel: P,
        mut camera: C,
        mut target: T,
    ) -> Result<Self, ViewerError> {
        config.validate()?;

        let layout =
            ViewportLayout::compute(window.inner_size(), window.scale_factor(), config.menu_width);
        panel.set_base_render_resolution(layout.base_resolution());
        target.resize(layout.framebuffer_size());
        camera.set_aspect_ratio(1.0);

        let bus = EventBus::new();
        let sender = bus.sender();
        let lane = CompositeLane::new(config.compositor_settings());
        log::info!(
            "Viewer '{}' created: viewport {} units, base resolution {}x{}, compositor {}",
            config.title,
            layout.viewport(),
            layout.base_resolution().width,
            layout.base_resolution().height,
            lane.strategy_name()
        );

        Ok(Self {
            coordinator: RedrawCoordinator::new(config.target_frame_time()),
            timing: FrameTimingAggregator::new(config.timing_window),
            config,
            window,
            panel,
            camera,
            target,
            bus,
            sender,
            selector: RaySelector::new(),
            lane,
            layout,
            volume: VolumeState::NoVolumeLoaded,
            last_render: Duration::ZERO,
            orbit_anchor: None,
            running: true,
            frames: 0,
        })
    }

    /// Installs a volume and its backends, replacing any previous one.
    ///
    /// Both backends receive the panel's current configuration, the camera is
    /// framed on the volume and every derived resource is marked stale.
    pub fn load_volume(&mut self, mut volume: LoadedVolume) -> Result<(), ViewerError> {
        let dims = volume.dims;
        if dims.width == 0 || dims.height == 0 || dims.depth == 0 {
            return Err(ViewerError::EmptyVolume(dims));
        }

        let render_config = self.panel.render_config();
        let interpolation = self.panel.interpolation_mode();
        volume.cpu.set_config(render_config);
        volume.cpu.set_interpolation_mode(interpolation);
        volume.gpu.set_render_config(render_config);
        volume.gpu.set_mesh_config(self.panel.mesh_config());
        volume.gpu.set_volume_config(self.panel.volume_config());
        volume.gpu.set_interpolation_mode(interpolation);
        volume.gpu.set_render_size(self.layout.base_resolution());

        self.panel.set_loaded_volume(dims);

        let extent = dims.max_dimension() as f32;
        self.camera.enable_rotation(true);
        self.camera.set_distance(extent);
        self.camera.set_world_scale(extent);
        self.camera.set_look_at(dims.as_vec3() / 2.0);

        self.coordinator
            .raise(StaleFlags::INITIAL | StaleFlags::USER_INTERACTED);
        self.selector = RaySelector::new();
        self.volume = VolumeState::Loaded(volume);

        log::info!(
            "Volume loaded: {}x{}x{}",
            dims.width,
            dims.height,
            dims.depth
        );
        Ok(())
    }

    /// Runs one frame. Returns `false` once the session should end.
    pub fn run_frame(&mut self) -> bool {
        let frame_clock = Stopwatch::new();

        self.window.poll_events(&self.sender);
        for event in self.bus.drain() {
            self.handle_event(&event);
            self.coordinator.apply_event(&event);
        }

        let gesture = interaction_in_progress(|button| self.window.is_mouse_button_held(button));

        let mut volume = std::mem::take(&mut self.volume);
        match &mut volume {
            VolumeState::NoVolumeLoaded => self.lane.clear_viewport(&mut self.target, &self.layout),
            VolumeState::Loaded(loaded) => match self.panel.active_backend() {
                BackendKind::Cpu => self.render_cpu_frame(loaded, gesture),
                BackendKind::Gpu => self.render_gpu_frame(loaded, gesture),
            },
        }
        self.volume = volume;

        // Recorded before the panel draws; the panel sees this frame's average.
        self.timing.record(frame_clock.elapsed());

        let timings = FrameTimings {
            last_render: self.last_render,
            average_frame: self.timing.average(),
        };
        self.panel.draw(
            self.layout.panel_origin(),
            self.layout.panel_size(),
            timings,
            &self.sender,
        );

        self.window.present();
        self.frames += 1;

        if self.window.should_close() {
            self.running = false;
        }
        self.running
    }

    /// Runs frames until the session ends. Returns the number of frames run.
    pub fn run(&mut self) -> u64 {
        let start = self.frames;
        while self.run_frame() {}
        self.frames - start
    }

    /// The configuration panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The configuration panel, mutably.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// The camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The window, mutably.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The raster target holding the last composited frame.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The redraw coordinator.
    pub fn coordinator(&self) -> &RedrawCoordinator {
        &self.coordinator
    }

    /// The frame timing aggregator.
    pub fn timing(&self) -> &FrameTimingAggregator {
        &self.timing
    }

    /// The current viewport layout.
    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    /// The loaded volume, if any.
    pub fn volume_state(&self) -> &VolumeState {
        &self.volume
    }

    /// The last selection rectangle pushed to the panel.
    pub fn selection(&self) -> Option<volvis_core::panel::SelectionRect> {
        self.selector.last()
    }

    /// Duration of the last backend render.
    pub fn last_render(&self) -> Duration {
        self.last_render
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// `false` once the session was asked to end.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A sender for publishing events that are applied at the start of the next frame.
    pub fn sender(&self) -> flume::Sender<ViewerEvent> {
        self.sender.clone()
    }

    // --- Private Helper Functions ---

    /// (Internal) Applies an event's side effects on the layout, camera, selection and backends.
    fn handle_event(&mut self, event: &ViewerEvent) {
        match event {
            ViewerEvent::WindowResized(size) => self.resize(*size),
            ViewerEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
                position,
            } => self.handle_selection_button(*pressed, *position),
            ViewerEvent::MouseButton {
                button: MouseButton::Right,
                pressed,
                position,
            } => self.orbit_anchor = pressed.then_some(*position),
            ViewerEvent::MouseButton { .. } => {}
            ViewerEvent::CursorMoved(position) => self.handle_cursor_moved(*position),
            ViewerEvent::KeyPressed(Key::Escape) => {
                log::info!("Escape pressed, ending the session after this frame");
                self.running = false;
            }
            ViewerEvent::KeyPressed(Key::Other(_)) => {}
            ViewerEvent::CloseRequested => {
                log::info!("Close requested, ending the session after this frame");
                self.running = false;
            }
            ViewerEvent::RenderConfigChanged(config) => {
                if let VolumeState::Loaded(volume) = &mut self.volume {
                    volume.cpu.set_config(*config);
                    volume.gpu.set_render_config(*config);
                }
            }
            ViewerEvent::InterpolationModeChanged(mode) => {
                if let VolumeState::Loaded(volume) = &mut self.volume {
                    volume.cpu.set_interpolation_mode(*mode);
                    volume.gpu.set_interpolation_mode(*mode);
                }
            }
            ViewerEvent::GpuMeshConfigChanged(config) => {
                if let VolumeState::Loaded(volume) = &mut self.volume {
                    volume.gpu.set_mesh_config(*config);
                }
            }
            ViewerEvent::GpuVolumeConfigChanged(config) => {
                if let VolumeState::Loaded(volume) = &mut self.volume {
                    volume.gpu.set_volume_config(*config);
                    if let Err(e) = volume.gpu.update_volume_bricks() {
                        log::warn!("Brick refresh after volume config change failed: {e}");
                    }
                }
            }
            ViewerEvent::BackendChanged(kind) => {
                log::info!("Switched to the {kind:?} backend");
            }
        }
    }

    /// (Internal) Recomputes the layout and propagates the new base resolution.
    fn resize(&mut self, window: Extent2D) {
        self.layout =
            ViewportLayout::compute(window, self.window.scale_factor(), self.config.menu_width);
        let base = self.layout.base_resolution();
        let echoed = self.panel.set_base_render_resolution(base);
        self.target.resize(self.layout.framebuffer_size());
        if let VolumeState::Loaded(volume) = &mut self.volume {
            volume.cpu.set_config(echoed);
            volume.gpu.set_render_size(base);
        }
        log::info!(
            "Window resized to {}x{}: viewport {} units, base resolution {}x{}",
            window.width,
            window.height,
            self.layout.viewport(),
            base.width,
            base.height
        );
    }

    /// (Internal) Starts or ends a selection drag. Presses outside the viewport are ignored.
    fn handle_selection_button(&mut self, pressed: bool, position: Vec2) {
        if !pressed {
            self.selector.release();
            return;
        }
        if !self.layout.contains(position) {
            log::trace!("Left press at {position:?} is outside the viewport");
            return;
        }
        let Some(gesture) = self.drag_gesture() else {
            return;
        };
        let local = self.layout.to_viewport(position);
        if let Some(rect) = self.selector.press(&self.camera, &gesture, local) {
            self.panel.set_selection_rect(rect);
        }
    }

    /// (Internal) Continues a selection drag and orbits the camera while the right button is held.
    fn handle_cursor_moved(&mut self, position: Vec2) {
        if self.selector.is_dragging() {
            if let Some(gesture) = self.drag_gesture() {
                let local = self.layout.to_viewport(position);
                if let Some(rect) = self.selector.drag(&self.camera, &gesture, local) {
                    self.panel.set_selection_rect(rect);
                }
            }
        }

        if let Some(anchor) = self.orbit_anchor.replace(position) {
            let delta = (position - anchor) / self.layout.viewport_size() * 2.0;
            // Screen Y grows downwards, NDC Y upwards.
            self.camera.drag(Vec2::new(delta.x, -delta.y));
        }
    }

    /// (Internal) The gesture geometry, or `None` when no volume is loaded.
    fn drag_gesture(&self) -> Option<DragGesture> {
        let dims = self.volume.dims()?;
        Some(DragGesture {
            viewport: self.layout.viewport_size(),
            volume_dims: dims.as_vec3(),
        })
    }

    /// (Internal) Renders with the CPU backend when the coordinator asks for it,
    /// then composites the last image with the wireframe.
    fn render_cpu_frame(&mut self, volume: &mut LoadedVolume, gesture: bool) {
        if let Some(plan) = self
            .coordinator
            .plan_cpu_frame(self.camera.view_matrix(), gesture)
        {
            let resolution = self.layout.base_resolution().divided_by(plan.scale);
            let echoed = self.panel.set_base_render_resolution(resolution);
            volume.cpu.set_config(echoed);

            let render_clock = Stopwatch::new();
            match volume.cpu.render(&self.camera) {
                Ok(()) => {
                    let elapsed = render_clock.elapsed();
                    self.last_render = elapsed;
                    self.coordinator.cpu_render_completed(plan, elapsed);
                    if let Err(e) = self.target.upload_image(volume.cpu.frame_buffer()) {
                        log::warn!("Uploading the CPU frame failed: {e}");
                    }
                }
                Err(e) => {
                    log::warn!("CPU render failed: {e}");
                    self.coordinator.cpu_render_failed(plan);
                }
            }
        }

        let view_projection = self.camera.view_projection();
        if let Err(e) = self.lane.composite_cpu_frame(
            &mut self.target,
            &self.layout,
            &view_projection,
            volume.dims.as_vec3(),
        ) {
            log::debug!("Composite drew no image: {e}");
        }
    }

    /// (Internal) Runs the due GPU upkeep, then lets the GPU backend render.
    fn render_gpu_frame(&mut self, volume: &mut LoadedVolume, gesture: bool) {
        self.lane.begin_gpu_frame(&mut self.target, &self.layout);

        for task in self.coordinator.plan_gpu_frame(gesture).tasks {
            let task_clock = Stopwatch::new();
            let outcome = match task {
                GpuTask::RebuildMesh => volume.gpu.update_gpu_mesh(true),
                GpuTask::ResizeBricks => volume.gpu.set_volume_bricks_size(),
                GpuTask::UpdateInterpolation => volume.gpu.update_interpolation(),
                GpuTask::UploadBricks => volume.gpu.update_volume_bricks(),
                GpuTask::RebuildOpacityMesh => volume.gpu.update_gpu_mesh(false),
            };
            log::debug!("GPU task {task:?} ran in {:?}", task_clock.elapsed());
            self.coordinator.gpu_task_completed(task, outcome);
        }

        let render_clock = Stopwatch::new();
        match volume.gpu.render(&self.camera, &mut self.target) {
            Ok(()) => self.last_render = render_clock.elapsed(),
            Err(e) => log::warn!("GPU render failed: {e}"),
        }

        self.lane.end_gpu_frame(&mut self.target);
    }
}

impl<W, P, C, T> Drop for Viewer<W, P, C, T>
where
    W: ViewerWindow,
    P: ConfigPanel,
    C: Camera,
    T: RasterTarget,
{
    fn drop(&mut self) {
        log::info!(
            "Viewer shutting down after {} frames (average frame {:?})",
            self.frames,
            self.timing.average()
        );
        if let VolumeState::Loaded(volume) = std::mem::take(&mut self.volume) {
            log::debug!("Released volume {:?}", volume.dims);
        }
    }
}
