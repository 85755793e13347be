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


//! Frame-level behaviour of the viewer, driven through a headless window,
//! the software raster target and recording backends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use volvis_control::StaleFlags;
use volvis_core::camera::Camera;
use volvis_core::event::ViewerEvent;
use volvis_core::math::{Extent2D, Extent3D, LinearRgba, Origin2D, Vec2, Vec3};
use volvis_core::panel::{ConfigPanel, FrameTimings, SelectionRect};
use volvis_core::platform::{Key, MouseButton};
use volvis_core::renderer::{
    BackendKind, CpuVolumeRenderer, FrameImage, GpuMeshConfig, GpuVolumeConfig,
    GpuVolumeRenderer, InterpolationMode, RasterTarget, RenderConfig, RenderError,
};
use volvis_infra::{HeadlessWindow, OrbitCamera, SoftwareRasterTarget};
use volvis_sdk::{LoadedVolume, Viewer, ViewerConfig, ViewerError};

type Journal = Rc<RefCell<Vec<String>>>;
type TestViewer = Viewer<HeadlessWindow, StubPanel, OrbitCamera, SoftwareRasterTarget>;

const MENU_WIDTH: u32 = 200;
const WINDOW: Extent2D = Extent2D::new(400, 200);
const DIMS: Extent3D = Extent3D::new(64, 64, 64);
const IMAGE_COLOR: LinearRgba = LinearRgba::new(0.0, 0.0, 1.0, 1.0);

// ─── Recording collaborators ────────────────────────────────────────────────

#[derive(Default)]
struct StubPanel {
    config: RenderConfig,
    backend: BackendKind,
    base_resolutions: Vec<Extent2D>,
    selections: Vec<SelectionRect>,
    loaded: Option<Extent3D>,
    draws: Vec<(Origin2D, Extent2D, FrameTimings)>,
    outbox: Vec<ViewerEvent>,
}

impl StubPanel {
    fn with_backend(backend: BackendKind) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }
}

impl ConfigPanel for StubPanel {
    fn render_config(&self) -> RenderConfig {
        self.config
    }

    fn mesh_config(&self) -> GpuMeshConfig {
        GpuMeshConfig::default()
    }

    fn volume_config(&self) -> GpuVolumeConfig {
        GpuVolumeConfig::default()
    }

    fn interpolation_mode(&self) -> InterpolationMode {
        InterpolationMode::Linear
    }

    fn active_backend(&self) -> BackendKind {
        self.backend
    }

    fn set_base_render_resolution(&mut self, resolution: Extent2D) -> RenderConfig {
        self.base_resolutions.push(resolution);
        self.config.render_resolution = resolution;
        self.config
    }

    fn set_selection_rect(&mut self, rect: SelectionRect) {
        self.selections.push(rect);
    }

    fn set_loaded_volume(&mut self, dims: Extent3D) {
        self.loaded = Some(dims);
    }

    fn draw(
        &mut self,
        origin: Origin2D,
        size: Extent2D,
        timings: FrameTimings,
        sink: &flume::Sender<ViewerEvent>,
    ) {
        self.draws.push((origin, size, timings));
        for event in self.outbox.drain(..) {
            sink.send(event).unwrap();
        }
    }
}

struct StubCpu {
    journal: Journal,
    failures: Rc<Cell<u32>>,
    config: RenderConfig,
    frame: FrameImage,
}

impl CpuVolumeRenderer for StubCpu {
    fn render(&mut self, _camera: &dyn Camera) -> Result<(), RenderError> {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            self.journal.borrow_mut().push("cpu.render_failed".into());
            return Err(RenderError::BackendFailure("scripted".into()));
        }
        let size = self.config.render_resolution;
        self.frame = FrameImage::new(size, IMAGE_COLOR);
        self.journal
            .borrow_mut()
            .push(format!("cpu.render {}x{}", size.width, size.height));
        Ok(())
    }

    fn frame_buffer(&self) -> &FrameImage {
        &self.frame
    }

    fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
        self.journal.borrow_mut().push("cpu.set_config".into());
    }

    fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.journal
            .borrow_mut()
            .push(format!("cpu.interpolation {mode:?}"));
    }
}

struct StubGpu {
    journal: Journal,
    failing_uploads: Rc<Cell<u32>>,
}

impl StubGpu {
    fn record(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl GpuVolumeRenderer for StubGpu {
    fn render(
        &mut self,
        _camera: &dyn Camera,
        _target: &mut dyn RasterTarget,
    ) -> Result<(), RenderError> {
        self.record("gpu.render");
        Ok(())
    }

    fn set_render_size(&mut self, size: Extent2D) {
        self.record(format!("gpu.render_size {}x{}", size.width, size.height));
    }

    fn set_mesh_config(&mut self, _config: GpuMeshConfig) {
        self.record("gpu.mesh_config");
    }

    fn set_render_config(&mut self, _config: RenderConfig) {
        self.record("gpu.render_config");
    }

    fn set_volume_config(&mut self, _config: GpuVolumeConfig) {
        self.record("gpu.volume_config");
    }

    fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.record(format!("gpu.interpolation {mode:?}"));
    }

    fn update_gpu_mesh(&mut self, use_isosurface_mode: bool) -> Result<(), RenderError> {
        self.record(format!("gpu.update_gpu_mesh({use_isosurface_mode})"));
        Ok(())
    }

    fn update_volume_bricks(&mut self) -> Result<(), RenderError> {
        self.record("gpu.update_volume_bricks");
        if self.failing_uploads.get() > 0 {
            self.failing_uploads.set(self.failing_uploads.get() - 1);
            return Err(RenderError::BackendFailure("scripted".into()));
        }
        Ok(())
    }

    fn set_volume_bricks_size(&mut self) -> Result<(), RenderError> {
        self.record("gpu.set_volume_bricks_size");
        Ok(())
    }

    fn update_interpolation(&mut self) -> Result<(), RenderError> {
        self.record("gpu.update_interpolation");
        Ok(())
    }
}

struct Harness {
    viewer: TestViewer,
    journal: Journal,
    cpu_failures: Rc<Cell<u32>>,
    failing_uploads: Rc<Cell<u32>>,
}

impl Harness {
    fn new(panel: StubPanel) -> Self {
        Self::with_camera(panel, OrbitCamera::new(Vec3::ZERO, 1.0))
    }

    fn with_camera(panel: StubPanel, camera: OrbitCamera) -> Self {
        let config = ViewerConfig {
            menu_width: MENU_WIDTH,
            initial_viewport: WINDOW.height,
            ..Default::default()
        };
        let viewer = Viewer::new(
            config,
            HeadlessWindow::new(WINDOW, 1.0),
            panel,
            camera,
            SoftwareRasterTarget::new(Extent2D::new(1, 1)),
        )
        .unwrap();
        Self {
            viewer,
            journal: Journal::default(),
            cpu_failures: Rc::new(Cell::new(0)),
            failing_uploads: Rc::new(Cell::new(0)),
        }
    }

    fn loaded(panel: StubPanel) -> Self {
        Self::loaded_with(panel, DIMS, OrbitCamera::new(Vec3::ZERO, 1.0))
    }

    fn loaded_with(panel: StubPanel, dims: Extent3D, camera: OrbitCamera) -> Self {
        let mut harness = Self::with_camera(panel, camera);
        let volume = LoadedVolume::new(
            dims,
            Box::new(StubCpu {
                journal: harness.journal.clone(),
                failures: harness.cpu_failures.clone(),
                config: RenderConfig::default(),
                frame: FrameImage::new(Extent2D::square(1), LinearRgba::TRANSPARENT),
            }),
            Box::new(StubGpu {
                journal: harness.journal.clone(),
                failing_uploads: harness.failing_uploads.clone(),
            }),
        );
        harness.viewer.load_volume(volume).unwrap();
        harness
    }

    fn script(&mut self, events: Vec<ViewerEvent>) {
        self.viewer.window_mut().push_frame_events(events);
    }

    fn take_journal(&self) -> Vec<String> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }

    fn cpu_renders(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("cpu.render "))
            .count()
    }
}

fn left(pressed: bool, x: f32, y: f32) -> ViewerEvent {
    ViewerEvent::MouseButton {
        button: MouseButton::Left,
        pressed,
        position: Vec2::new(x, y),
    }
}

fn right(pressed: bool, x: f32, y: f32) -> ViewerEvent {
    ViewerEvent::MouseButton {
        button: MouseButton::Right,
        pressed,
        position: Vec2::new(x, y),
    }
}

// ─── Startup and volume loading ─────────────────────────────────────────────

#[test]
fn test_new_viewer_pushes_base_resolution_and_sizes_target() {
    let harness = Harness::new(StubPanel::default());
    assert_eq!(
        harness.viewer.panel().base_resolutions,
        vec![Extent2D::square(200)]
    );
    assert_eq!(harness.viewer.target().size(), WINDOW);
    assert!(!harness.viewer.volume_state().is_loaded());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ViewerConfig {
        wireframe_margin: 2.0,
        ..Default::default()
    };
    let result = Viewer::new(
        config,
        HeadlessWindow::new(WINDOW, 1.0),
        StubPanel::default(),
        OrbitCamera::new(Vec3::ZERO, 1.0),
        SoftwareRasterTarget::new(Extent2D::new(1, 1)),
    );
    assert!(matches!(result, Err(ViewerError::Config(_))));
}

#[test]
fn test_frame_without_volume_clears_and_draws_panel() {
    let mut harness = Harness::new(StubPanel::default());
    assert!(harness.viewer.run_frame());

    let draws = &harness.viewer.panel().draws;
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].0, Origin2D::new(200, 0));
    assert_eq!(draws[0].1, Extent2D::new(200, 200));
    assert_eq!(
        harness.viewer.target().pixel(100, 100),
        Some(LinearRgba::TRANSPARENT)
    );
    assert_eq!(harness.viewer.window().presented_frames(), 1);
}

#[test]
fn test_load_volume_configures_backends_and_frames_camera() {
    let harness = Harness::loaded(StubPanel::default());
    let journal = harness.take_journal();
    assert!(journal.contains(&"cpu.set_config".to_string()));
    assert!(journal.contains(&"gpu.render_config".to_string()));
    assert!(journal.contains(&"gpu.render_size 200x200".to_string()));

    assert_eq!(harness.viewer.panel().loaded, Some(DIMS));
    assert!(harness.viewer.camera().rotation_enabled());
    let eye = harness.viewer.camera().eye();
    assert_relative_eq!(eye.x, 32.0, epsilon = 1e-4);
    assert_relative_eq!(eye.y, 32.0, epsilon = 1e-4);
    assert_relative_eq!(eye.z, 96.0, epsilon = 1e-4);

    let flags = harness.viewer.coordinator().flags();
    assert!(flags.contains(StaleFlags::INITIAL | StaleFlags::USER_INTERACTED));
}

#[test]
fn test_empty_volume_is_rejected() {
    let mut harness = Harness::new(StubPanel::default());
    let journal = Journal::default();
    let volume = LoadedVolume::new(
        Extent3D::new(16, 0, 16),
        Box::new(StubCpu {
            journal: journal.clone(),
            failures: Rc::new(Cell::new(0)),
            config: RenderConfig::default(),
            frame: FrameImage::new(Extent2D::square(1), LinearRgba::TRANSPARENT),
        }),
        Box::new(StubGpu {
            journal,
            failing_uploads: Rc::new(Cell::new(0)),
        }),
    );
    assert!(matches!(
        harness.viewer.load_volume(volume),
        Err(ViewerError::EmptyVolume(_))
    ));
    assert!(!harness.viewer.volume_state().is_loaded());
}

// ─── CPU path ───────────────────────────────────────────────────────────────

#[test]
fn test_cpu_renders_once_then_idles() {
    let mut harness = Harness::loaded(StubPanel::default());
    for _ in 0..3 {
        assert!(harness.viewer.run_frame());
    }
    assert_eq!(harness.cpu_renders(), 1);
    assert!(harness
        .journal
        .borrow()
        .contains(&"cpu.render 200x200".to_string()));

    let flags = harness.viewer.coordinator().flags();
    assert!(!flags.intersects(StaleFlags::USER_INTERACTED | StaleFlags::PENDING_FULL_RESOLUTION));
}

#[test]
fn test_cpu_image_is_composited_into_viewport() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.viewer.run_frame();

    let centre = harness.viewer.target().pixel(100, 100).unwrap();
    assert_relative_eq!(centre.b, 1.0, epsilon = 1e-4);
    assert_relative_eq!(centre.a, 1.0, epsilon = 1e-4);
    // The panel area is outside the viewport and stays cleared.
    assert_eq!(
        harness.viewer.target().pixel(300, 100),
        Some(LinearRgba::TRANSPARENT)
    );
}

#[test]
fn test_render_config_change_reaches_both_backends_and_rerenders() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.viewer.run_frame();
    harness.take_journal();

    let config = RenderConfig {
        step_size: 0.5,
        ..Default::default()
    };
    harness
        .viewer
        .sender()
        .send(ViewerEvent::RenderConfigChanged(config))
        .unwrap();
    harness.viewer.run_frame();

    let journal = harness.take_journal();
    assert!(journal.contains(&"gpu.render_config".to_string()));
    assert_eq!(
        journal
            .iter()
            .filter(|entry| entry.starts_with("cpu.render "))
            .count(),
        1
    );
}

#[test]
fn test_failed_cpu_render_keeps_native_render_owed() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.cpu_failures.set(1);

    harness.viewer.run_frame();
    assert!(harness
        .viewer
        .coordinator()
        .flags()
        .contains(StaleFlags::PENDING_FULL_RESOLUTION));
    assert_eq!(harness.cpu_renders(), 0);

    harness.viewer.run_frame();
    assert_eq!(harness.cpu_renders(), 1);
    assert!(!harness
        .viewer
        .coordinator()
        .flags()
        .contains(StaleFlags::PENDING_FULL_RESOLUTION));
}

#[test]
fn test_panel_edits_apply_on_next_frame() {
    let mut panel = StubPanel::default();
    panel
        .outbox
        .push(ViewerEvent::InterpolationModeChanged(InterpolationMode::Cubic));
    let mut harness = Harness::loaded(panel);

    harness.viewer.run_frame();
    assert!(!harness
        .journal
        .borrow()
        .contains(&"cpu.interpolation Cubic".to_string()));

    harness.viewer.run_frame();
    let journal = harness.journal.borrow();
    assert!(journal.contains(&"cpu.interpolation Cubic".to_string()));
    assert!(journal.contains(&"gpu.interpolation Cubic".to_string()));
    drop(journal);
    assert_eq!(harness.cpu_renders(), 2);
}

#[test]
fn test_right_drag_orbits_camera_and_rerenders() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.viewer.run_frame();
    let before = harness.viewer.camera().view_matrix();

    harness.script(vec![
        right(true, 100.0, 100.0),
        ViewerEvent::CursorMoved(Vec2::new(140.0, 100.0)),
    ]);
    harness.viewer.run_frame();

    assert_ne!(harness.viewer.camera().view_matrix(), before);
    assert_eq!(harness.cpu_renders(), 2);
}

// ─── GPU path ───────────────────────────────────────────────────────────────

fn gpu_tasks(journal: &[String]) -> Vec<&str> {
    journal
        .iter()
        .map(String::as_str)
        .filter(|entry| {
            entry.starts_with("gpu.update")
                || entry.starts_with("gpu.set_volume_bricks_size")
                || *entry == "gpu.render"
        })
        .collect()
}

#[test]
fn test_gpu_first_frame_runs_all_upkeep_in_order() {
    let mut harness = Harness::loaded(StubPanel::with_backend(BackendKind::Gpu));
    harness.take_journal();

    harness.viewer.run_frame();
    assert_eq!(
        gpu_tasks(&harness.take_journal()),
        vec![
            "gpu.update_gpu_mesh(true)",
            "gpu.set_volume_bricks_size",
            "gpu.update_interpolation",
            "gpu.update_volume_bricks",
            "gpu.update_gpu_mesh(false)",
            "gpu.render",
        ]
    );

    harness.viewer.run_frame();
    assert_eq!(gpu_tasks(&harness.take_journal()), vec!["gpu.render"]);
}

#[test]
fn test_gpu_upkeep_waits_for_gesture_to_end() {
    let mut harness = Harness::loaded(StubPanel::with_backend(BackendKind::Gpu));
    harness.take_journal();

    harness.script(vec![left(true, 5.0, 5.0)]);
    harness.viewer.run_frame();
    assert_eq!(
        gpu_tasks(&harness.take_journal()),
        vec!["gpu.update_gpu_mesh(false)", "gpu.render"]
    );
    assert!(harness
        .viewer
        .coordinator()
        .flags()
        .contains(StaleFlags::GPU_MESH_STALE));

    harness.script(vec![left(false, 5.0, 5.0)]);
    harness.viewer.run_frame();
    assert_eq!(
        gpu_tasks(&harness.take_journal()),
        vec![
            "gpu.update_gpu_mesh(true)",
            "gpu.set_volume_bricks_size",
            "gpu.update_interpolation",
            "gpu.update_volume_bricks",
            "gpu.render",
        ]
    );
}

#[test]
fn test_failed_gpu_task_is_retried_next_frame() {
    let mut harness = Harness::loaded(StubPanel::with_backend(BackendKind::Gpu));
    harness.failing_uploads.set(1);

    harness.viewer.run_frame();
    assert!(harness
        .viewer
        .coordinator()
        .flags()
        .contains(StaleFlags::VOLUME_STALE));
    harness.take_journal();

    harness.viewer.run_frame();
    assert_eq!(
        gpu_tasks(&harness.take_journal()),
        vec!["gpu.update_volume_bricks", "gpu.render"]
    );
    assert!(!harness
        .viewer
        .coordinator()
        .flags()
        .contains(StaleFlags::VOLUME_STALE));
}

#[test]
fn test_volume_config_change_refreshes_bricks_before_repartition() {
    let mut harness = Harness::loaded(StubPanel::with_backend(BackendKind::Gpu));
    harness.viewer.run_frame();
    harness.take_journal();

    harness.script(vec![ViewerEvent::GpuVolumeConfigChanged(GpuVolumeConfig {
        brick_size: 16,
        brick_padding: 1,
    })]);
    harness.viewer.run_frame();
    assert_eq!(
        harness.take_journal(),
        vec![
            "gpu.volume_config",
            "gpu.update_volume_bricks",
            "gpu.set_volume_bricks_size",
            "gpu.render",
        ]
    );
}

// ─── Layout, session end and timing ─────────────────────────────────────────

#[test]
fn test_resize_relayouts_and_propagates_base_resolution() {
    let mut harness = Harness::loaded(StubPanel::with_backend(BackendKind::Gpu));
    harness.take_journal();

    harness.script(vec![ViewerEvent::WindowResized(Extent2D::new(600, 300))]);
    harness.viewer.run_frame();

    assert_eq!(harness.viewer.layout().viewport(), 300);
    assert_eq!(harness.viewer.target().size(), Extent2D::new(600, 300));
    assert_eq!(
        harness.viewer.panel().base_resolutions.last(),
        Some(&Extent2D::square(300))
    );
    assert!(harness
        .take_journal()
        .contains(&"gpu.render_size 300x300".to_string()));

    let (origin, size, _) = *harness.viewer.panel().draws.last().unwrap();
    assert_eq!(origin, Origin2D::new(400, 0));
    assert_eq!(size, Extent2D::new(200, 300));
}

#[test]
fn test_escape_ends_session_after_current_frame() {
    let mut harness = Harness::new(StubPanel::default());
    harness.script(vec![ViewerEvent::KeyPressed(Key::Escape)]);

    assert!(!harness.viewer.run_frame());
    assert!(!harness.viewer.is_running());
    assert_eq!(harness.viewer.panel().draws.len(), 1);
    assert_eq!(harness.viewer.window().presented_frames(), 1);
}

#[test]
fn test_run_stops_when_window_closes() {
    let mut harness = Harness::new(StubPanel::default());
    harness.script(vec![]);
    harness.script(vec![]);
    harness.script(vec![ViewerEvent::CloseRequested]);
    assert_eq!(harness.viewer.run(), 3);
}

#[test]
fn test_panel_receives_average_after_full_window() {
    let mut harness = Harness::new(StubPanel::default());
    for _ in 0..10 {
        harness.viewer.run_frame();
    }
    assert_eq!(harness.viewer.timing().completed_windows(), 1);

    // The frame that completes the window already shows the new average.
    let draws = &harness.viewer.panel().draws;
    assert_eq!(draws.len(), 10);
    assert_eq!(draws[9].2.average_frame, harness.viewer.timing().average());
    assert_eq!(draws[8].2.average_frame, Duration::ZERO);
    assert_eq!(draws[0].2.average_frame, Duration::ZERO);
}

// ─── Selection ──────────────────────────────────────────────────────────────

#[test]
fn test_press_at_viewport_centre_selects_face_centre() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.script(vec![left(true, 100.0, 100.0)]);
    harness.viewer.run_frame();

    let selections = &harness.viewer.panel().selections;
    assert_eq!(selections.len(), 1);
    let rect = selections[0];
    assert_relative_eq!(rect.x0, 0.5, epsilon = 1e-3);
    assert_relative_eq!(rect.y0, 0.5, epsilon = 1e-3);
    assert_relative_eq!(rect.x1, 0.5, epsilon = 1e-3);
    assert_relative_eq!(rect.y1, 0.5, epsilon = 1e-3);
}

#[test]
fn test_drag_extends_rectangle_until_release() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.script(vec![
        left(true, 100.0, 100.0),
        ViewerEvent::CursorMoved(Vec2::new(120.0, 100.0)),
    ]);
    harness.viewer.run_frame();

    let selections = harness.viewer.panel().selections.clone();
    assert_eq!(selections.len(), 2);
    let dragged = selections[1];
    assert_relative_eq!(dragged.x0, 0.5, epsilon = 1e-3);
    assert!(dragged.x1 > 0.55 && dragged.x1 < 1.0, "x1 = {}", dragged.x1);
    assert_relative_eq!(dragged.y1, 0.5, epsilon = 1e-3);

    harness.script(vec![
        left(false, 120.0, 100.0),
        ViewerEvent::CursorMoved(Vec2::new(130.0, 100.0)),
    ]);
    harness.viewer.run_frame();
    assert_eq!(harness.viewer.panel().selections.len(), 2);
    assert_eq!(harness.viewer.selection(), Some(dragged));
}

#[test]
fn test_press_missing_the_face_pushes_nothing() {
    let mut harness = Harness::loaded(StubPanel::default());
    harness.script(vec![left(true, 0.0, 0.0)]);
    harness.viewer.run_frame();
    assert!(harness.viewer.panel().selections.is_empty());
    assert_eq!(harness.viewer.selection(), None);
}

#[test]
fn test_selection_is_ignored_without_volume() {
    let mut harness = Harness::new(StubPanel::default());
    harness.script(vec![left(true, 100.0, 100.0)]);
    assert!(harness.viewer.run_frame());
    assert!(harness.viewer.panel().selections.is_empty());
}

#[test]
fn test_press_over_panel_does_not_start_selection() {
    // A flat, wide volume whose front face still projects under the panel.
    let dims = Extent3D::new(256, 256, 2);
    let mut harness =
        Harness::loaded_with(StubPanel::default(), dims, OrbitCamera::new(Vec3::ZERO, 1.0));
    harness.script(vec![
        left(true, 215.0, 100.0),
        ViewerEvent::CursorMoved(Vec2::new(150.0, 100.0)),
    ]);
    harness.viewer.run_frame();
    assert!(harness.viewer.panel().selections.is_empty());
    assert_eq!(harness.viewer.selection(), None);

    harness.script(vec![left(false, 150.0, 100.0), left(true, 195.0, 100.0)]);
    harness.viewer.run_frame();
    assert_eq!(harness.viewer.panel().selections.len(), 1);
}

#[test]
fn test_orbit_camera_selection_mirrors_x_and_keeps_row_order() {
    let camera = OrbitCamera::new(Vec3::ZERO, 1.0).with_up(Vec3::new(0.0, -1.0, 0.0));
    let mut harness = Harness::loaded_with(StubPanel::default(), DIMS, camera);
    harness.script(vec![
        left(true, 50.0, 50.0),
        ViewerEvent::CursorMoved(Vec2::new(150.0, 150.0)),
    ]);
    harness.viewer.run_frame();

    let selections = harness.viewer.panel().selections.clone();
    assert_eq!(selections.len(), 2);
    let rect = selections[1];
    // Upper-left of the viewport lands near the (1, 0) corner of the face.
    assert_relative_eq!(rect.x0, 0.8107, epsilon = 2e-3);
    assert_relative_eq!(rect.y0, 0.1893, epsilon = 2e-3);
    assert_relative_eq!(rect.x1, 0.1893, epsilon = 2e-3);
    assert_relative_eq!(rect.y1, 0.8107, epsilon = 2e-3);
    assert!(rect.x0 > rect.x1);
    assert!(rect.y0 < rect.y1);
}
