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


// Volvis Runtime
// Headless viewer session: a synthetic volume, a scripted orbit and a
// selection drag, rendered with the software raster target.

mod panel;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use volvis_infra::{
    HeadlessWindow, OrbitCamera, ProxyMeshRenderer, RayMarchRenderer, SoftwareRasterTarget,
    SyntheticVolume,
};
use volvis_sdk::prelude::*;

use crate::panel::DemoPanel;

/// Frames spent orbiting before the selection drag starts.
const ORBIT_FRAMES: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Backend {
    Cpu,
    Gpu,
}

impl From<Backend> for BackendKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Cpu => BackendKind::Cpu,
            Backend::Gpu => BackendKind::Gpu,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Run a headless volume viewer session")]
struct Arguments {
    /// JSON viewer configuration. Defaults are used when the file is missing.
    #[arg(long, short = 'c', value_parser)]
    config: Option<PathBuf>,
    /// Number of frames to run.
    #[arg(long, short = 'f', default_value_t = 120)]
    frames: u64,
    /// Backend rendering the volume.
    #[arg(long, value_enum, default_value = "cpu")]
    backend: Backend,
    /// Edge length of the synthetic volume, in voxels.
    #[arg(long, default_value_t = 64)]
    volume_size: u32,
    /// Window scale factor (framebuffer pixels per window unit).
    #[arg(long, default_value_t = 1.0)]
    scale_factor: f32,
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    if !path.exists() {
        log::warn!(
            "Config file {} not found, using defaults",
            path.display()
        );
        return Ok(ViewerConfig::default());
    }
    let config = ViewerConfig::from_file(path)
        .with_context(|| format!("loading viewer config from {}", path.display()))?;
    log::info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Queues the demo gestures: a right-button orbit, then a left-button
/// selection drag across the viewport centre.
fn script_session(window: &mut HeadlessWindow, viewport: f32) {
    let centre = Vec2::new(viewport / 2.0, viewport / 2.0);
    let mouse = |button, pressed, position| ViewerEvent::MouseButton {
        button,
        pressed,
        position,
    };

    window.push_frame_events(vec![mouse(MouseButton::Right, true, centre)]);
    for step in 1..=ORBIT_FRAMES {
        let offset = Vec2::new(step as f32 * viewport / 96.0, 0.0);
        window.push_frame_events(vec![ViewerEvent::CursorMoved(centre + offset)]);
    }
    let orbit_end = centre + Vec2::new(ORBIT_FRAMES as f32 * viewport / 96.0, 0.0);
    window.push_frame_events(vec![mouse(MouseButton::Right, false, orbit_end)]);

    // Let the owed native-resolution render happen before selecting.
    window.push_frame_events(vec![]);
    window.push_frame_events(vec![
        ViewerEvent::CursorMoved(centre),
        mouse(MouseButton::Left, true, centre),
    ]);
    let corner = centre + Vec2::new(viewport / 8.0, viewport / 8.0);
    window.push_frame_events(vec![ViewerEvent::CursorMoved(corner)]);
    window.push_frame_events(vec![mouse(MouseButton::Left, false, corner)]);
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Arguments::parse();

    let config = load_config(args.config.as_ref())?;
    let backend = BackendKind::from(args.backend);

    let mut window = HeadlessWindow::new(config.initial_window_size(), args.scale_factor)
        .with_frame_limit(args.frames);
    script_session(&mut window, config.initial_viewport as f32);

    let mut viewer = Viewer::new(
        config,
        window,
        DemoPanel::new(backend),
        // Viewport-down maps to world +Y, so selections follow the face's row order.
        OrbitCamera::new(Vec3::ZERO, 1.0).with_up(Vec3::new(0.0, -1.0, 0.0)),
        SoftwareRasterTarget::new(Extent2D::new(1, 1)),
    )
    .context("creating the viewer")?;

    let dims = Extent3D::new(args.volume_size, args.volume_size, args.volume_size);
    let volume = Arc::new(SyntheticVolume::sphere(dims));
    viewer
        .load_volume(LoadedVolume::new(
            dims,
            Box::new(RayMarchRenderer::new(volume)),
            Box::new(ProxyMeshRenderer::new(dims)),
        ))
        .context("loading the synthetic volume")?;

    // Exercise the configuration path once the first frame is on screen.
    viewer
        .panel_mut()
        .edit(ViewerEvent::InterpolationModeChanged(InterpolationMode::NearestNeighbour));

    let frames = viewer.run();
    log::info!(
        "Session finished after {frames} frames: average frame {:?}, last render {:?}",
        viewer.timing().average(),
        viewer.last_render()
    );
    match viewer.panel().selection() {
        Some(rect) => log::info!(
            "Final selection: ({:.3}, {:.3}) to ({:.3}, {:.3})",
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y1
        ),
        None => log::info!("No selection was made"),
    }
    Ok(())
}
