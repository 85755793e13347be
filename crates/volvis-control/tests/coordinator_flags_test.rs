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

//! Flag independence and ordering across frames, driven only through events.

use std::time::Duration;

use volvis_control::{GpuTask, RedrawCoordinator, StaleFlags};
use volvis_core::event::ViewerEvent;
use volvis_core::math::{Extent2D, Mat4, Vec3};
use volvis_core::renderer::{GpuMeshConfig, GpuVolumeConfig, InterpolationMode, RenderConfig};

// ─── Helpers ────────────────────────────────────────────────────────

/// Runs every due GPU task successfully and returns what ran.
fn run_gpu_frame(coordinator: &mut RedrawCoordinator, gesture_active: bool) -> Vec<GpuTask> {
    let plan = coordinator.plan_gpu_frame(gesture_active);
    for task in &plan.tasks {
        coordinator.gpu_task_completed::<String>(*task, Ok(()));
    }
    plan.tasks
}

fn idle_gpu_coordinator() -> RedrawCoordinator {
    let mut coordinator = RedrawCoordinator::new(Duration::from_millis(16));
    run_gpu_frame(&mut coordinator, false);
    coordinator
}

// ─── GPU flag independence ──────────────────────────────────────────

#[test]
fn test_startup_runs_every_gpu_task_once() {
    let mut coordinator = RedrawCoordinator::new(Duration::from_millis(16));
    coordinator.raise(StaleFlags::USER_INTERACTED);
    assert_eq!(run_gpu_frame(&mut coordinator, false), GpuTask::ALL.to_vec());
    assert!(run_gpu_frame(&mut coordinator, false).is_empty());
}

#[test]
fn test_mesh_config_runs_only_mesh_rebuild() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::GpuMeshConfigChanged(GpuMeshConfig::default()));
    assert_eq!(run_gpu_frame(&mut coordinator, false), vec![GpuTask::RebuildMesh]);
}

#[test]
fn test_volume_config_runs_only_brick_resize() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::GpuVolumeConfigChanged(GpuVolumeConfig {
        brick_size: 64,
        brick_padding: 1,
    }));
    assert_eq!(run_gpu_frame(&mut coordinator, false), vec![GpuTask::ResizeBricks]);
}

#[test]
fn test_render_config_with_tf_runs_upload_and_opacity() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::RenderConfigChanged(RenderConfig {
        update_tf: true,
        ..RenderConfig::default()
    }));
    assert_eq!(
        run_gpu_frame(&mut coordinator, false),
        vec![
            GpuTask::UpdateInterpolation,
            GpuTask::UploadBricks,
            GpuTask::RebuildOpacityMesh
        ]
    );
}

#[test]
fn test_interpolation_change_runs_only_interpolation_update() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::InterpolationModeChanged(
        InterpolationMode::NearestNeighbour,
    ));
    assert_eq!(
        run_gpu_frame(&mut coordinator, false),
        vec![GpuTask::UpdateInterpolation]
    );
}

#[test]
fn test_gesture_defers_until_release() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::GpuMeshConfigChanged(GpuMeshConfig::default()));
    coordinator.apply_event(&ViewerEvent::RenderConfigChanged(RenderConfig {
        update_tf: true,
        ..RenderConfig::default()
    }));

    assert_eq!(
        run_gpu_frame(&mut coordinator, true),
        vec![GpuTask::RebuildOpacityMesh]
    );
    assert_eq!(
        run_gpu_frame(&mut coordinator, true),
        Vec::<GpuTask>::new()
    );
    assert_eq!(
        run_gpu_frame(&mut coordinator, false),
        vec![
            GpuTask::RebuildMesh,
            GpuTask::UpdateInterpolation,
            GpuTask::UploadBricks
        ]
    );
}

#[test]
fn test_failed_task_is_retried_next_frame() {
    let mut coordinator = idle_gpu_coordinator();
    coordinator.apply_event(&ViewerEvent::GpuVolumeConfigChanged(GpuVolumeConfig::default()));
    coordinator.gpu_task_completed(GpuTask::ResizeBricks, Err("device lost"));
    assert_eq!(
        coordinator.plan_gpu_frame(false).tasks,
        vec![GpuTask::ResizeBricks]
    );
}

// ─── CPU render scheduling ──────────────────────────────────────────

#[test]
fn test_resize_triggers_cpu_render() {
    let mut coordinator = RedrawCoordinator::new(Duration::from_millis(16));
    let plan = coordinator.plan_cpu_frame(Mat4::IDENTITY, false).unwrap();
    coordinator.cpu_render_completed(plan, Duration::from_millis(4));
    assert!(coordinator.plan_cpu_frame(Mat4::IDENTITY, false).is_none());

    coordinator.apply_event(&ViewerEvent::WindowResized(Extent2D::new(1024, 768)));
    assert!(coordinator.plan_cpu_frame(Mat4::IDENTITY, false).is_some());
}

#[test]
fn test_orbit_sequence_settles_after_one_catch_up() {
    let mut coordinator = RedrawCoordinator::new(Duration::from_millis(16));
    let plan = coordinator.plan_cpu_frame(Mat4::IDENTITY, false).unwrap();
    coordinator.cpu_render_completed(plan, Duration::from_millis(64));

    let mut scales = Vec::new();
    for step in 1..=3 {
        let view = Mat4::from_translation(Vec3::new(step as f32, 0.0, 0.0));
        let plan = coordinator.plan_cpu_frame(view, true).unwrap();
        scales.push(plan.scale);
        coordinator.cpu_render_completed(plan, Duration::from_millis(16));
    }
    // 64ms at native resolution against 16ms: sqrt(4) + 1 = 3.
    assert_eq!(scales[0], 3);
    assert!(scales.iter().all(|s| *s > 1));

    let last_view = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let catch_up = coordinator.plan_cpu_frame(last_view, false).unwrap();
    assert!(catch_up.full_resolution);
    assert!(coordinator.plan_cpu_frame(last_view, false).is_none());
}
