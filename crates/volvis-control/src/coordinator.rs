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

//! Per-frame redraw decisions.
//!
//! The [`RedrawCoordinator`] owns the [`StaleFlags`] and the
//! [`ResolutionController`]. Events are folded into the flags through
//! [`RedrawCoordinator::apply_event`]; each frame then asks for either a
//! [`CpuRenderPlan`] or a [`GpuFramePlan`] and reports back what actually
//! succeeded. Flags are only cleared on reported success.

use std::time::Duration;

use volvis_core::event::ViewerEvent;
use volvis_core::math::Mat4;
use volvis_core::MouseButton;

use crate::dirty::StaleFlags;
use crate::resolution::ResolutionController;

/// Whether the user is in the middle of a pointer gesture.
///
/// A held left or right button after a reduced-resolution frame means the
/// gesture is not over, so the owed native-resolution render is postponed and
/// expensive GPU rebuilds are deferred.
pub fn interaction_in_progress(is_held: impl Fn(MouseButton) -> bool) -> bool {
    is_held(MouseButton::Left) || is_held(MouseButton::Right)
}

/// The decision to render one CPU frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuRenderPlan {
    /// Integer divisor applied to both axes of the base render resolution.
    pub scale: u32,
    /// `true` when the render runs at native resolution.
    pub full_resolution: bool,
}

/// One unit of GPU upkeep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuTask {
    /// Rebuild the iso-surface mesh.
    RebuildMesh,
    /// Re-partition the volume into bricks of the configured size.
    ResizeBricks,
    /// Push the interpolation mode to the GPU samplers.
    UpdateInterpolation,
    /// Re-upload the volume bricks.
    UploadBricks,
    /// Rebuild the mesh from the opacity table.
    RebuildOpacityMesh,
}

impl GpuTask {
    /// All tasks, in execution order.
    pub const ALL: [GpuTask; 5] = [
        GpuTask::RebuildMesh,
        GpuTask::ResizeBricks,
        GpuTask::UpdateInterpolation,
        GpuTask::UploadBricks,
        GpuTask::RebuildOpacityMesh,
    ];

    /// The flag this task services.
    pub fn flag(self) -> StaleFlags {
        match self {
            GpuTask::RebuildMesh => StaleFlags::GPU_MESH_STALE,
            GpuTask::ResizeBricks => StaleFlags::GPU_BRICKS_STALE,
            GpuTask::UpdateInterpolation => StaleFlags::USER_INTERACTED,
            GpuTask::UploadBricks => StaleFlags::VOLUME_STALE,
            GpuTask::RebuildOpacityMesh => StaleFlags::OPACITY_TABLE_STALE,
        }
    }

    /// Whether the task waits until no pointer gesture is in progress.
    ///
    /// The opacity mesh rebuild is cheap and always runs.
    pub fn deferred_while_interacting(self) -> bool {
        !matches!(self, GpuTask::RebuildOpacityMesh)
    }
}

/// The GPU upkeep due this frame, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuFramePlan {
    /// Tasks to run before the backend renders.
    pub tasks: Vec<GpuTask>,
}

/// Owns every staleness bit and decides the work of each frame.
#[derive(Debug, Clone)]
pub struct RedrawCoordinator {
    flags: StaleFlags,
    previous_view: Mat4,
    resolution: ResolutionController,
}

impl RedrawCoordinator {
    /// Creates a coordinator in the startup state, targeting `target_frame_time` per CPU render.
    pub fn new(target_frame_time: Duration) -> Self {
        Self {
            flags: StaleFlags::INITIAL,
            previous_view: Mat4::IDENTITY,
            resolution: ResolutionController::new(target_frame_time),
        }
    }

    /// The current flags.
    pub fn flags(&self) -> StaleFlags {
        self.flags
    }

    /// The resolution controller.
    pub fn resolution(&self) -> &ResolutionController {
        &self.resolution
    }

    /// Folds an event into the flags.
    pub fn apply_event(&mut self, event: &ViewerEvent) {
        let raised = StaleFlags::raised_by(event);
        if !raised.is_empty() {
            log::trace!("Event {event:?} raised {raised:?}");
            self.flags |= raised;
        }
    }

    /// Raises flags directly, for state changes that do not come from an event.
    pub fn raise(&mut self, flags: StaleFlags) {
        self.flags |= flags;
    }

    /// Decides whether the CPU backend renders this frame, and at which divisor.
    ///
    /// 1. A view matrix different from last frame's raises `USER_INTERACTED`.
    /// 2. An owed native render during a gesture is turned back into an interactive one.
    /// 3. If either flag is set, one render is planned. `USER_INTERACTED` is cleared
    ///    and `PENDING_FULL_RESOLUTION` is armed iff the render is reduced.
    /// 4. Otherwise nothing is rendered and `None` is returned.
    pub fn plan_cpu_frame(
        &mut self,
        view_matrix: Mat4,
        gesture_active: bool,
    ) -> Option<CpuRenderPlan> {
        if view_matrix != self.previous_view {
            self.previous_view = view_matrix;
            self.flags |= StaleFlags::USER_INTERACTED;
        }

        if self.flags.contains(StaleFlags::PENDING_FULL_RESOLUTION) && gesture_active {
            self.flags |= StaleFlags::USER_INTERACTED;
        }

        if !self
            .flags
            .intersects(StaleFlags::USER_INTERACTED | StaleFlags::PENDING_FULL_RESOLUTION)
        {
            return None;
        }

        let interacting = self.flags.contains(StaleFlags::USER_INTERACTED);
        let scale = self.resolution.plan(interacting);
        let full_resolution = scale == 1;

        self.flags.remove(StaleFlags::USER_INTERACTED);
        self.flags.set(StaleFlags::PENDING_FULL_RESOLUTION, !full_resolution);

        log::debug!(
            "CPU render planned: scale 1/{scale} ({})",
            if interacting { "interactive" } else { "catch-up" }
        );
        Some(CpuRenderPlan {
            scale,
            full_resolution,
        })
    }

    /// Reports a completed CPU render.
    pub fn cpu_render_completed(&mut self, plan: CpuRenderPlan, duration: Duration) {
        self.resolution.record_render(plan.scale, duration);
        log::debug!("CPU render at 1/{} took {:?}", plan.scale, duration);
    }

    /// Reports a failed CPU render. A native-resolution render stays owed.
    pub fn cpu_render_failed(&mut self, plan: CpuRenderPlan) {
        log::warn!("CPU render at 1/{} failed; will retry", plan.scale);
        self.flags |= StaleFlags::PENDING_FULL_RESOLUTION;
    }

    /// Lists the GPU upkeep due this frame.
    pub fn plan_gpu_frame(&self, gesture_active: bool) -> GpuFramePlan {
        let tasks = GpuTask::ALL
            .into_iter()
            .filter(|task| self.flags.contains(task.flag()))
            .filter(|task| !(gesture_active && task.deferred_while_interacting()))
            .collect();
        GpuFramePlan { tasks }
    }

    /// Reports the outcome of a GPU task. Only success clears its flag.
    pub fn gpu_task_completed<E: std::fmt::Display>(
        &mut self,
        task: GpuTask,
        outcome: Result<(), E>,
    ) {
        match outcome {
            Ok(()) => {
                self.flags.remove(task.flag());
                log::debug!("GPU task {task:?} done");
            }
            Err(e) => log::warn!("GPU task {task:?} failed, flag kept for retry: {e}"),
        }
    }
}

impl Default for RedrawCoordinator {
    fn default() -> Self {
        Self::new(crate::resolution::DEFAULT_TARGET_FRAME_TIME)
    }
}
