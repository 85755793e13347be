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

//! # Volvis Control
//!
//! The adaptive half of the frame loop. Everything here is pure decision logic
//! with no rendering side effects:
//!
//! - [`FrameTimingAggregator`]: windowed mean of frame durations.
//! - [`ResolutionController`]: picks the render-resolution divisor that keeps the
//!   CPU backend near its frame budget while the user interacts.
//! - [`StaleFlags`] and [`RedrawCoordinator`]: decide each frame which expensive
//!   recomputations are due and on which backend.
//! - [`RaySelector`]: maps a pointer drag onto the volume's front face.

#![warn(missing_docs)]

pub mod coordinator;
pub mod dirty;
pub mod resolution;
pub mod selection;
pub mod timing;

pub use coordinator::{
    interaction_in_progress, CpuRenderPlan, GpuFramePlan, GpuTask, RedrawCoordinator,
};
pub use dirty::StaleFlags;
pub use resolution::ResolutionController;
pub use selection::{DragGesture, RaySelector};
pub use timing::FrameTimingAggregator;
