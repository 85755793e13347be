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

//! # Volvis Core
//!
//! Foundational crate containing the math primitives, core types, and the
//! interface contracts of every collaborator the viewer's frame loop talks to:
//! the camera, the two rendering backends, the raster target, the window, and
//! the configuration panel.

#![warn(missing_docs)]

pub mod camera;
pub mod event;
pub mod math;
pub mod panel;
pub mod platform;
pub mod renderer;
pub mod utils;

pub use camera::Camera;
pub use event::{EventBus, ViewerEvent};
pub use panel::{ConfigPanel, FrameTimings, SelectionRect};
pub use platform::{Key, MouseButton, ViewerWindow};
pub use utils::timer::Stopwatch;
