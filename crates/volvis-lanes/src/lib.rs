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

//! # Volvis Lanes
//!
//! Hot-path pipelines run every frame: the compositing lane that merges the
//! active backend's output with the volume's bounding wireframe, and the
//! viewport layout it draws into.

#![warn(missing_docs)]

pub mod composite_lane;
pub mod viewport;

pub use composite_lane::{CompositeLane, CompositorSettings, WireframeBox};
pub use viewport::ViewportLayout;
