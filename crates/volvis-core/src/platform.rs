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

//! Provides abstractions over the window and input subsystem.
//!
//! The window only reports raw facts (sizes, button states, cursor positions).
//! All interpretation of those facts belongs to the frame loop.

use crate::event::ViewerEvent;
use crate::math::{Extent2D, Vec2};

/// A backend-agnostic mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// A backend-agnostic keyboard key.
///
/// Only keys the viewer reacts to get a dedicated variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// The escape key. Ends the session.
    Escape,
    /// Any other key, identified by its physical key code name.
    Other(String),
}

/// A window the viewer draws into and receives input from.
pub trait ViewerWindow {
    /// Size of the window's inner area in DPI-independent window units.
    fn inner_size(&self) -> Extent2D;

    /// Ratio of framebuffer pixels to window units.
    fn scale_factor(&self) -> f32;

    /// Pumps pending platform input and forwards it as events.
    fn poll_events(&mut self, sink: &flume::Sender<ViewerEvent>);

    /// Returns `true` while `button` is held down.
    fn is_mouse_button_held(&self, button: MouseButton) -> bool;

    /// Current cursor position in window units, origin at the top-left.
    fn cursor_position(&self) -> Vec2;

    /// Returns `true` once the platform asked the window to close.
    fn should_close(&self) -> bool;

    /// Presents the composited frame.
    fn present(&mut self);
}
