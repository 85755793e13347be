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

//! Provides translation from a concrete windowing backend (`winit`) to the viewer's events.
//!
//! This module acts as an adapter layer, decoupling the frame loop from the
//! specific input event format of the `winit` crate. `winit` reports sizes and
//! positions in physical pixels; they are converted to window units here.
//!
//! The viewer's own loop runs on a [`ViewerWindow`](volvis_core::platform::ViewerWindow)
//! and never sees `winit` directly. An embedding application that owns a
//! `winit` event loop integrates here: keep one [`InputTracker`], pass every
//! `WindowEvent` to [`InputTracker::handle`], and send each result through the
//! viewer's `Viewer::sender` channel.

use std::collections::HashSet;

use volvis_core::event::ViewerEvent;
use volvis_core::math::{Extent2D, Vec2};
use volvis_core::platform::{Key, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keeps the state `winit` only reports as transitions: held buttons and the
/// last cursor position.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<MouseButton>,
    cursor: Vec2,
    close_requested: bool,
}

impl InputTracker {
    /// Creates a tracker with no button held and the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the tracked state and translates the event.
    ///
    /// `scale_factor` is the window's physical-pixels-per-unit ratio.
    pub fn handle(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<ViewerEvent> {
        let translated = translate_winit_event(event, scale_factor, self.cursor)?;
        self.observe(&translated);
        Some(translated)
    }

    /// Updates the tracked state from an already translated event.
    pub fn observe(&mut self, event: &ViewerEvent) {
        match event {
            ViewerEvent::CursorMoved(position) => self.cursor = *position,
            ViewerEvent::MouseButton {
                button, pressed, ..
            } => {
                if *pressed {
                    self.held.insert(*button);
                } else {
                    self.held.remove(button);
                }
            }
            ViewerEvent::CloseRequested => self.close_requested = true,
            _ => {}
        }
    }

    /// Returns `true` while `button` is held.
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// The last cursor position in window units.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Returns `true` once a close request was seen.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

/// Translates a `winit::event::WindowEvent` into a [`ViewerEvent`].
///
/// Mouse button events carry no position in `winit`; `cursor` (window units)
/// is attached instead. Key repeats and events the viewer does not react to
/// return `None`.
pub fn translate_winit_event(
    event: &WindowEvent,
    scale_factor: f64,
    cursor: Vec2,
) -> Option<ViewerEvent> {
    let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    match event {
        WindowEvent::Resized(size) => {
            let logical = size.to_logical::<f64>(scale);
            Some(ViewerEvent::WindowResized(Extent2D::new(
                logical.width.round() as u32,
                logical.height.round() as u32,
            )))
        }
        WindowEvent::CloseRequested => Some(ViewerEvent::CloseRequested),
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            if key_event.state != ElementState::Pressed || key_event.repeat {
                return None;
            }
            match key_event.physical_key {
                PhysicalKey::Code(keycode) => Some(ViewerEvent::KeyPressed(map_key(keycode))),
                PhysicalKey::Unidentified(_) => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f64>(scale);
            Some(ViewerEvent::CursorMoved(Vec2::new(
                logical.x as f32,
                logical.y as f32,
            )))
        }
        WindowEvent::MouseInput { state, button, .. } => Some(ViewerEvent::MouseButton {
            button: map_mouse_button(*button),
            pressed: *state == ElementState::Pressed,
            position: cursor,
        }),
        _ => None,
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit::keyboard::KeyCode` to the viewer's `Key`.
fn map_key(keycode: KeyCode) -> Key {
    match keycode {
        KeyCode::Escape => Key::Escape,
        other => Key::Other(format!("{other:?}")),
    }
}

/// (Internal) Maps a `winit::event::MouseButton` to the viewer's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}
