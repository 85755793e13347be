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


//! A window with no platform behind it, fed from a script of events.
//!
//! Used by the demo binary and by tests that drive the frame loop.

use std::collections::VecDeque;

use volvis_core::event::ViewerEvent;
use volvis_core::math::{Extent2D, Vec2};
use volvis_core::platform::{MouseButton, ViewerWindow};

use super::input::InputTracker;

/// A scripted, invisible window.
///
/// Each call to [`ViewerWindow::poll_events`] delivers the next batch of the
/// script. Once the script is exhausted, polling delivers nothing.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    size: Extent2D,
    scale_factor: f32,
    script: VecDeque<Vec<ViewerEvent>>,
    input: InputTracker,
    presented: u64,
    frame_limit: Option<u64>,
}

impl HeadlessWindow {
    /// Creates a window of `size` window units.
    pub fn new(size: Extent2D, scale_factor: f32) -> Self {
        Self {
            size,
            scale_factor,
            script: VecDeque::new(),
            input: InputTracker::new(),
            presented: 0,
            frame_limit: None,
        }
    }

    /// Asks to close after `frames` presented frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Appends a batch of events delivered by one future poll.
    pub fn push_frame_events(&mut self, events: Vec<ViewerEvent>) {
        self.script.push_back(events);
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }
}

impl ViewerWindow for HeadlessWindow {
    fn inner_size(&self) -> Extent2D {
        self.size
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn poll_events(&mut self, sink: &flume::Sender<ViewerEvent>) {
        let Some(batch) = self.script.pop_front() else {
            return;
        };
        for event in batch {
            self.input.observe(&event);
            if let ViewerEvent::WindowResized(size) = event {
                self.size = size;
            }
            if sink.send(event).is_err() {
                log::warn!("Event sink disconnected, dropping scripted events");
                return;
            }
        }
    }

    fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.input.is_held(button)
    }

    fn cursor_position(&self) -> Vec2 {
        self.input.cursor()
    }

    fn should_close(&self) -> bool {
        self.input.close_requested()
            || self
                .frame_limit
                .is_some_and(|limit| self.presented >= limit)
    }

    fn present(&mut self) {
        self.presented += 1;
        log::trace!("Presented headless frame {}", self.presented);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_delivers_one_batch_per_call() {
        let mut window = HeadlessWindow::new(Extent2D::new(100, 100), 1.0);
        window.push_frame_events(vec![ViewerEvent::CursorMoved(Vec2::new(3.0, 4.0))]);
        window.push_frame_events(vec![ViewerEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
            position: Vec2::new(3.0, 4.0),
        }]);
        let (tx, rx) = flume::unbounded();

        window.poll_events(&tx);
        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(window.cursor_position(), Vec2::new(3.0, 4.0));
        assert!(!window.is_mouse_button_held(MouseButton::Left));

        window.poll_events(&tx);
        assert!(window.is_mouse_button_held(MouseButton::Left));

        window.poll_events(&tx);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_frame_limit_closes_window() {
        let mut window = HeadlessWindow::new(Extent2D::new(10, 10), 1.0).with_frame_limit(2);
        assert!(!window.should_close());
        window.present();
        window.present();
        assert!(window.should_close());
    }

    #[test]
    fn test_resize_event_updates_size() {
        let mut window = HeadlessWindow::new(Extent2D::new(10, 10), 1.0);
        window.push_frame_events(vec![ViewerEvent::WindowResized(Extent2D::new(40, 30))]);
        let (tx, _rx) = flume::unbounded();
        window.poll_events(&tx);
        assert_eq!(window.inner_size(), Extent2D::new(40, 30));
    }
}
