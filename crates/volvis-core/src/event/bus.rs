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

/// A generic event channel.
///
/// Producers hold a cloned [`flume::Sender`]; the owner of the bus drains it once
/// per frame with [`EventBus::drain`].
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel for a specific event type.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Sends an event, logging an error if the receiver is disconnected.
    ///
    /// ## Arguments
    /// * `event` - The event to be sent over the channel.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");

        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every pending event, in publish order, without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ViewerEvent;
    use crate::platform::Key;
    use flume::TryRecvError;

    #[test]
    fn test_drain_preserves_order() {
        let bus = EventBus::<ViewerEvent>::new();
        bus.publish(ViewerEvent::KeyPressed(Key::Escape));
        bus.sender()
            .send(ViewerEvent::CloseRequested)
            .expect("Send should succeed");

        assert_eq!(
            bus.drain(),
            vec![
                ViewerEvent::KeyPressed(Key::Escape),
                ViewerEvent::CloseRequested
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_try_receive_empty() {
        let bus = EventBus::<ViewerEvent>::new();
        assert!(matches!(bus.receiver().try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_multiple_producers() {
        let bus = EventBus::<u32>::new();
        let a = bus.sender();
        let b = bus.sender();
        a.send(1).unwrap();
        b.send(2).unwrap();
        bus.publish(3);
        assert_eq!(bus.drain(), vec![1, 2, 3]);
    }
}
