use chrono::Utc;
use tokio::sync::mpsc;

use super::{EventEnvelope, SearchEvent};

/// Fire-and-forget sink for search events.
pub trait EventBus: Send + Sync {
    /// Publish an event. Never blocks and never fails the caller.
    fn publish(&self, event: SearchEvent);
}

/// Event bus backed by a bounded channel.
///
/// This is cheaply cloneable and can be shared across tasks. When the channel
/// is full or closed the event is dropped and the error is logged.
#[derive(Clone)]
pub struct ChannelEventBus {
    tx: mpsc::Sender<EventEnvelope>,
}

impl ChannelEventBus {
    /// Create a new event bus from a channel sender
    pub fn new(tx: mpsc::Sender<EventEnvelope>) -> Self {
        Self { tx }
    }
}

impl EventBus for ChannelEventBus {
    fn publish(&self, event: SearchEvent) {
        let event_type = event.event_type();
        let envelope = EventEnvelope {
            timestamp: Utc::now(),
            event,
        };
        if let Err(e) = self.tx.try_send(envelope) {
            tracing::error!("Failed to publish {} event: {}", event_type, e);
        }
    }
}

/// Create an event bus and the receiving end of its channel.
pub fn create_event_channel(buffer_size: usize) -> (ChannelEventBus, mpsc::Receiver<EventEnvelope>) {
    let (tx, rx) = mpsc::channel(buffer_size);
    (ChannelEventBus::new(tx), rx)
}
