//! Append-only transcript with change notifications.
//!
//! Observers subscribe through a `tokio::sync::broadcast` channel and are
//! told about single insertions and full resets. Publishing with no
//! subscribers is a no-op.

use ragdesk_types::message::{Message, Origin};
use tokio::sync::broadcast;

/// Default capacity of the notification channel.
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Change notification emitted by the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// One message was appended at `index` (always `len - 1`).
    Inserted { index: usize },
    /// The transcript was emptied.
    Reset,
}

/// Ordered sequence of messages for the current session.
///
/// Messages are never reordered, updated in place or deduplicated.
pub struct TranscriptStore {
    messages: Vec<Message>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a store whose notification channel buffers `capacity` events
    /// per lagging subscriber.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            messages: Vec::new(),
            events,
        }
    }

    /// Append a message at the end and notify observers.
    pub fn append(&mut self, text: impl Into<String>, origin: Origin) -> Message {
        let message = Message::new(text, origin);
        self.messages.push(message.clone());
        let _ = self.events.send(TranscriptEvent::Inserted {
            index: self.messages.len() - 1,
        });
        message
    }

    /// Remove every message and notify observers of the reset.
    pub fn clear(&mut self) {
        self.messages.clear();
        let _ = self.events.send(TranscriptEvent::Reset);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Receive all future change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.events.subscribe()
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranscriptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptStore")
            .field("len", &self.messages.len())
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_call_order() {
        let mut store = TranscriptStore::new();
        let texts = ["one", "two", "three", "two", "one"];
        for (i, text) in texts.iter().enumerate() {
            let origin = if i % 2 == 0 { Origin::User } else { Origin::Agent };
            store.append(*text, origin);
        }

        assert_eq!(store.len(), texts.len());
        let stored: Vec<&str> = store.messages().iter().map(|m| m.text()).collect();
        assert_eq!(stored, texts);
        assert_eq!(store.get(1).unwrap().origin(), Origin::Agent);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut store = TranscriptStore::new();
        store.append("same", Origin::User);
        store.append("same", Origin::User);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn append_notifies_insert_at_last_index() {
        let mut store = TranscriptStore::new();
        let mut rx = store.subscribe();

        store.append("a", Origin::User);
        store.append("b", Origin::Agent);

        assert_eq!(rx.recv().await.unwrap(), TranscriptEvent::Inserted { index: 0 });
        assert_eq!(rx.recv().await.unwrap(), TranscriptEvent::Inserted { index: 1 });
    }

    #[tokio::test]
    async fn clear_empties_and_notifies_reset() {
        let mut store = TranscriptStore::new();
        store.append("a", Origin::User);
        let mut rx = store.subscribe();

        store.clear();

        assert!(store.is_empty());
        assert!(store.last().is_none());
        assert_eq!(rx.recv().await.unwrap(), TranscriptEvent::Reset);
    }

    #[test]
    fn append_without_subscribers_does_not_panic() {
        let mut store = TranscriptStore::new();
        for i in 0..1000 {
            store.append(format!("msg {i}"), Origin::User);
        }
        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn debug_impl() {
        let store = TranscriptStore::new();
        let _rx = store.subscribe();
        let debug = format!("{store:?}");
        assert!(debug.contains("TranscriptStore"));
        assert!(debug.contains("subscribers: 1"));
    }
}
