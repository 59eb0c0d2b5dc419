//! Message definitions for the registry
//!
//! A `Message` is stored once per topic no matter how many subscribers still
//! have to read it. `live_readers` counts those subscribers; the topic drops
//! the message the moment the count reaches zero.

/// A published payload shared by every subscriber that has not read it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: String,
    live_readers: usize,
}

impl Message {
    /// Create a message that `live_readers` subscribers still have to read.
    pub fn new(payload: impl Into<String>, live_readers: usize) -> Self {
        Self {
            payload: payload.into(),
            live_readers,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }

    pub fn live_readers(&self) -> usize {
        self.live_readers
    }

    /// Record that one reader is done with the message. Returns `true` when
    /// no readers remain and the message can be reclaimed.
    pub fn release(&mut self) -> bool {
        debug_assert!(self.live_readers > 0, "message released more often than read");
        self.live_readers -= 1;
        self.live_readers == 0
    }
}
