//! Topic management
//!
//! A `Topic` owns its message sequence and one `Cursor` per subscriber.
//! Every message counts the subscribers that still have to read it:
//! subscribers present at publish time are counted whether they are caught
//! up or lagging, and each of them releases the message exactly once, either
//! when a poll walks past it or when they unsubscribe. The last release
//! removes the message from the sequence.
//!
//! Callers own the topic exclusively (`&mut self`); there is no internal
//! locking.

use std::collections::HashMap;

use crate::broker::cursor::Cursor;
use crate::broker::message::Message;
use crate::broker::sequence::{MessageId, MessageSequence};

pub type SubscriberId = String;

#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub(crate) messages: MessageSequence,
    pub(crate) subscribers: HashMap<SubscriberId, Cursor>,
}

impl Topic {
    /// Create a new topic with the given name.
    pub fn new(name: &str) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Create a topic whose sequence preallocates `capacity` message slots.
    pub fn with_capacity(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            messages: MessageSequence::with_capacity(capacity),
            subscribers: HashMap::new(),
        }
    }

    /// Add a subscriber with nothing unread. Duplicate adds are ignored and
    /// keep the existing cursor.
    pub fn subscribe(&mut self, id: SubscriberId) {
        self.subscribers.entry(id).or_default();
    }

    /// Remove a subscriber, releasing every message it had not read yet.
    /// Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: &str) -> bool {
        let Some(cursor) = self.subscribers.remove(id) else {
            return false;
        };
        if let Some(start) = cursor.target() {
            self.release_from(start, None);
        }
        true
    }

    pub fn is_subscribed(&self, id: &str) -> bool {
        self.subscribers.contains_key(id)
    }

    pub fn cursor(&self, id: &str) -> Option<Cursor> {
        self.subscribers.get(id).copied()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Number of messages still held for at least one subscriber.
    pub fn retained_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &MessageSequence {
        &self.messages
    }

    /// Append `payload` for every current subscriber. Caught-up cursors are
    /// pointed at the new message; lagging ones reach it on their next poll.
    ///
    /// Publishing to a topic without subscribers stores nothing.
    pub fn publish(&mut self, payload: impl Into<String>) {
        if self.subscribers.is_empty() {
            return;
        }

        let id = self
            .messages
            .push_back(Message::new(payload, self.subscribers.len()));

        for cursor in self.subscribers.values_mut() {
            if cursor.is_caught_up() {
                *cursor = Cursor::At(id);
            }
        }
    }

    /// Drain everything `id` has not read yet, oldest first. Returns `None`
    /// if `id` is not subscribed.
    pub fn poll(&mut self, id: &str) -> Option<Vec<String>> {
        let cursor = self.subscribers.get_mut(id)?;
        let Some(start) = cursor.target() else {
            return Some(Vec::new());
        };
        *cursor = Cursor::CaughtUp;

        let mut unread = Vec::new();
        self.release_from(start, Some(&mut unread));
        Some(unread)
    }

    /// Number of messages `id` has not read yet, without consuming them.
    pub fn pending(&self, id: &str) -> Option<usize> {
        let cursor = self.subscribers.get(id)?;
        Some(
            cursor
                .target()
                .map_or(0, |start| self.messages.iter_from(start).count()),
        )
    }

    /// Walk from `start` to the tail, releasing each message once. When `out`
    /// is given the payloads are collected into it; messages whose last
    /// reader this was are moved out of the sequence instead of cloned.
    fn release_from(&mut self, start: MessageId, mut out: Option<&mut Vec<String>>) {
        let mut current = Some(start);
        while let Some(id) = current {
            current = self.messages.next(id);
            let reclaimed = self.release(id);
            let Some(out) = out.as_deref_mut() else {
                continue;
            };
            match reclaimed {
                Some(message) => out.push(message.into_payload()),
                None => {
                    if let Some(message) = self.messages.get(id) {
                        out.push(message.payload().to_string());
                    }
                }
            }
        }
    }

    /// Drop one reader from the message at `id`, removing it from the
    /// sequence once nobody needs it. Returns the removed message.
    fn release(&mut self, id: MessageId) -> Option<Message> {
        let exhausted = self.messages.get_mut(id)?.release();
        if exhausted {
            self.messages.remove(id)
        } else {
            None
        }
    }
}
