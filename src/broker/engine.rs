//! Registry engine
//!
//! This module contains the in-memory registry responsible for:
//! - creating topics on first subscribe and dropping them when their last
//!   subscriber leaves
//! - routing publish and poll calls to the named topic
//! - cleaning up a subscriber across every topic it joined
//!
//! Usage notes:
//! - The API is synchronous and takes `&mut self` for every mutation. A host
//!   that shares a registry between tasks has to put it behind a lock (for
//!   example `Arc<Mutex<Registry>>`) and should not hold that lock across I/O.
//! - Registries are plain values; several can coexist in one process.

use std::collections::HashMap;

use tracing::debug;

use crate::broker::topic::{SubscriberId, Topic};
use crate::config::RegistrySettings;
use crate::utils::error::{PubSubError, Result};

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) topics: HashMap<String, Topic>,
    message_capacity: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose topics preallocate room for
    /// `message_capacity` messages each.
    pub fn with_capacity(message_capacity: usize) -> Self {
        Self {
            topics: HashMap::new(),
            message_capacity,
        }
    }

    pub fn from_settings(settings: &RegistrySettings) -> Self {
        Self::with_capacity(settings.message_capacity)
    }

    /// Subscribe `subscriber` to `topic`, creating the topic if needed.
    /// Subscribing twice keeps the existing subscription untouched.
    pub fn subscribe(&mut self, topic: &str, subscriber: impl Into<SubscriberId>) {
        let subscriber = subscriber.into();
        let capacity = self.message_capacity;

        let entry = self.topics.entry(topic.to_string()).or_insert_with(|| {
            debug!(topic, "creating topic");
            Topic::with_capacity(topic, capacity)
        });

        debug!(topic, subscriber = %subscriber, "subscribe");
        entry.subscribe(subscriber);
    }

    /// Unsubscribe `subscriber` from `topic`. Messages it had not read yet are
    /// released, and the topic is dropped once nobody is subscribed to it.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &str) {
        let Some(t) = self.topics.get_mut(topic) else {
            return;
        };
        if !t.unsubscribe(subscriber) {
            return;
        }

        debug!(topic, subscriber, "unsubscribe");
        if !t.has_subscribers() {
            self.topics.remove(topic);
            debug!(topic, "dropped topic without subscribers");
        }
    }

    /// Publish `payload` to every subscriber of `topic`. Topics nobody has
    /// subscribed to do not exist, so the payload is dropped.
    pub fn publish(&mut self, topic: &str, payload: impl Into<String>) {
        match self.topics.get_mut(topic) {
            Some(t) => {
                t.publish(payload);
                debug!(
                    topic,
                    subscribers = t.subscriber_count(),
                    retained = t.retained_messages(),
                    "publish"
                );
            }
            None => debug!(topic, "publish to unknown topic dropped"),
        }
    }

    /// Return every message published to `topic` since `subscriber` last
    /// polled, oldest first.
    pub fn poll(&mut self, topic: &str, subscriber: &str) -> Result<Vec<String>> {
        let unread = self
            .topics
            .get_mut(topic)
            .and_then(|t| t.poll(subscriber))
            .ok_or_else(|| PubSubError::subscription_not_found(topic, subscriber))?;

        debug!(topic, subscriber, count = unread.len(), "poll");
        Ok(unread)
    }

    /// Number of messages `subscriber` would receive from a poll right now.
    pub fn pending(&self, topic: &str, subscriber: &str) -> Result<usize> {
        self.topics
            .get(topic)
            .and_then(|t| t.pending(subscriber))
            .ok_or_else(|| PubSubError::subscription_not_found(topic, subscriber))
    }

    /// Unsubscribe `subscriber` from every topic. Returns how many
    /// subscriptions were removed.
    pub fn remove_subscriber(&mut self, subscriber: &str) -> usize {
        let mut removed = 0;
        self.topics.retain(|name, topic| {
            if topic.unsubscribe(subscriber) {
                removed += 1;
                debug!(topic = %name, subscriber, "unsubscribe");
            }
            topic.has_subscribers()
        });

        debug!(subscriber, removed, "removed subscriber");
        removed
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    pub fn topic(&self, topic: &str) -> Option<&Topic> {
        self.topics.get(topic)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Names of all live topics, sorted.
    pub fn topic_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.topics.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Topic::subscriber_count)
    }

    /// Messages `topic` still holds for at least one subscriber.
    pub fn retained_messages(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Topic::retained_messages)
    }
}
