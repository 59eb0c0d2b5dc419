//! The `error` module defines the error types used within `pollsub`.
//!
//! Registry operations only fail when a poll names a subscription that does
//! not exist; every other operation treats missing state as a no-op.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubSubError {
    #[error("subscription not found: '{subscriber}' on topic '{topic}'")]
    SubscriptionNotFound { topic: String, subscriber: String },
}

impl PubSubError {
    pub(crate) fn subscription_not_found(topic: &str, subscriber: &str) -> Self {
        PubSubError::SubscriptionNotFound {
            topic: topic.to_string(),
            subscriber: subscriber.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PubSubError>;
