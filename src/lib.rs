//! # PollSub
//!
//! `pollsub` is an in-process publish/subscribe registry. Topics hold an
//! append-only stream of messages; subscribers register interest in a topic
//! and poll for everything they have not read yet, each at its own pace.
//!
//! Each message is stored once per topic and counts the subscribers that still
//! have to read it. A subscriber's cursor points at its oldest unread message,
//! so a poll is a walk from that cursor to the tail of the topic. Once the last
//! reader has walked past a message (or unsubscribed), the message is dropped.
//!
//! ```
//! use pollsub::Registry;
//!
//! let mut registry = Registry::new();
//! registry.subscribe("t0", "s0");
//! registry.publish("t0", "aaa");
//! registry.subscribe("t0", "s1");
//! registry.publish("t0", "bbb");
//!
//! assert_eq!(registry.poll("t0", "s0").unwrap(), vec!["aaa", "bbb"]);
//! assert_eq!(registry.poll("t0", "s1").unwrap(), vec!["bbb"]);
//! assert_eq!(registry.retained_messages("t0"), 0);
//! ```
//!
//! ## Core Modules
//!
//! - `broker`: the registry, topics, cursors and the per-topic message sequence.
//! - `config`: loading settings from defaults, an optional file and the environment.
//! - `shell`: a line-oriented command interpreter over a registry, used by the binary.
//! - `utils`: error types and logging setup.

pub mod broker;
pub mod config;
pub mod shell;
pub mod utils;

pub use broker::Registry;
pub use utils::error::{PubSubError, Result};
