//! Per-topic message sequence
//!
//! Messages live in a `Slab` arena and are chained oldest-first through
//! `prev`/`next` links, so appending, following a successor and removing an
//! arbitrary element are all O(1). Callers address elements through
//! `MessageId` handles; an id stays valid until its element is removed.

use slab::Slab;

use crate::broker::message::Message;

/// Stable handle to an element of a `MessageSequence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(usize);

#[derive(Debug)]
struct Node {
    message: Message,
    prev: Option<MessageId>,
    next: Option<MessageId>,
}

#[derive(Debug, Default)]
pub struct MessageSequence {
    nodes: Slab<Node>,
    head: Option<MessageId>,
    tail: Option<MessageId>,
}

impl MessageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence with room for `capacity` messages before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn front(&self) -> Option<MessageId> {
        self.head
    }

    pub fn back(&self) -> Option<MessageId> {
        self.tail
    }

    /// Append `message` after the current tail and return its id.
    pub fn push_back(&mut self, message: Message) -> MessageId {
        let id = MessageId(self.nodes.insert(Node {
            message,
            prev: self.tail,
            next: None,
        }));

        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.nodes.get(id.0).map(|node| &node.message)
    }

    pub fn get_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.nodes.get_mut(id.0).map(|node| &mut node.message)
    }

    /// The element published right after `id`, if any.
    pub fn next(&self, id: MessageId) -> Option<MessageId> {
        self.nodes.get(id.0).and_then(|node| node.next)
    }

    /// The element published right before `id`, if any.
    pub fn prev(&self, id: MessageId) -> Option<MessageId> {
        self.nodes.get(id.0).and_then(|node| node.prev)
    }

    /// Unlink `id` from the sequence and hand back its message. Neighbouring
    /// elements are relinked; no other element moves.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let node = self.nodes.try_remove(id.0)?;

        match node.prev {
            Some(prev) => self.nodes[prev.0].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next.0].prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node.message)
    }

    /// Iterate from the oldest message to the newest.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            sequence: self,
            cursor: self.head,
        }
    }

    /// Iterate from `id` (inclusive) to the newest message.
    pub fn iter_from(&self, id: MessageId) -> Iter<'_> {
        Iter {
            sequence: self,
            cursor: self.nodes.contains(id.0).then_some(id),
        }
    }
}

pub struct Iter<'a> {
    sequence: &'a MessageSequence,
    cursor: Option<MessageId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (MessageId, &'a Message);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.sequence.nodes.get(id.0)?;
        self.cursor = node.next;
        Some((id, &node.message))
    }
}
