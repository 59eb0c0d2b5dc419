use crate::broker::sequence::MessageId;

/// Position of a subscriber within its topic's message sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Nothing unread. The next publish arms the cursor.
    #[default]
    CaughtUp,
    /// Oldest unread message; every later message is unread as well.
    At(MessageId),
}

impl Cursor {
    pub fn is_caught_up(&self) -> bool {
        matches!(self, Cursor::CaughtUp)
    }

    pub fn target(&self) -> Option<MessageId> {
        match self {
            Cursor::CaughtUp => None,
            Cursor::At(id) => Some(*id),
        }
    }
}
