//! Append-only display list.
//!
//! The [`Transcript`] is what the widget renders: an ordered list of
//! [`Entry`] values.  Messages are only ever appended.  The one exception is
//! the *pending indicator*, a transient placeholder shown while a reply is
//! awaited, which is removed again once the request resolves.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

// ---------------------------------------------------------------------------
// PendingId
// ---------------------------------------------------------------------------

/// Handle to a pending indicator placed in a [`Transcript`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingId(Uuid);

impl PendingId {
    /// Allocate a fresh, unique handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PendingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PendingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One row of the display list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Entry {
    /// A rendered chat message.
    Message(Message),
    /// The "typing" placeholder shown while awaiting the backend.
    Pending(PendingId),
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Ordered display list of the chat widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the bottom.
    pub fn push_message(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
    }

    /// Append a new pending indicator and return its handle.
    pub fn push_pending(&mut self) -> PendingId {
        let id = PendingId::new();
        self.entries.push(Entry::Pending(id));
        id
    }

    /// Remove the pending indicator `id`.
    ///
    /// Returns `false` when it was already gone; removing twice is harmless.
    pub fn remove_pending(&mut self, id: PendingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !matches!(e, Entry::Pending(p) if *p == id));
        self.entries.len() != before
    }

    /// `true` if the indicator `id` is currently displayed.
    pub fn contains_pending(&self, id: PendingId) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, Entry::Pending(p) if *p == id))
    }

    /// Number of pending indicators currently displayed.
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Pending(_)))
            .count()
    }

    /// All rows in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages only, in display order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Message(m) => Some(m),
            Entry::Pending(_) => None,
        })
    }

    /// The most recently appended message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }

    /// Total number of rows, pending indicators included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been displayed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn messages_keep_insertion_order() {
        let mut t = Transcript::new();
        t.push_message(Message::user("one"));
        t.push_message(Message::bot("two"));

        let texts: Vec<_> = t.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(t.last_message().unwrap().sender, Sender::Bot);
    }

    #[test]
    fn pending_indicator_round_trip() {
        let mut t = Transcript::new();
        t.push_message(Message::user("hi"));
        let id = t.push_pending();

        assert!(t.contains_pending(id));
        assert_eq!(t.pending_count(), 1);
        assert_eq!(t.len(), 2);

        assert!(t.remove_pending(id));
        assert_eq!(t.pending_count(), 0);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn removing_absent_pending_is_noop() {
        let mut t = Transcript::new();
        let id = t.push_pending();
        assert!(t.remove_pending(id));
        assert!(!t.remove_pending(id));
        assert!(!t.remove_pending(PendingId::new()));
        assert!(t.is_empty());
    }

    #[test]
    fn remove_pending_leaves_messages_untouched() {
        let mut t = Transcript::new();
        let id = t.push_pending();
        t.push_message(Message::bot("late"));
        t.remove_pending(id);

        assert_eq!(t.entries().len(), 1);
        assert!(matches!(&t.entries()[0], Entry::Message(m) if m.text == "late"));
    }

    #[test]
    fn pending_ids_are_unique() {
        let mut t = Transcript::new();
        let a = t.push_pending();
        let b = t.push_pending();
        assert_ne!(a, b);
        t.remove_pending(a);
        assert!(t.contains_pending(b));
    }
}
