//! Chat messages shown in the widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sender
// ---------------------------------------------------------------------------

/// Author of a [`Message`].
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    /// Text typed by the person using the widget.
    User,
    /// Reply produced by the message backend (or a fixed fallback / error text).
    Bot,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single line of the conversation.
///
/// Messages are ephemeral: they live in a [`Transcript`](crate::Transcript)
/// for the lifetime of the widget and are never persisted.
///
/// # Examples
///
/// ```
/// use prism_models::{Message, Sender};
///
/// let msg = Message::user("hello");
/// assert_eq!(msg.sender, Sender::User);
/// assert_eq!(msg.text, "hello");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    /// Text rendered in the bubble.
    pub text: String,
    /// Who wrote it.
    pub sender: Sender,
    /// When the message was appended to the display list.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Shorthand for a [`Sender::User`] message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Shorthand for a [`Sender::Bot`] message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// `true` if the message was typed by the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sender_display_lowercase() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }

    #[test]
    fn sender_parses_from_str() {
        assert_eq!(Sender::from_str("bot").unwrap(), Sender::Bot);
        assert!(Sender::from_str("admin").is_err());
    }

    #[test]
    fn sender_serde_lowercase() {
        let json = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json, "\"user\"");
    }

    #[test]
    fn constructors_set_sender() {
        assert!(Message::user("a").is_user());
        assert!(!Message::bot("b").is_user());
    }
}
