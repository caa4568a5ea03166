use prism_models::{Entry, Message, Sender};

/// One rendered row of the transcript panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub label: &'static str,
    pub content: String,
    pub timestamp: String,
    pub is_pending: bool,
    pub is_user: bool,
}

impl ChatLine {
    pub fn from_entry(entry: &Entry, tick: u64) -> Self {
        match entry {
            Entry::Message(m) => Self::from_message(m),
            Entry::Pending(_) => Self {
                label: "bot",
                content: typing_dots(tick),
                timestamp: String::new(),
                is_pending: true,
                is_user: false,
            },
        }
    }

    pub fn from_message(m: &Message) -> Self {
        Self {
            label: match m.sender {
                Sender::User => "you",
                Sender::Bot => "bot",
            },
            content: m.text.clone(),
            timestamp: m.timestamp.format("%H:%M:%S").to_string(),
            is_pending: false,
            is_user: m.is_user(),
        }
    }
}

/// Animated typing indicator: `.`, `..`, `...`, then again.
pub fn typing_dots(tick: u64) -> String {
    ".".repeat(usize::try_from(tick % 3).unwrap_or(0) + 1)
}

pub trait AppController {
    fn update(&mut self, action: super::tui::Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_models::PendingId;

    #[test]
    fn dots_cycle() {
        assert_eq!(typing_dots(0), ".");
        assert_eq!(typing_dots(1), "..");
        assert_eq!(typing_dots(2), "...");
        assert_eq!(typing_dots(3), ".");
    }

    #[test]
    fn pending_entry_renders_as_bot_placeholder() {
        let line = ChatLine::from_entry(&Entry::Pending(PendingId::new()), 1);
        assert!(line.is_pending);
        assert_eq!(line.label, "bot");
        assert_eq!(line.content, "..");
    }

    #[test]
    fn message_entry_keeps_text() {
        let line = ChatLine::from_entry(&Entry::Message(Message::user("hello")), 0);
        assert!(line.is_user);
        assert_eq!(line.label, "you");
        assert_eq!(line.content, "hello");
        assert_eq!(line.timestamp.len(), 8);
    }
}
