//! Input box state.

/// Text currently typed in the widget's input box.
///
/// Send enablement is derived, never stored: the send action is available
/// iff the trimmed text is non-empty.
///
/// # Examples
///
/// ```
/// use prism_models::InputState;
///
/// let mut input = InputState::default();
/// input.set("   ");
/// assert!(!input.is_send_enabled());
/// input.set(" hi ");
/// assert_eq!(input.trimmed(), "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    current_text: String,
}

impl InputState {
    /// Replace the whole text.
    pub fn set(&mut self, text: impl Into<String>) {
        self.current_text = text.into();
    }

    /// Append one typed character.
    pub fn push(&mut self, c: char) {
        self.current_text.push(c);
    }

    /// Delete the last character, if any.
    pub fn pop(&mut self) {
        self.current_text.pop();
    }

    /// Empty the input box.
    pub fn clear(&mut self) {
        self.current_text.clear();
    }

    /// Raw text as typed.
    pub fn text(&self) -> &str {
        &self.current_text
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.current_text.trim()
    }

    /// `true` iff the trimmed text is non-empty.
    pub fn is_send_enabled(&self) -> bool {
        !self.trimmed().is_empty()
    }
}
