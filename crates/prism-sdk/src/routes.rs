//! Canonical HTTP routes of the message backend.
//!
//! All paths are built from this module so that the client, the mock
//! backend and tests agree on them.
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/api/chat` | `POST` | Submit one user message, receive one reply |

/// Route builders for the message backend API.
pub struct ApiRoutes;

impl ApiRoutes {
    /// Path of the chat endpoint.
    pub const CHAT: &'static str = "/api/chat";

    /// Full URL of the chat endpoint under `base_url`.
    ///
    /// Trailing slashes on `base_url` are ignored.
    ///
    /// ```
    /// use prism_sdk::ApiRoutes;
    /// assert_eq!(ApiRoutes::chat("http://localhost:5000/"), "http://localhost:5000/api/chat");
    /// ```
    pub fn chat(base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), Self::CHAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_route_without_trailing_slash() {
        assert_eq!(
            ApiRoutes::chat("http://example.com"),
            "http://example.com/api/chat"
        );
    }

    #[test]
    fn chat_route_keeps_base_path() {
        assert_eq!(
            ApiRoutes::chat("https://example.com/prism//"),
            "https://example.com/prism/api/chat"
        );
    }
}
