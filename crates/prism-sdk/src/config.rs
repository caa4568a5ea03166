//! Client configuration.
//!
//! Locates the message backend.  The value is read from the environment
//! once at startup and can be overridden on the command line.

use reqwest::Url;

use crate::error::SdkError;

/// Default backend location (the development server's port).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Where the message backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api/chat` suffix.
    pub base_url: String,
}

impl ClientConfig {
    /// Configuration pointing at `base_url`.
    ///
    /// Trailing slashes are trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable            | Default                 | Description              |
    /// |---------------------|-------------------------|--------------------------|
    /// | `PRISM_BACKEND_URL` | `http://localhost:5000` | Base URL of the backend  |
    pub fn from_env() -> Self {
        let base_url = std::env::var("PRISM_BACKEND_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// Parse and check the base URL.
    ///
    /// Only `http` and `https` are accepted.
    pub fn validate(&self) -> Result<Url, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Config("backend URL is empty".into()));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| SdkError::Config(format!("invalid backend URL `{}`: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SdkError::Config(format!(
                "unsupported scheme `{other}` in backend URL"
            ))),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
