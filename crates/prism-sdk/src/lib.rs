//! # PRISM SDK
//!
//! Client for the **PRISM** chat message backend.
//!
//! The SDK provides:
//!
//! * [`ChatClient`] — sends one user message to `POST /api/chat` and
//!   decodes the reply.
//! * [`ApiRoutes`] — canonical endpoint paths.
//! * [`ClientConfig`] — backend location, read from the environment.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! Payload types from [`prism_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use prism_sdk::{ChatClient, ChatRequest, ClientConfig};
//!
//! # async fn run() -> Result<(), prism_sdk::SdkError> {
//! let client = ChatClient::new(&ClientConfig::new("http://localhost:5000"))?;
//! let reply = client.send(&ChatRequest::new("hello")).await?;
//! println!("{}", reply.display_text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod routes;

pub use client::ChatClient;
pub use config::ClientConfig;
pub use error::SdkError;
pub use routes::ApiRoutes;

// Re-export payloads from prism-models for ergonomic usage.
pub use prism_models::{ChatReply, ChatRequest};
