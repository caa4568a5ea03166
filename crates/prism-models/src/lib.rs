#![deny(missing_docs)]

//! # PRISM Models
//!
//! Core data types for the PRISM chat widget.
//!
//! ## Display list
//!
//! ```text
//! Transcript
//! ├── Entry::Message(Message)   user / bot line, append-only
//! └── Entry::Pending(PendingId) transient "typing" placeholder
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | `Message` and its `Sender` |
//! | [`transcript`] | Append-only display list and the pending indicator |
//! | [`input`] | Input box state and send enablement |
//! | [`payload`] | `/api/chat` request / reply bodies and fixed reply strings |

pub mod input;
pub mod message;
pub mod payload;
pub mod transcript;

// Re-export all public types at crate root for convenience.
pub use input::*;
pub use message::*;
pub use payload::*;
pub use transcript::*;
