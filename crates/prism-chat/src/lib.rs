//! # PRISM Chat
//!
//! The chat widget controller: captures user text, submits it to the
//! message backend, renders the exchange and surfaces failures without
//! ever leaving the widget unusable.
//!
//! * [`ChatController`] — owns the display list, the input box and the
//!   single in-flight request.
//! * [`RequestPhase`] — per-request state machine.
//! * [`WidgetEvent`] — what subscribers are told after each mutation.

pub mod controller;
pub mod event;
pub mod phase;

pub use controller::{ChatController, OutgoingRequest, WidgetKey};
pub use event::WidgetEvent;
pub use phase::RequestPhase;
