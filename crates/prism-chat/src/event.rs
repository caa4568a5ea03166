//! Notifications published by the controller.

use prism_models::{Message, PendingId};

use crate::phase::RequestPhase;

/// A change a view should reflect.
///
/// Subscribers receive these in the order the controller applied them.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A message was appended; the view should scroll to the bottom.
    MessageAppended(Message),
    /// The pending indicator was displayed.
    PendingShown(PendingId),
    /// The pending indicator was removed.
    PendingCleared(PendingId),
    /// The input box was emptied.
    InputCleared,
    /// The send action became available (`true`) or unavailable (`false`).
    SendEnabledChanged(bool),
    /// The request cycle moved to a new phase.
    PhaseChanged(RequestPhase),
}
