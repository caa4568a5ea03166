//! Request lifecycle.

use serde::{Deserialize, Serialize};

/// Where the controller stands in the current request cycle.
///
/// ```text
/// Idle → Submitted → AwaitingResponse → Rendered ─┐
///                                     └→ Failed ──┴→ Idle
/// ```
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default,
    strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum RequestPhase {
    /// Nothing in flight; submission allowed when the input is non-blank.
    #[default]
    Idle,
    /// User message appended, request not yet issued.
    Submitted,
    /// Request issued; the pending indicator is displayed.
    AwaitingResponse,
    /// Reply rendered as a bot message.
    Rendered,
    /// Failure rendered as the fixed error message.
    Failed,
}

impl RequestPhase {
    /// `true` while a request occupies the single slot.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Submitted | Self::AwaitingResponse)
    }
}
