//! Notification intent types.
//!
//! The engine enumerates recipients and emits one intent per recipient on
//! specific transitions; delivery itself is an external collaborator and
//! is best-effort from the engine's perspective.

use crate::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened, from the recipient's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A proof was submitted and the recipient may witness it.
    WitnessRequired,
    /// A bet the recipient created reached its contribution target.
    BetAccepted,
    /// A proof the recipient has a stake in reached a quorum outcome.
    VerificationComplete,
    /// A bet the recipient has a stake in was settled.
    BetComplete,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::WitnessRequired => "WITNESS_REQUIRED",
            NotificationKind::BetAccepted => "BET_ACCEPTED",
            NotificationKind::VerificationComplete => "VERIFICATION_COMPLETE",
            NotificationKind::BetComplete => "BET_COMPLETE",
        };
        write!(f, "{s}")
    }
}

/// A single notification to be delivered to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub recipient: UserId,
    pub kind: NotificationKind,
    /// Human-readable message.
    pub message: String,
}
