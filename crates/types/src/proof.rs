//! Proof and witness vote types.

use crate::{BetId, ProofId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification status of a submitted proof.
///
/// A proof is mutated only by the quorum counter's outcome or by deadline
/// expiry, and is immutable once terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Collecting witness votes.
    Pending,
    /// Accept quorum reached.
    Verified,
    /// Reject quorum reached.
    Rejected,
    /// Deadline passed without a quorum.
    Expired,
}

impl VerificationStatus {
    /// Whether the proof can no longer change.
    pub fn is_terminal(self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Expired => "expired",
        };
        write!(f, "{s}")
    }
}

/// Photographic proof submitted for a bet, awaiting witness ratification.
///
/// At most one non-terminal proof exists per bet at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Unique id, allocated by the store.
    pub proof_id: ProofId,
    /// Bet this proof was submitted for.
    pub bet_id: BetId,
    /// Opaque reference to the proof artifact (e.g. a storage URL).
    pub artifact_ref: String,
    /// Member who submitted the proof. May not witness it.
    pub submitter: UserId,
    /// Accept quorum threshold, copied from the bet at submission time
    /// (an explicit override at submission is allowed).
    pub required_witnesses: u32,
    /// Votes are accepted until this instant. `None` means no expiry.
    pub verification_deadline: Option<Timestamp>,
    /// Current verification status.
    pub verification_status: VerificationStatus,
    /// When the proof was submitted.
    pub submitted_at: Timestamp,
}

/// One witness's ratification of a proof.
///
/// At most one vote per (proof, witness); a second vote from the same
/// witness is rejected, not overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Proof being voted on.
    pub proof_id: ProofId,
    /// Witness casting the vote.
    pub witness: UserId,
    /// Whether the witness accepts the proof.
    pub verified: bool,
    /// Optional free-form comment.
    pub comment: Option<String>,
    /// When the vote was cast.
    pub cast_at: Timestamp,
}

/// Outcome of a resolved witness quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumDecision {
    /// Accept votes reached the threshold.
    Accepted,
    /// Reject votes made the accept threshold unreachable.
    Rejected,
}
