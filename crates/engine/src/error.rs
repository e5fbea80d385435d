//! Engine errors.
//!
//! Every failure is a local precondition or state-conflict violation
//! returned synchronously to the caller; nothing here is transient and
//! nothing is retried by the engine. The surrounding service layer maps
//! these to user-facing responses.

use std::fmt;
use thiserror::Error;
use wager_types::{BetId, BetSide, BetStatus, BetType, ProofId, UserId, VerificationStatus};

/// Events that drive the bet state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetEvent {
    /// A proof was submitted for the bet.
    ProofSubmitted,
    /// Witness accept votes reached the threshold.
    QuorumAccepted,
    /// Witness reject votes made the threshold unreachable.
    QuorumRejected,
    /// The verification deadline passed without a quorum.
    DeadlineExpired,
    /// Settlement side effects were applied.
    SettlementApplied,
}

impl fmt::Display for BetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BetEvent::ProofSubmitted => "proof_submitted",
            BetEvent::QuorumAccepted => "quorum_accepted",
            BetEvent::QuorumRejected => "quorum_rejected",
            BetEvent::DeadlineExpired => "deadline_expired",
            BetEvent::SettlementApplied => "settlement_applied",
        };
        write!(f, "{s}")
    }
}

/// Everything that can go wrong inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A quantity or witness count that must be positive was zero.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// The side is not meaningful for the bet's type.
    #[error("side '{side}' is not valid for a {bet_type} bet")]
    InvalidSideForBetType { side: BetSide, bet_type: BetType },

    /// The bet is not in a status that accepts contributions.
    #[error("{bet} is {status}, not accepting contributions")]
    BetNotAcceptingContributions { bet: BetId, status: BetStatus },

    /// A proof for this bet is still pending witness votes.
    #[error("{bet} already has a pending proof")]
    ProofAlreadyPending { bet: BetId },

    /// The bet is not in a status that accepts a proof.
    #[error("{bet} is {status}, not ready for a proof")]
    BetNotReadyForProof { bet: BetId, status: BetStatus },

    /// The caller is not a group member, or is the bet creator or the
    /// proof submitter (self-witnessing is disallowed).
    #[error("{witness} is not an eligible witness for {proof}")]
    NotEligibleWitness { proof: ProofId, witness: UserId },

    /// The witness already voted on this proof.
    #[error("{witness} already voted on {proof}")]
    DuplicateVote { proof: ProofId, witness: UserId },

    /// The proof already reached a quorum or expired.
    #[error("{proof} is {status}, no longer pending")]
    ProofNotPending {
        proof: ProofId,
        status: VerificationStatus,
    },

    /// The (status, event) pair is not in the transition table.
    #[error("illegal transition: {event} while {status}")]
    IllegalTransition { status: BetStatus, event: BetEvent },

    /// No bet with this id exists.
    #[error("unknown {0}")]
    UnknownBet(BetId),

    /// No proof with this id exists.
    #[error("unknown {0}")]
    UnknownProof(ProofId),
}
