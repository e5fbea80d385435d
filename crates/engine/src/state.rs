//! The bet state machine.
//!
//! A pure transition table: same (status, event) pair, same result. The
//! guards that depend on stored state (no pending proof exists, deadline
//! actually passed, quorum counts) are enforced by [`BetEngine`] before it
//! consults this table, under the aggregate lock.
//!
//! Settlement idempotency is handled above the table: re-settling a
//! settled bet is a no-op in the engine, so `(Settled, SettlementApplied)`
//! never reaches this function.
//!
//! [`BetEngine`]: crate::BetEngine

use crate::{BetEvent, EngineError};
use wager_types::BetStatus;

/// Apply `event` to a bet in `status`.
///
/// Returns the next status, or [`EngineError::IllegalTransition`] naming
/// the offending pair for every combination not in the table.
pub fn transition(status: BetStatus, event: BetEvent) -> Result<BetStatus, EngineError> {
    use BetEvent::*;
    use BetStatus::*;

    match (status, event) {
        // A proof may follow an active bet, a terminal verification
        // outcome (resubmission), or a previous proof that terminalized
        // while the bet stayed awaiting.
        (Active | Rejected | Expired | AwaitingProof, ProofSubmitted) => Ok(AwaitingProof),

        (AwaitingProof, QuorumAccepted) => Ok(Verified),
        (AwaitingProof, QuorumRejected) => Ok(Rejected),
        (AwaitingProof, DeadlineExpired) => Ok(Expired),

        (Verified, SettlementApplied) => Ok(Settled),

        (status, event) => Err(EngineError::IllegalTransition { status, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BetEvent::*;
    use BetStatus::*;

    #[test]
    fn test_proof_submission_paths() {
        assert_eq!(transition(Active, ProofSubmitted), Ok(AwaitingProof));
        assert_eq!(transition(Rejected, ProofSubmitted), Ok(AwaitingProof));
        assert_eq!(transition(Expired, ProofSubmitted), Ok(AwaitingProof));
        assert_eq!(transition(AwaitingProof, ProofSubmitted), Ok(AwaitingProof));
    }

    #[test]
    fn test_quorum_outcomes() {
        assert_eq!(transition(AwaitingProof, QuorumAccepted), Ok(Verified));
        assert_eq!(transition(AwaitingProof, QuorumRejected), Ok(Rejected));
        assert_eq!(transition(AwaitingProof, DeadlineExpired), Ok(Expired));
    }

    #[test]
    fn test_settlement() {
        assert_eq!(transition(Verified, SettlementApplied), Ok(Settled));
    }

    #[test]
    fn test_illegal_pairs_name_status_and_event() {
        let err = transition(Settled, ProofSubmitted).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalTransition {
                status: Settled,
                event: ProofSubmitted
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("proof_submitted"));
        assert!(msg.contains("settled"));
    }

    #[test]
    fn test_terminal_proof_outcomes_are_not_overwritten() {
        // A quorum outcome can never be downgraded to expired, and an
        // expired bet can never be retroactively verified.
        assert!(transition(Verified, DeadlineExpired).is_err());
        assert!(transition(Rejected, DeadlineExpired).is_err());
        assert!(transition(Expired, QuorumAccepted).is_err());
        assert!(transition(Expired, QuorumRejected).is_err());
    }

    #[test]
    fn test_only_verified_settles() {
        for status in [Pending, Active, AwaitingProof, Rejected, Expired] {
            assert!(transition(status, SettlementApplied).is_err());
        }
    }
}
