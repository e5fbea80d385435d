//! Witness quorum counting.
//!
//! A proof is decided as early as the recorded votes allow:
//!
//! - **Accepted** once accept votes reach the required threshold.
//! - **Rejected** once reject votes make the threshold unreachable, i.e.
//!   the witnesses who have not voted yet could all accept and the count
//!   would still fall short.
//!
//! Neither direction waits for every eligible witness to vote.

use wager_types::{Proof, QuorumDecision, Vote};

/// Running accept/reject counts for a pending proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    accepts: u32,
    rejects: u32,
    /// Number of group members who may vote on this proof.
    eligible: u32,
    /// Accept votes needed for a verified outcome.
    required: u32,
}

impl VoteTally {
    /// Tally recorded votes against the quorum parameters.
    ///
    /// `eligible` is the number of eligible witnesses (group members minus
    /// the bet creator and the proof submitter) at tally time; `required`
    /// is the proof's accept threshold.
    pub fn count(votes: &[Vote], eligible: u32, required: u32) -> Self {
        let accepts = votes.iter().filter(|v| v.verified).count() as u32;
        let rejects = votes.len() as u32 - accepts;
        Self {
            accepts,
            rejects,
            eligible,
            required,
        }
    }

    /// Accept votes recorded so far.
    pub fn accepts(&self) -> u32 {
        self.accepts
    }

    /// Reject votes recorded so far.
    pub fn rejects(&self) -> u32 {
        self.rejects
    }

    /// The quorum outcome, if the recorded votes already decide one.
    ///
    /// Returns `None` while both outcomes are still possible.
    pub fn decision(&self) -> Option<QuorumDecision> {
        if self.accepts >= self.required {
            return Some(QuorumDecision::Accepted);
        }
        // Every witness who has not voted could still accept; reject is
        // decided only when even that cannot reach the threshold.
        if self.rejects > self.eligible.saturating_sub(self.required) {
            return Some(QuorumDecision::Rejected);
        }
        None
    }
}

/// Result of an accepted vote.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    /// The proof after the vote, terminalized if a quorum was reached.
    pub proof: Proof,
    /// Counts after the vote.
    pub tally: VoteTally,
    /// `Some` only when this vote newly resolved the quorum.
    pub decision: Option<QuorumDecision>,
}
