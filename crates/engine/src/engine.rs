//! The orchestrating engine.

use crate::error::{BetEvent, EngineError};
use crate::quorum::{VoteOutcome, VoteTally};
use crate::traits::{Clock, GroupDirectory, NotificationSink};
use crate::{ledger, notify, state};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use wager_store::BetStore;
use wager_types::{
    Bet, BetDraft, BetId, BetSide, BetStatus, BetType, Contribution, NotificationKind, Proof,
    ProofId, QuorumDecision, Timestamp, UserId, VerificationStatus,
};

/// Bet lifecycle engine.
///
/// All mutating operations on one bet serialize on that bet's entry in the
/// lock table; operations on distinct bets run in parallel. No operation
/// blocks on another user's action: each call completes or fails fast with
/// an [`EngineError`].
pub struct BetEngine {
    store: Arc<dyn BetStore>,
    groups: Arc<dyn GroupDirectory>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    /// Per-aggregate mutual exclusion. Entries are created on first use
    /// and kept for the life of the engine; a bet id is 8 bytes and bets
    /// are never deleted.
    locks: DashMap<BetId, Arc<Mutex<()>>>,
}

impl BetEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        store: Arc<dyn BetStore>,
        groups: Arc<dyn GroupDirectory>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            groups,
            sink,
            clock,
            locks: DashMap::new(),
        }
    }

    fn aggregate_lock(&self, bet_id: BetId) -> Arc<Mutex<()>> {
        self.locks
            .entry(bet_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ───────────────────────────────────────────────────────────────────
    // Bet creation
    // ───────────────────────────────────────────────────────────────────

    /// Create a bet. The bet starts accepting contributions immediately.
    pub fn create_bet(&self, draft: BetDraft) -> Result<Bet, EngineError> {
        if draft.target_quantity == 0 || draft.required_witnesses == 0 {
            return Err(EngineError::InvalidQuantity);
        }
        let bet = Bet {
            bet_id: self.store.allocate_bet_id(),
            group_id: draft.group_id,
            creator: draft.creator,
            description: draft.description,
            reward_type: draft.reward_type,
            target_quantity: draft.target_quantity,
            bet_type: draft.bet_type,
            required_witnesses: draft.required_witnesses,
            status: BetStatus::Active,
            created_at: self.clock.now(),
        };
        self.store.put_bet(bet.clone());
        debug!(bet = %bet.bet_id, group = %bet.group_id, creator = %bet.creator, "bet created");
        Ok(bet)
    }

    // ───────────────────────────────────────────────────────────────────
    // Contribution ledger
    // ───────────────────────────────────────────────────────────────────

    /// Record a quantity commitment to one side of a bet.
    pub fn contribute(
        &self,
        bet_id: BetId,
        contributor: UserId,
        quantity: u64,
        side: BetSide,
    ) -> Result<Contribution, EngineError> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity);
        }

        let lock = self.aggregate_lock(bet_id);
        let _guard = lock.lock();

        let bet = self.store.bet(bet_id).ok_or(EngineError::UnknownBet(bet_id))?;
        if side == BetSide::Against && bet.bet_type == BetType::OneToMany {
            return Err(EngineError::InvalidSideForBetType {
                side,
                bet_type: bet.bet_type,
            });
        }
        if bet.status != BetStatus::Active {
            return Err(EngineError::BetNotAcceptingContributions {
                bet: bet_id,
                status: bet.status,
            });
        }

        let already_reached = ledger::target_reached(&bet, &self.store.contributions(bet_id));
        let contribution = self.store.append_contribution(
            bet_id,
            contributor,
            quantity,
            side,
            self.clock.now(),
        );
        debug!(bet = %bet_id, %contributor, quantity, %side, "contribution recorded");

        // Reaching the target is informational: the status stays active
        // and submitting proof remains an explicit, separate action.
        if !already_reached && ledger::target_reached(&bet, &self.store.contributions(bet_id)) {
            notify::fan_out(
                self.sink.as_ref(),
                [bet.creator],
                NotificationKind::BetAccepted,
                "Your bet reached its contribution target",
            );
        }

        Ok(contribution)
    }

    /// Exact sum of recorded quantities per side, recomputed on demand.
    pub fn current_totals(&self, bet_id: BetId) -> Result<BTreeMap<BetSide, u64>, EngineError> {
        if self.store.bet(bet_id).is_none() {
            return Err(EngineError::UnknownBet(bet_id));
        }
        Ok(ledger::side_totals(&self.store.contributions(bet_id)))
    }

    /// Whether the For side has reached the bet's target quantity.
    pub fn target_reached(&self, bet_id: BetId) -> Result<bool, EngineError> {
        let bet = self.store.bet(bet_id).ok_or(EngineError::UnknownBet(bet_id))?;
        Ok(ledger::target_reached(&bet, &self.store.contributions(bet_id)))
    }

    // ───────────────────────────────────────────────────────────────────
    // Proof submission
    // ───────────────────────────────────────────────────────────────────

    /// Submit photographic proof for a bet.
    ///
    /// `required_witnesses` of `None` copies the bet's threshold; `Some`
    /// overrides it. On success the bet awaits witness votes and every
    /// eligible witness is notified.
    pub fn submit_proof(
        &self,
        bet_id: BetId,
        submitter: UserId,
        artifact_ref: String,
        required_witnesses: Option<u32>,
        deadline: Option<Timestamp>,
    ) -> Result<Proof, EngineError> {
        let lock = self.aggregate_lock(bet_id);
        let _guard = lock.lock();

        let bet = self.store.bet(bet_id).ok_or(EngineError::UnknownBet(bet_id))?;
        match bet.status {
            BetStatus::Active
            | BetStatus::AwaitingProof
            | BetStatus::Rejected
            | BetStatus::Expired => {}
            status => {
                return Err(EngineError::BetNotReadyForProof {
                    bet: bet_id,
                    status,
                })
            }
        }

        let required = match required_witnesses {
            Some(0) => return Err(EngineError::InvalidQuantity),
            Some(n) => n,
            None => bet.required_witnesses,
        };

        let proof = Proof {
            proof_id: self.store.allocate_proof_id(),
            bet_id,
            artifact_ref,
            submitter,
            required_witnesses: required,
            verification_deadline: deadline,
            verification_status: VerificationStatus::Pending,
            submitted_at: self.clock.now(),
        };
        if !self.store.insert_proof_if_none_pending(proof.clone()) {
            return Err(EngineError::ProofAlreadyPending { bet: bet_id });
        }

        let mut bet = bet;
        bet.status = state::transition(bet.status, BetEvent::ProofSubmitted)?;
        self.store.put_bet(bet.clone());
        info!(bet = %bet_id, proof = %proof.proof_id, %submitter, "proof submitted, awaiting witnesses");

        let members = self.groups.members_of(bet.group_id);
        let witnesses = notify::eligible_witnesses(&members, bet.creator, submitter);
        notify::fan_out(
            self.sink.as_ref(),
            witnesses,
            NotificationKind::WitnessRequired,
            "Your verification is needed for a bet",
        );

        Ok(proof)
    }

    // ───────────────────────────────────────────────────────────────────
    // Witness voting
    // ───────────────────────────────────────────────────────────────────

    /// Cast one witness vote on a pending proof.
    ///
    /// When this vote newly resolves the quorum, the proof terminalizes,
    /// the bet transitions, and everyone with a stake in the bet is
    /// notified.
    #[instrument(level = "debug", skip(self, comment), fields(proof = %proof_id, %witness))]
    pub fn cast_vote(
        &self,
        proof_id: ProofId,
        witness: UserId,
        verified: bool,
        comment: Option<String>,
    ) -> Result<VoteOutcome, EngineError> {
        // Resolve the aggregate outside the lock, then re-read under it.
        let bet_id = self
            .store
            .proof(proof_id)
            .ok_or(EngineError::UnknownProof(proof_id))?
            .bet_id;
        let lock = self.aggregate_lock(bet_id);
        let _guard = lock.lock();

        let mut proof = self
            .store
            .proof(proof_id)
            .ok_or(EngineError::UnknownProof(proof_id))?;

        let bet = self
            .store
            .bet(proof.bet_id)
            .ok_or(EngineError::UnknownBet(proof.bet_id))?;
        let members = self.groups.members_of(bet.group_id);
        let eligible = notify::eligible_witnesses(&members, bet.creator, proof.submitter);
        if !eligible.contains(&witness) {
            return Err(EngineError::NotEligibleWitness {
                proof: proof_id,
                witness,
            });
        }

        // A repeat voter is reported as a duplicate even when the proof
        // has since resolved, so the check precedes the pending check.
        // The read is race-free under the aggregate lock; the conditional
        // insert below remains the backstop.
        if self
            .store
            .votes(proof_id)
            .iter()
            .any(|v| v.witness == witness)
        {
            return Err(EngineError::DuplicateVote {
                proof: proof_id,
                witness,
            });
        }

        if proof.verification_status != VerificationStatus::Pending {
            return Err(EngineError::ProofNotPending {
                proof: proof_id,
                status: proof.verification_status,
            });
        }

        let vote = wager_types::Vote {
            proof_id,
            witness,
            verified,
            comment,
            cast_at: self.clock.now(),
        };
        if !self.store.insert_vote_if_absent(vote) {
            return Err(EngineError::DuplicateVote {
                proof: proof_id,
                witness,
            });
        }

        let tally = VoteTally::count(
            &self.store.votes(proof_id),
            eligible.len() as u32,
            proof.required_witnesses,
        );
        let decision = tally.decision();
        if let Some(decision) = decision {
            proof.verification_status = match decision {
                QuorumDecision::Accepted => VerificationStatus::Verified,
                QuorumDecision::Rejected => VerificationStatus::Rejected,
            };
            self.store.put_proof(proof.clone());
            self.on_verification_outcome(bet, decision)?;
            info!(
                proof = %proof_id,
                accepts = tally.accepts(),
                rejects = tally.rejects(),
                ?decision,
                "witness quorum reached"
            );
        } else {
            debug!(
                proof = %proof_id,
                accepts = tally.accepts(),
                rejects = tally.rejects(),
                "vote recorded, quorum still open"
            );
        }

        Ok(VoteOutcome {
            proof,
            tally,
            decision,
        })
    }

    /// Apply a quorum outcome to the bet and notify its stakeholders.
    ///
    /// Called with the aggregate lock held.
    fn on_verification_outcome(
        &self,
        mut bet: Bet,
        decision: QuorumDecision,
    ) -> Result<(), EngineError> {
        let event = match decision {
            QuorumDecision::Accepted => BetEvent::QuorumAccepted,
            QuorumDecision::Rejected => BetEvent::QuorumRejected,
        };
        bet.status = state::transition(bet.status, event)?;
        self.store.put_bet(bet.clone());

        let recipients =
            notify::stakeholders(bet.creator, &self.store.contributions(bet.bet_id));
        let message = match decision {
            QuorumDecision::Accepted => "Witnesses verified the proof for your bet",
            QuorumDecision::Rejected => "Witnesses rejected the proof for your bet",
        };
        notify::fan_out(
            self.sink.as_ref(),
            recipients,
            NotificationKind::VerificationComplete,
            message,
        );
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────
    // Settlement
    // ───────────────────────────────────────────────────────────────────

    /// Apply settlement to a verified bet.
    ///
    /// Idempotent: settling an already settled bet returns it unchanged
    /// with no side effects. Any other non-verified status is an
    /// [`EngineError::IllegalTransition`].
    pub fn settle(&self, bet_id: BetId) -> Result<Bet, EngineError> {
        let lock = self.aggregate_lock(bet_id);
        let _guard = lock.lock();

        let mut bet = self.store.bet(bet_id).ok_or(EngineError::UnknownBet(bet_id))?;
        if bet.status == BetStatus::Settled {
            return Ok(bet);
        }

        bet.status = state::transition(bet.status, BetEvent::SettlementApplied)?;
        self.store.put_bet(bet.clone());
        info!(bet = %bet_id, "bet settled");

        let recipients = notify::stakeholders(bet.creator, &self.store.contributions(bet_id));
        notify::fan_out(
            self.sink.as_ref(),
            recipients,
            NotificationKind::BetComplete,
            "Your bet has been settled",
        );
        Ok(bet)
    }

    // ───────────────────────────────────────────────────────────────────
    // Deadline expiry
    // ───────────────────────────────────────────────────────────────────

    /// Expire pending proofs whose deadline has passed.
    ///
    /// Driven by the recurring sweep in `wager-runtime`, never by a user
    /// call. Idempotent: each candidate is re-read under its aggregate
    /// lock, and a proof that reached quorum in the meantime is skipped
    /// silently. Returns the bets whose proofs expired in this pass.
    pub fn sweep_expired_proofs(&self) -> Vec<BetId> {
        let now = self.clock.now();
        let mut expired = Vec::new();

        for candidate in self.store.pending_proofs_due(now) {
            let lock = self.aggregate_lock(candidate.bet_id);
            let _guard = lock.lock();

            // A vote may have resolved the quorum between the snapshot
            // and taking the lock; whichever committed first wins.
            let Some(mut proof) = self.store.proof(candidate.proof_id) else {
                continue;
            };
            if proof.verification_status != VerificationStatus::Pending {
                continue;
            }
            let Some(deadline) = proof.verification_deadline else {
                continue;
            };
            if now <= deadline {
                continue;
            }

            proof.verification_status = VerificationStatus::Expired;
            self.store.put_proof(proof.clone());

            if let Some(mut bet) = self.store.bet(proof.bet_id) {
                match state::transition(bet.status, BetEvent::DeadlineExpired) {
                    Ok(status) => {
                        bet.status = status;
                        self.store.put_bet(bet);
                        info!(bet = %proof.bet_id, proof = %proof.proof_id, "verification deadline passed, proof expired");
                        expired.push(proof.bet_id);
                    }
                    Err(err) => {
                        // The bet moved on without its proof; the expiry
                        // attempt loses harmlessly.
                        debug!(bet = %proof.bet_id, %err, "expiry transition not applicable");
                    }
                }
            }
        }

        expired
    }

    // ───────────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────────

    /// Look up a bet.
    pub fn bet(&self, bet_id: BetId) -> Result<Bet, EngineError> {
        self.store.bet(bet_id).ok_or(EngineError::UnknownBet(bet_id))
    }

    /// Look up a proof.
    pub fn proof(&self, proof_id: ProofId) -> Result<Proof, EngineError> {
        self.store
            .proof(proof_id)
            .ok_or(EngineError::UnknownProof(proof_id))
    }

    /// All bets in a group, newest first.
    pub fn bets_in_group(&self, group_id: wager_types::GroupId) -> Vec<Bet> {
        self.store.bets_in_group(group_id)
    }

    /// All bets currently accepting contributions.
    pub fn active_bets(&self) -> Vec<Bet> {
        self.store.active_bets()
    }

    /// All proofs awaiting witness votes.
    pub fn pending_verifications(&self) -> Vec<Proof> {
        self.store.pending_proofs()
    }
}
