//! In-memory storage.
//!
//! All maps are protected by a single `RwLock` so the check-then-insert
//! paths (`insert_proof_if_none_pending`, `insert_vote_if_absent`) are
//! atomic without multi-key transactions. Id counters are separate atomics
//! so allocation never contends with the data lock.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use wager_store::BetStore;
use wager_types::{
    Bet, BetId, BetSide, BetStatus, Contribution, GroupId, Proof, ProofId, Timestamp, UserId,
    VerificationStatus, Vote,
};

#[derive(Default)]
struct Inner {
    bets: BTreeMap<BetId, Bet>,
    contributions: BTreeMap<BetId, Vec<Contribution>>,
    proofs: BTreeMap<ProofId, Proof>,
    /// Reverse index: bet -> proofs submitted for it, in submission order.
    proofs_by_bet: BTreeMap<BetId, Vec<ProofId>>,
    votes: BTreeMap<ProofId, Vec<Vote>>,
}

/// In-memory [`BetStore`].
pub struct MemoryBetStore {
    inner: RwLock<Inner>,
    next_bet_id: AtomicU64,
    next_proof_id: AtomicU64,
}

impl MemoryBetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_bet_id: AtomicU64::new(1),
            next_proof_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryBetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BetStore for MemoryBetStore {
    fn allocate_bet_id(&self) -> BetId {
        BetId(self.next_bet_id.fetch_add(1, Ordering::Relaxed))
    }

    fn allocate_proof_id(&self) -> ProofId {
        ProofId(self.next_proof_id.fetch_add(1, Ordering::Relaxed))
    }

    fn put_bet(&self, bet: Bet) {
        self.inner.write().bets.insert(bet.bet_id, bet);
    }

    fn bet(&self, bet_id: BetId) -> Option<Bet> {
        self.inner.read().bets.get(&bet_id).cloned()
    }

    fn bets_in_group(&self, group_id: GroupId) -> Vec<Bet> {
        let inner = self.inner.read();
        let mut bets: Vec<Bet> = inner
            .bets
            .values()
            .filter(|b| b.group_id == group_id)
            .cloned()
            .collect();
        bets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bets
    }

    fn active_bets(&self) -> Vec<Bet> {
        self.inner
            .read()
            .bets
            .values()
            .filter(|b| b.status == BetStatus::Active)
            .cloned()
            .collect()
    }

    fn append_contribution(
        &self,
        bet_id: BetId,
        contributor: UserId,
        quantity: u64,
        side: BetSide,
        at: Timestamp,
    ) -> Contribution {
        let mut inner = self.inner.write();
        let ledger = inner.contributions.entry(bet_id).or_default();
        let sequence = ledger
            .iter()
            .filter(|c| c.contributor == contributor)
            .count() as u64
            + 1;
        let contribution = Contribution {
            bet_id,
            contributor,
            sequence,
            quantity,
            side,
            recorded_at: at,
        };
        ledger.push(contribution.clone());
        contribution
    }

    fn contributions(&self, bet_id: BetId) -> Vec<Contribution> {
        self.inner
            .read()
            .contributions
            .get(&bet_id)
            .cloned()
            .unwrap_or_default()
    }

    fn insert_proof_if_none_pending(&self, proof: Proof) -> bool {
        let mut inner = self.inner.write();
        let has_pending = inner
            .proofs_by_bet
            .get(&proof.bet_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.proofs.get(id))
            .any(|p| p.verification_status == VerificationStatus::Pending);
        if has_pending {
            return false;
        }
        inner
            .proofs_by_bet
            .entry(proof.bet_id)
            .or_default()
            .push(proof.proof_id);
        inner.proofs.insert(proof.proof_id, proof);
        true
    }

    fn proof(&self, proof_id: ProofId) -> Option<Proof> {
        self.inner.read().proofs.get(&proof_id).cloned()
    }

    fn put_proof(&self, proof: Proof) {
        let mut inner = self.inner.write();
        let by_bet = inner.proofs_by_bet.entry(proof.bet_id).or_default();
        if !by_bet.contains(&proof.proof_id) {
            by_bet.push(proof.proof_id);
        }
        inner.proofs.insert(proof.proof_id, proof);
    }

    fn pending_proof(&self, bet_id: BetId) -> Option<Proof> {
        let inner = self.inner.read();
        inner
            .proofs_by_bet
            .get(&bet_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.proofs.get(id))
            .find(|p| p.verification_status == VerificationStatus::Pending)
            .cloned()
    }

    fn pending_proofs(&self) -> Vec<Proof> {
        self.inner
            .read()
            .proofs
            .values()
            .filter(|p| p.verification_status == VerificationStatus::Pending)
            .cloned()
            .collect()
    }

    fn pending_proofs_due(&self, as_of: Timestamp) -> Vec<Proof> {
        self.inner
            .read()
            .proofs
            .values()
            .filter(|p| {
                p.verification_status == VerificationStatus::Pending
                    && p.verification_deadline.is_some_and(|d| d < as_of)
            })
            .cloned()
            .collect()
    }

    fn insert_vote_if_absent(&self, vote: Vote) -> bool {
        let mut inner = self.inner.write();
        let votes = inner.votes.entry(vote.proof_id).or_default();
        if votes.iter().any(|v| v.witness == vote.witness) {
            return false;
        }
        votes.push(vote);
        true
    }

    fn votes(&self, proof_id: ProofId) -> Vec<Vote> {
        self.inner
            .read()
            .votes
            .get(&proof_id)
            .cloned()
            .unwrap_or_default()
    }
}
