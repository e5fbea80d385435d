//! Storage trait for the wager engine.
//!
//! # Design
//!
//! Storage is an implementation detail of the surrounding service, not of
//! the engine's decision logic. The engine reaches durable state only
//! through [`BetStore`]; a deployment picks the backing implementation
//! (the in-memory store in `wager-store-memory`, or a database-backed one
//! in the service layer).
//!
//! Implementations must provide at-least read-your-writes consistency per
//! bet aggregate. The engine additionally serializes all mutations of one
//! aggregate, so implementations do not need multi-key transactions — with
//! two exceptions, the *conditional inserts*:
//!
//! - [`BetStore::insert_proof_if_none_pending`] — at most one pending
//!   proof per bet, checked and inserted atomically.
//! - [`BetStore::insert_vote_if_absent`] — at most one vote per
//!   (proof, witness), checked and inserted atomically.
//!
//! These two carry the duplicate-detection burden so the engine can fail
//! fast with a named error instead of racing a second writer.

use wager_types::{Bet, BetId, BetSide, Contribution, GroupId, Proof, ProofId, Timestamp, UserId, Vote};

/// Durable storage for bets, contributions, proofs and votes.
pub trait BetStore: Send + Sync {
    /// Allocate the next bet id. Monotonic, never reused.
    fn allocate_bet_id(&self) -> BetId;

    /// Allocate the next proof id. Monotonic, never reused.
    fn allocate_proof_id(&self) -> ProofId;

    /// Insert or replace a bet record.
    fn put_bet(&self, bet: Bet);

    /// Look up a bet by id.
    fn bet(&self, bet_id: BetId) -> Option<Bet>;

    /// All bets in a group, newest first.
    fn bets_in_group(&self, group_id: GroupId) -> Vec<Bet>;

    /// All bets currently accepting contributions.
    fn active_bets(&self) -> Vec<Bet>;

    /// Append a contribution to the bet's ledger.
    ///
    /// Allocates the contributor's next sequence number within the bet and
    /// returns the stored record. Contributions are never mutated or
    /// deleted afterwards.
    fn append_contribution(
        &self,
        bet_id: BetId,
        contributor: UserId,
        quantity: u64,
        side: BetSide,
        at: Timestamp,
    ) -> Contribution;

    /// All contributions recorded for a bet, in insertion order.
    fn contributions(&self, bet_id: BetId) -> Vec<Contribution>;

    /// Insert a proof unless the bet already has a pending one.
    ///
    /// Returns `false` (and stores nothing) if another proof for the same
    /// bet is still pending.
    fn insert_proof_if_none_pending(&self, proof: Proof) -> bool;

    /// Look up a proof by id.
    fn proof(&self, proof_id: ProofId) -> Option<Proof>;

    /// Insert or replace a proof record.
    fn put_proof(&self, proof: Proof);

    /// The bet's pending proof, if any.
    fn pending_proof(&self, bet_id: BetId) -> Option<Proof>;

    /// All pending proofs, for display to prospective witnesses.
    fn pending_proofs(&self) -> Vec<Proof>;

    /// Pending proofs whose verification deadline lies strictly before
    /// `as_of`. A restartable snapshot; the expiry sweep iterates it and
    /// re-checks each proof under the aggregate lock.
    fn pending_proofs_due(&self, as_of: Timestamp) -> Vec<Proof>;

    /// Insert a vote unless the witness already voted on this proof.
    ///
    /// Returns `false` (and stores nothing) on a duplicate.
    fn insert_vote_if_absent(&self, vote: Vote) -> bool;

    /// All votes recorded for a proof, in insertion order.
    fn votes(&self, proof_id: ProofId) -> Vec<Vote>;
}
