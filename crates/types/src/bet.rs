//! Bet and contribution types.

use crate::{BetId, GroupId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many parties can stand on each side of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    /// One creator stakes a reward, many contributors commit toward a target.
    OneToMany,
    /// Contributors may commit on either side.
    ManyToMany,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::OneToMany => write!(f, "one_to_many"),
            BetType::ManyToMany => write!(f, "many_to_many"),
        }
    }
}

/// The side a contribution is committed to.
///
/// `Against` is only meaningful for [`BetType::ManyToMany`] bets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BetSide {
    For,
    Against,
}

impl fmt::Display for BetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetSide::For => write!(f, "for"),
            BetSide::Against => write!(f, "against"),
        }
    }
}

/// Canonical status of a bet.
///
/// Only the engine's transition function moves a bet between statuses.
/// Bets are never physically deleted, only terminalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetStatus {
    /// Created but not yet open. Reserved for future workflow gating;
    /// creation currently produces [`BetStatus::Active`] directly.
    Pending,
    /// Accepting contributions.
    Active,
    /// A proof is pending witness votes.
    AwaitingProof,
    /// Witness quorum accepted the proof.
    Verified,
    /// Witness quorum rejected the proof.
    Rejected,
    /// The verification deadline passed without a quorum.
    Expired,
    /// Terminal. Rewards and side effects have been applied.
    Settled,
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BetStatus::Pending => "pending",
            BetStatus::Active => "active",
            BetStatus::AwaitingProof => "awaiting_proof",
            BetStatus::Verified => "verified",
            BetStatus::Rejected => "rejected",
            BetStatus::Expired => "expired",
            BetStatus::Settled => "settled",
        };
        write!(f, "{s}")
    }
}

/// A staked bet inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Unique id, allocated by the store.
    pub bet_id: BetId,
    /// Group the bet belongs to.
    pub group_id: GroupId,
    /// Member who created the bet.
    pub creator: UserId,
    /// Human-readable description of the outcome being bet on.
    pub description: String,
    /// What the winner gets ("coffee", "pushups", ...). Free-form.
    pub reward_type: String,
    /// Quantity the For side must reach. Always positive.
    pub target_quantity: u64,
    /// Fixed at creation, immutable thereafter.
    pub bet_type: BetType,
    /// Default witness quorum for proofs of this bet. Always at least 1.
    pub required_witnesses: u32,
    /// Current lifecycle status.
    pub status: BetStatus,
    /// When the bet was created.
    pub created_at: Timestamp,
}

/// Parameters for creating a bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetDraft {
    pub group_id: GroupId,
    pub creator: UserId,
    pub description: String,
    pub reward_type: String,
    pub target_quantity: u64,
    pub bet_type: BetType,
    pub required_witnesses: u32,
}

/// A single quantity commitment to one side of a bet.
///
/// Contributions are append-only: one contributor may contribute multiple
/// times (additive), and a recorded contribution is never mutated or
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Bet the contribution belongs to.
    pub bet_id: BetId,
    /// Member who committed the quantity.
    pub contributor: UserId,
    /// Per-contributor sequence number within the bet, starting at 1.
    pub sequence: u64,
    /// Committed quantity. Always positive.
    pub quantity: u64,
    /// Side the quantity counts toward.
    pub side: BetSide,
    /// When the contribution was recorded.
    pub recorded_at: Timestamp,
}
