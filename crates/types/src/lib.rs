//! Core types for the wager engine.
//!
//! This crate provides the foundational types used throughout the bet
//! lifecycle implementation:
//!
//! - **Identifiers**: `BetId`, `ProofId`, `GroupId`, `UserId`
//! - **Time**: `Timestamp` (milliseconds since the Unix epoch)
//! - **Bet types**: `Bet`, `Contribution`, `BetStatus`, `BetType`, `BetSide`
//! - **Proof types**: `Proof`, `Vote`, `VerificationStatus`, `QuorumDecision`
//! - **Notification types**: `NotificationKind`, `NotificationIntent`
//!
//! # Design Philosophy
//!
//! This crate is self-contained with minimal dependencies. It does not depend
//! on any other workspace crates, making it the foundation layer. All types
//! derive `serde` so a surrounding request layer can map them to whatever
//! transport it chooses.

mod bet;
mod identifiers;
mod notification;
mod proof;
mod time;

pub use bet::{Bet, BetDraft, BetSide, BetStatus, BetType, Contribution};
pub use identifiers::{BetId, GroupId, ProofId, UserId};
pub use notification::{NotificationIntent, NotificationKind};
pub use proof::{Proof, QuorumDecision, VerificationStatus, Vote};
pub use time::Timestamp;
