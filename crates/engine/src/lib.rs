//! Bet lifecycle and witness-quorum verification engine.
//!
//! This crate owns the only non-trivial decision logic in the system: the
//! state machine that governs a bet from creation through contribution,
//! proof submission, witness voting, deadline expiry, and final settlement.
//!
//! # Architecture
//!
//! The engine is:
//!
//! - **Synchronous**: no async, no `.await`. The background expiry sweep
//!   lives in `wager-runtime` and simply calls into the engine.
//! - **Deterministic**: the wall clock is injected via the [`Clock`] trait,
//!   so deadline logic is reproducible under test.
//! - **I/O-free at the edges**: persistence, group membership and
//!   notification delivery are capability traits the engine consumes.
//!
//! # Consistency model
//!
//! The bet plus its contributions, current proof and votes form a single
//! aggregate. Every mutating operation serializes on a per-aggregate lock;
//! operations on distinct bets proceed fully in parallel. A vote racing
//! the deadline sweep is decided by whichever takes the lock first — the
//! loser observes a proof that is no longer pending and fails fast.
//!
//! # Modules
//!
//! - [`ledger`] — contribution totals (pure reads, recomputed on demand)
//! - [`quorum`] — one-vote-per-witness tallying and early quorum decision
//! - [`state`] — the legal bet status transitions
//! - [`notify`] — witness/contributor enumeration for notification fan-out
//! - [`engine`] — the orchestrating [`BetEngine`]

mod engine;
mod error;
pub mod ledger;
pub mod notify;
pub mod quorum;
pub mod state;
mod traits;

pub use engine::BetEngine;
pub use error::{BetEvent, EngineError};
pub use quorum::{VoteOutcome, VoteTally};
pub use traits::{Clock, GroupDirectory, NoopSink, NotificationSink, SinkError, SystemClock};
