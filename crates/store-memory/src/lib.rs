//! In-memory [`BetStore`](wager_store::BetStore) implementation.
//!
//! Used by the test suites and suitable for single-process deployments.
//! All state lives behind one `RwLock`, so the conditional inserts are
//! trivially atomic.

mod store;

pub use store::MemoryBetStore;
