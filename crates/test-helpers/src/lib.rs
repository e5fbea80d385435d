//! Deterministic collaborators and fixtures for engine tests.
//!
//! - [`ManualClock`] — a clock tests advance by hand, for deadline logic
//! - [`StaticGroups`] — an in-memory group membership oracle
//! - [`RecordingSink`] / [`FailingSink`] — notification sinks for
//!   asserting fan-out and fire-and-forget behavior
//! - [`TestHarness`] — an engine wired to all of the above

mod clock;
mod fixtures;
mod groups;
mod sink;

pub use clock::ManualClock;
pub use fixtures::{draft, TestHarness};
pub use groups::StaticGroups;
pub use sink::{FailingSink, RecordingSink};
