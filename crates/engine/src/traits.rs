//! Collaborator capabilities consumed by the engine.
//!
//! The engine is implementable purely against these traits. Production
//! wiring supplies real implementations; the test suites use the manual
//! clock, static directory and recording sink from `wager-test-helpers`.

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use wager_types::{GroupId, NotificationIntent, Timestamp, UserId};

/// Source of the current time.
///
/// Injectable so deadline logic is deterministic under test.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock [`Clock`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::from_millis(since_epoch.as_millis() as u64)
    }
}

/// Group membership oracle.
///
/// Group creation, join codes and membership churn live outside the
/// engine; this is the only view of them the engine needs.
pub trait GroupDirectory: Send + Sync {
    /// All current members of `group`.
    fn members_of(&self, group: GroupId) -> BTreeSet<UserId>;
}

/// Delivery failure reported by a notification sink.
#[derive(Debug, Error)]
#[error("notification sink: {0}")]
pub struct SinkError(pub String);

/// Best-effort notification delivery.
///
/// `enqueue` must not block. A failure is logged by the engine and never
/// rolls back the state transition that triggered the fan-out.
pub trait NotificationSink: Send + Sync {
    /// Queue one notification for one recipient.
    fn enqueue(&self, intent: NotificationIntent) -> Result<(), SinkError>;
}

/// Sink that discards every notification.
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn enqueue(&self, _intent: NotificationIntent) -> Result<(), SinkError> {
        Ok(())
    }
}
