//! Notification sinks for tests.

use parking_lot::Mutex;
use wager_engine::{NotificationSink, SinkError};
use wager_types::{NotificationIntent, NotificationKind, UserId};

/// A [`NotificationSink`] that records everything it is handed.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<NotificationIntent>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything enqueued so far, in order.
    pub fn sent(&self) -> Vec<NotificationIntent> {
        self.sent.lock().clone()
    }

    /// Recipients of all intents of the given kind.
    pub fn recipients_of(&self, kind: NotificationKind) -> Vec<UserId> {
        self.sent
            .lock()
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.recipient)
            .collect()
    }

    /// Number of intents of the given kind.
    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.sent.lock().iter().filter(|i| i.kind == kind).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn enqueue(&self, intent: NotificationIntent) -> Result<(), SinkError> {
        self.sent.lock().push(intent);
        Ok(())
    }
}

/// A [`NotificationSink`] that always fails, for asserting that delivery
/// failures never roll back an engine transition.
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn enqueue(&self, _intent: NotificationIntent) -> Result<(), SinkError> {
        Err(SinkError("delivery unavailable".to_string()))
    }
}
