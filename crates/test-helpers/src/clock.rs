//! Manually advanced clock.

use parking_lot::Mutex;
use wager_engine::Clock;
use wager_types::Timestamp;

/// A [`Clock`] that only moves when the test says so.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Start at the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock() = now;
    }

    /// Move forward by `ms` milliseconds.
    pub fn advance_millis(&self, ms: u64) {
        let mut now = self.now.lock();
        *now = now.plus_millis(ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(Timestamp::ZERO)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}
