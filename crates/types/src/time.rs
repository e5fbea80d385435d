//! Timestamp type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
///
/// The engine never reads the wall clock directly; every timestamp comes
/// from an injected `Clock` so deadline logic is deterministic under test.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The epoch itself.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Construct from milliseconds since the Unix epoch.
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Milliseconds since the Unix epoch.
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `ms` milliseconds.
    pub fn plus_millis(self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_and_arithmetic() {
        let t = Timestamp::from_millis(1_000);
        assert!(t > Timestamp::ZERO);
        assert_eq!(t.plus_millis(500), Timestamp(1_500));
        assert_eq!(Timestamp(u64::MAX).plus_millis(1), Timestamp(u64::MAX));
    }
}
