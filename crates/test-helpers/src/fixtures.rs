//! Engine fixtures.

use crate::{ManualClock, RecordingSink, StaticGroups};
use std::sync::Arc;
use wager_engine::BetEngine;
use wager_store_memory::MemoryBetStore;
use wager_types::{BetDraft, BetType, GroupId, UserId};

/// An engine wired to deterministic collaborators, with handles to each.
pub struct TestHarness {
    pub engine: BetEngine,
    pub store: Arc<MemoryBetStore>,
    pub groups: Arc<StaticGroups>,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    /// A fresh engine over an empty store, an empty directory, a
    /// recording sink and a clock at the epoch.
    pub fn new() -> Self {
        let store = Arc::new(MemoryBetStore::new());
        let groups = Arc::new(StaticGroups::new());
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(ManualClock::default());
        let engine = BetEngine::new(
            store.clone(),
            groups.clone(),
            sink.clone(),
            clock.clone(),
        );
        Self {
            engine,
            store,
            groups,
            sink,
            clock,
        }
    }

    /// Populate a group with members `UserId(1)..=UserId(n)`.
    pub fn with_group(self, group: GroupId, n: u64) -> Self {
        for user in 1..=n {
            self.groups.add_member(group, UserId(user));
        }
        self
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-to-many draft with sensible test defaults.
pub fn draft(group: GroupId, creator: UserId, target: u64, witnesses: u32) -> BetDraft {
    BetDraft {
        group_id: group,
        creator,
        description: "run a marathon by June".to_string(),
        reward_type: "coffee".to_string(),
        target_quantity: target,
        bet_type: BetType::OneToMany,
        required_witnesses: witnesses,
    }
}
