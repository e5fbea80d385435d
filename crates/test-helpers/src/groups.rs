//! Static group membership oracle.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use wager_engine::GroupDirectory;
use wager_types::{GroupId, UserId};

/// A [`GroupDirectory`] backed by a plain map.
#[derive(Default)]
pub struct StaticGroups {
    members: RwLock<BTreeMap<GroupId, BTreeSet<UserId>>>,
}

impl StaticGroups {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member to a group.
    pub fn add_member(&self, group: GroupId, user: UserId) {
        self.members.write().entry(group).or_default().insert(user);
    }

    /// Remove a member from a group.
    pub fn remove_member(&self, group: GroupId, user: UserId) {
        if let Some(members) = self.members.write().get_mut(&group) {
            members.remove(&user);
        }
    }
}

impl GroupDirectory for StaticGroups {
    fn members_of(&self, group: GroupId) -> BTreeSet<UserId> {
        self.members.read().get(&group).cloned().unwrap_or_default()
    }
}
