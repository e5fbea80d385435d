//! Notification fan-out.
//!
//! On specific transitions the engine enumerates the affected users and
//! emits one intent per recipient. Delivery is fire-and-forget: a sink
//! failure is logged and never rolls back the transition that triggered
//! the fan-out.

use crate::NotificationSink;
use std::collections::BTreeSet;
use tracing::warn;
use wager_types::{Contribution, NotificationIntent, NotificationKind, UserId};

/// Group members who may witness a proof: everyone except the bet creator
/// and the proof submitter.
pub fn eligible_witnesses(
    members: &BTreeSet<UserId>,
    creator: UserId,
    submitter: UserId,
) -> BTreeSet<UserId> {
    members
        .iter()
        .copied()
        .filter(|&m| m != creator && m != submitter)
        .collect()
}

/// Users with a stake in a bet's outcome: the creator plus everyone who
/// contributed, deduplicated.
pub fn stakeholders(creator: UserId, contributions: &[Contribution]) -> BTreeSet<UserId> {
    let mut users: BTreeSet<UserId> = contributions.iter().map(|c| c.contributor).collect();
    users.insert(creator);
    users
}

/// Emit one notification per recipient, best-effort.
pub(crate) fn fan_out(
    sink: &dyn NotificationSink,
    recipients: impl IntoIterator<Item = UserId>,
    kind: NotificationKind,
    message: &str,
) {
    for recipient in recipients {
        let intent = NotificationIntent {
            recipient,
            kind,
            message: message.to_string(),
        };
        if let Err(err) = sink.enqueue(intent) {
            warn!(%recipient, %kind, %err, "notification enqueue failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wager_types::{BetId, BetSide, Timestamp};

    #[test]
    fn test_creator_and_submitter_cannot_witness() {
        let members: BTreeSet<UserId> = [1, 2, 3, 4].map(UserId).into_iter().collect();
        let eligible = eligible_witnesses(&members, UserId(1), UserId(3));
        assert_eq!(eligible, [2, 4].map(UserId).into_iter().collect());
    }

    #[test]
    fn test_nonmember_creator_does_not_appear() {
        let members: BTreeSet<UserId> = [2, 3].map(UserId).into_iter().collect();
        let eligible = eligible_witnesses(&members, UserId(9), UserId(2));
        assert_eq!(eligible, [3].map(UserId).into_iter().collect());
    }

    #[test]
    fn test_stakeholders_deduplicate() {
        let contributions: Vec<Contribution> = [2u64, 3, 2]
            .iter()
            .enumerate()
            .map(|(i, &u)| Contribution {
                bet_id: BetId(1),
                contributor: UserId(u),
                sequence: i as u64 + 1,
                quantity: 1,
                side: BetSide::For,
                recorded_at: Timestamp::ZERO,
            })
            .collect();
        let users = stakeholders(UserId(1), &contributions);
        assert_eq!(users, [1, 2, 3].map(UserId).into_iter().collect());
    }
}
