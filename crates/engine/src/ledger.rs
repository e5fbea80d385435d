//! Contribution ledger reads.
//!
//! Totals are derived by summing the recorded contributions every time
//! they are needed. There is no cached counter to drift out of sync with
//! the append-only ledger.

use std::collections::BTreeMap;
use wager_types::{Bet, BetSide, Contribution};

/// Sum of recorded quantities per side.
pub fn side_totals(contributions: &[Contribution]) -> BTreeMap<BetSide, u64> {
    let mut totals = BTreeMap::new();
    for c in contributions {
        *totals.entry(c.side).or_insert(0) += c.quantity;
    }
    totals
}

/// Sum of recorded quantities for one side.
pub fn total_for(contributions: &[Contribution], side: BetSide) -> u64 {
    contributions
        .iter()
        .filter(|c| c.side == side)
        .map(|c| c.quantity)
        .sum()
}

/// Whether the For side has reached the bet's target quantity.
///
/// Informational only: reaching the target never changes the bet's
/// status, and settlement is driven exclusively by the witness quorum.
/// For many-to-many bets the Against total plays no part in this either.
pub fn target_reached(bet: &Bet, contributions: &[Contribution]) -> bool {
    total_for(contributions, BetSide::For) >= bet.target_quantity
}

#[cfg(test)]
mod tests {
    use super::*;
    use wager_types::{BetId, BetStatus, BetType, GroupId, Timestamp, UserId};

    fn contribution(contributor: u64, quantity: u64, side: BetSide) -> Contribution {
        Contribution {
            bet_id: BetId(1),
            contributor: UserId(contributor),
            sequence: 1,
            quantity,
            side,
            recorded_at: Timestamp::ZERO,
        }
    }

    fn bet_with_target(target: u64) -> Bet {
        Bet {
            bet_id: BetId(1),
            group_id: GroupId(1),
            creator: UserId(1),
            description: "50 pushups a day".to_string(),
            reward_type: "coffee".to_string(),
            target_quantity: target,
            bet_type: BetType::OneToMany,
            required_witnesses: 2,
            status: BetStatus::Active,
            created_at: Timestamp::ZERO,
        }
    }

    #[test]
    fn test_totals_are_exact_sums() {
        let contributions = vec![
            contribution(1, 6, BetSide::For),
            contribution(2, 5, BetSide::For),
            contribution(3, 4, BetSide::Against),
        ];
        let totals = side_totals(&contributions);
        assert_eq!(totals.get(&BetSide::For), Some(&11));
        assert_eq!(totals.get(&BetSide::Against), Some(&4));
        assert_eq!(total_for(&contributions, BetSide::For), 11);
    }

    #[test]
    fn test_empty_ledger_has_no_totals() {
        assert!(side_totals(&[]).is_empty());
        assert_eq!(total_for(&[], BetSide::For), 0);
    }

    #[test]
    fn test_target_reached_ignores_against_side() {
        let bet = bet_with_target(10);
        let contributions = vec![
            contribution(1, 6, BetSide::For),
            contribution(2, 20, BetSide::Against),
        ];
        assert!(!target_reached(&bet, &contributions));

        let contributions = vec![
            contribution(1, 6, BetSide::For),
            contribution(2, 5, BetSide::For),
        ];
        assert!(target_reached(&bet, &contributions));
    }
}
