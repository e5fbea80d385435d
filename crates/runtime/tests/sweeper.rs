//! Sweeper behavior against a manually advanced clock.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wager_engine::BetEngine;
use wager_runtime::{ExpirySweeper, SweeperConfig};
use wager_store_memory::MemoryBetStore;
use wager_test_helpers::{draft, ManualClock, RecordingSink, StaticGroups};
use wager_types::{BetStatus, GroupId, Timestamp, UserId, VerificationStatus};

const GROUP: GroupId = GroupId(1);

fn engine_with_clock() -> (Arc<BetEngine>, Arc<ManualClock>) {
    let store = Arc::new(MemoryBetStore::new());
    let groups = Arc::new(StaticGroups::new());
    for user in 1..=5 {
        groups.add_member(GROUP, UserId(user));
    }
    let clock = Arc::new(ManualClock::default());
    let sink = Arc::new(RecordingSink::new());
    (
        Arc::new(BetEngine::new(store, groups, sink, clock.clone())),
        clock,
    )
}

#[test]
fn sweep_once_expires_only_overdue_proofs() {
    let (engine, clock) = engine_with_clock();
    let sweeper = ExpirySweeper::new(engine.clone(), SweeperConfig::default());

    let bet = engine.create_bet(draft(GROUP, UserId(1), 10, 2)).unwrap();
    let proof = engine
        .submit_proof(
            bet.bet_id,
            UserId(1),
            "ref".into(),
            None,
            Some(Timestamp(500)),
        )
        .unwrap();

    // At and before the deadline nothing expires.
    clock.set(Timestamp(500));
    assert_eq!(sweeper.sweep_once(), 0);
    assert_eq!(engine.bet(bet.bet_id).unwrap().status, BetStatus::AwaitingProof);

    clock.set(Timestamp(501));
    assert_eq!(sweeper.sweep_once(), 1);
    assert_eq!(engine.bet(bet.bet_id).unwrap().status, BetStatus::Expired);
    assert_eq!(
        engine.proof(proof.proof_id).unwrap().verification_status,
        VerificationStatus::Expired
    );

    // A second pass finds nothing left to do.
    assert_eq!(sweeper.sweep_once(), 0);
}

#[test]
fn proofs_without_deadlines_never_expire() {
    let (engine, clock) = engine_with_clock();
    let sweeper = ExpirySweeper::new(engine.clone(), SweeperConfig::default());

    let bet = engine.create_bet(draft(GROUP, UserId(1), 10, 2)).unwrap();
    engine
        .submit_proof(bet.bet_id, UserId(1), "ref".into(), None, None)
        .unwrap();

    clock.set(Timestamp(u64::MAX));
    assert_eq!(sweeper.sweep_once(), 0);
    assert_eq!(engine.bet(bet.bet_id).unwrap().status, BetStatus::AwaitingProof);
}

#[tokio::test]
async fn run_loop_sweeps_until_shutdown() {
    let (engine, clock) = engine_with_clock();

    let bet = engine.create_bet(draft(GROUP, UserId(1), 10, 2)).unwrap();
    engine
        .submit_proof(
            bet.bet_id,
            UserId(1),
            "ref".into(),
            None,
            Some(Timestamp(500)),
        )
        .unwrap();
    clock.set(Timestamp(501));

    let sweeper = ExpirySweeper::new(
        engine.clone(),
        SweeperConfig {
            interval: Duration::from_millis(5),
        },
    );
    let (tx, rx) = watch::channel(false);
    let task = tokio::spawn(sweeper.run(rx));

    // The loop should observe the overdue proof within a few ticks.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        if engine.bet(bet.bet_id).unwrap().status == BetStatus::Expired {
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "sweep never ran");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    tx.send(true).ok();
    task.await.unwrap();
}
