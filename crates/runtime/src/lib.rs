//! Runtime glue for the wager engine.
//!
//! The engine itself is synchronous; everything that needs a runtime
//! lives here. Currently that is the proof-expiry sweep: a recurring,
//! cooperative task that marks overdue pending proofs expired.
//!
//! The sweep has no fixed cadence requirement beyond "frequent enough
//! that an expiry is observed shortly after its deadline". It is safe to
//! run concurrently with votes racing a deadline: the engine serializes
//! both on the aggregate lock and the loser backs off harmlessly.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};
use wager_engine::BetEngine;

/// Configuration for the expiry sweeper.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Time between sweep passes.
    pub interval: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

/// Recurring task that expires overdue pending proofs.
pub struct ExpirySweeper {
    engine: Arc<BetEngine>,
    config: SweeperConfig,
}

impl ExpirySweeper {
    /// Create a sweeper over the given engine.
    pub fn new(engine: Arc<BetEngine>, config: SweeperConfig) -> Self {
        Self { engine, config }
    }

    /// Run one sweep pass immediately.
    ///
    /// Exposed so deployments can sweep on demand (e.g. at startup after
    /// downtime) without waiting for the next tick.
    pub fn sweep_once(&self) -> usize {
        let expired = self.engine.sweep_expired_proofs();
        if !expired.is_empty() {
            info!(count = expired.len(), ?expired, "expired overdue proofs");
        }
        expired.len()
    }

    /// Run the sweep loop until `shutdown` flips to `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("expiry sweeper shutting down");
                        return;
                    }
                }
            }
        }
    }
}
