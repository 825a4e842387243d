use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::traits::{JobResult, SchedulerJob};
use crate::services::ReconcileService;

/// Reconciliation tick, every `reconcile.interval_secs` (600 by default).
pub struct ReconcileJob {
    reconcile: Arc<ReconcileService>,
    interval: Duration,
}

impl ReconcileJob {
    pub fn new(reconcile: Arc<ReconcileService>, interval: Duration) -> Self {
        Self {
            reconcile,
            interval,
        }
    }
}

#[async_trait]
impl SchedulerJob for ReconcileJob {
    fn name(&self) -> &'static str {
        "Reconcile"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn execute(&self) -> JobResult {
        tracing::debug!("Starting reconcile job");

        let stats = self.reconcile.run_tick().await?;

        if stats.due > 0 {
            tracing::info!(
                "Reconcile completed: {} due, {} advanced, {} retired, {} recaps, {} failed",
                stats.due,
                stats.advanced,
                stats.retired,
                stats.recaps,
                stats.failed
            );
        }

        Ok(())
    }
}
