mod reconcile_job;
mod traits;

pub use reconcile_job::ReconcileJob;
pub use traits::{JobResult, SchedulerJob};

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Scheduler service that manages periodic background tasks.
///
/// Each registered job runs in its own tokio task at its interval. The first run
/// happens right after start. A run in progress is allowed to finish before
/// cancellation takes effect.
///
/// # Example
///
/// ```rust,ignore
/// let token = CancellationToken::new();
/// let scheduler = SchedulerService::new().with_job(ReconcileJob::new(reconcile, interval));
///
/// let handles = scheduler.start(token.clone());
/// token.cancel();
/// ```
pub struct SchedulerService {
    jobs: Vec<Arc<dyn SchedulerJob>>,
}

impl SchedulerService {
    /// Creates a new scheduler service with no jobs.
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Adds a job to the scheduler.
    ///
    /// Jobs are not started until [`start`](Self::start) is called.
    pub fn with_job<J: SchedulerJob + 'static>(mut self, job: J) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    /// Starts all registered jobs and returns their task handles.
    pub fn start(&self, token: CancellationToken) -> Vec<JoinHandle<()>> {
        self.jobs
            .iter()
            .map(|job| {
                let job = Arc::clone(job);
                let token = token.clone();
                tokio::spawn(async move {
                    Self::run_job_loop(job, token).await;
                })
            })
            .collect()
    }

    /// Runs a single job until the token is cancelled.
    async fn run_job_loop(job: Arc<dyn SchedulerJob>, token: CancellationToken) {
        let name = job.name();
        let interval = job.interval();

        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("Job '{}' stopped", name);
                    return;
                }
                _ = timer.tick() => {}
            }

            match job.execute().await {
                Ok(()) => {
                    tracing::debug!("Job '{}' completed successfully", name);
                }
                Err(e) => {
                    tracing::error!("Job '{}' failed: {}", name, e);
                }
            }
        }
    }

    /// Returns the number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for SchedulerService {
    fn default() -> Self {
        Self::new()
    }
}
