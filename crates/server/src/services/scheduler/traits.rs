use async_trait::async_trait;
use std::time::Duration;

/// Result type returned by scheduler jobs
pub type JobResult = anyhow::Result<()>;

/// A periodic background job
#[async_trait]
pub trait SchedulerJob: Send + Sync {
    /// Job name used in logs
    fn name(&self) -> &'static str;

    /// Time between runs
    fn interval(&self) -> Duration;

    async fn execute(&self) -> JobResult;
}
