mod clock;
mod dispatcher;
mod ledger;
mod provider;
mod reconcile;
mod scheduler;
mod settings;

pub use clock::{Clock, SystemClock};
pub use dispatcher::{DestinationRule, DispatchError, Dispatcher, QueueDispatcher};
pub use ledger::DispatchLedger;
pub use provider::{FeedFetcher, FeedProvider, FetchError};
pub use reconcile::{
    ReconcileError, ReconcileOptions, ReconcileService, RecordOutcome, TickStats,
};
pub use scheduler::{JobResult, ReconcileJob, SchedulerJob, SchedulerService};
pub use settings::{SettingsError, SettingsService};
