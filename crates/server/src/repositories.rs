mod tracked;

pub use tracked::{
    SqliteTrackedStore, StoreError, TrackedReader, TrackedRepository, TrackedStore,
};
