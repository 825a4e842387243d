use std::sync::Arc;

use crate::repositories::TrackedReader;

/// Shared state for HTTP handlers. Handlers only get read access to the store.
#[derive(Clone)]
pub struct AppState {
    pub tracked: Arc<dyn TrackedReader>,
}

impl AppState {
    pub fn new(tracked: Arc<dyn TrackedReader>) -> Self {
        Self { tracked }
    }
}
