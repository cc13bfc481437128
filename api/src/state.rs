use std::sync::Arc;
use std::time::Instant;

use crate::store::SubmissionStore;

/// Application state shared across handlers. The store is injected as a
/// trait object so tests and alternative deployments can swap the
/// backend.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}
