use async_trait::async_trait;

use crate::domain::{BatchProgress, BatchStatus, BatchWarning, PageOutcome};

/// Observer of a running batch. Reporting never fails the batch, so implementations
/// handle their own errors.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    async fn status_changed(&self, _status: BatchStatus) {}

    async fn progress_changed(&self, _progress: BatchProgress) {}

    async fn page_completed(&self, _outcome: &PageOutcome) {}

    async fn warning(&self, _warning: &BatchWarning) {}
}

pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {}
