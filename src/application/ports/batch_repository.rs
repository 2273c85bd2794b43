use async_trait::async_trait;

use crate::domain::{BatchId, BatchProgress, BatchRun, BatchStatus, BatchWarning, PageOutcome};

use super::RepositoryError;

#[async_trait]
pub trait BatchRepository: Send + Sync {
    async fn create(&self, run: &BatchRun) -> Result<(), RepositoryError>;

    async fn get(&self, id: BatchId) -> Result<Option<BatchRun>, RepositoryError>;

    async fn set_status(&self, id: BatchId, status: BatchStatus) -> Result<(), RepositoryError>;

    async fn set_progress(
        &self,
        id: BatchId,
        progress: BatchProgress,
    ) -> Result<(), RepositoryError>;

    async fn record_page(&self, id: BatchId, outcome: PageOutcome) -> Result<(), RepositoryError>;

    async fn add_warning(&self, id: BatchId, warning: BatchWarning) -> Result<(), RepositoryError>;
}
