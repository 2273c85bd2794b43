use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{BatchRepository, RepositoryError};
use crate::domain::{BatchId, BatchProgress, BatchRun, BatchStatus, BatchWarning, PageOutcome};

/// Process-local batch store. Runs live until the process exits.
#[derive(Default)]
pub struct InMemoryBatchRepository {
    runs: RwLock<HashMap<BatchId, BatchRun>>,
}

impl InMemoryBatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, id: BatchId, apply: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut BatchRun),
    {
        let mut runs = self.runs.write();
        let run = runs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        apply(run);
        run.touch();
        Ok(())
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn create(&self, run: &BatchRun) -> Result<(), RepositoryError> {
        let mut runs = self.runs.write();
        if runs.contains_key(&run.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "batch {} already exists",
                run.id
            )));
        }
        runs.insert(run.id, run.clone());
        Ok(())
    }

    async fn get(&self, id: BatchId) -> Result<Option<BatchRun>, RepositoryError> {
        Ok(self.runs.read().get(&id).cloned())
    }

    async fn set_status(&self, id: BatchId, status: BatchStatus) -> Result<(), RepositoryError> {
        self.update(id, |run| run.status = status)
    }

    async fn set_progress(
        &self,
        id: BatchId,
        progress: BatchProgress,
    ) -> Result<(), RepositoryError> {
        self.update(id, |run| run.progress = progress)
    }

    async fn record_page(&self, id: BatchId, outcome: PageOutcome) -> Result<(), RepositoryError> {
        self.update(id, |run| run.record_page(outcome))
    }

    async fn add_warning(&self, id: BatchId, warning: BatchWarning) -> Result<(), RepositoryError> {
        self.update(id, |run| run.warnings.push(warning))
    }
}
