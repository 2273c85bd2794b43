use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{BatchRepository, ProgressReporter};
use crate::domain::{
    BatchId, BatchProgress, BatchStatus, BatchWarning, PageOutcome, UploadedDocument,
};

use super::cancellation::{CancellationFlag, CancellationRegistry};
use super::page_pipeline::PagePipeline;

pub struct BatchMessage {
    pub batch_id: BatchId,
    pub documents: Vec<UploadedDocument>,
    pub cancel: CancellationFlag,
}

/// Runs submitted batches one at a time, in the order they were queued.
pub struct BatchWorker {
    receiver: mpsc::Receiver<BatchMessage>,
    pipeline: Arc<PagePipeline>,
    batch_repository: Arc<dyn BatchRepository>,
    cancellations: CancellationRegistry,
}

impl BatchWorker {
    pub fn new(
        receiver: mpsc::Receiver<BatchMessage>,
        pipeline: Arc<PagePipeline>,
        batch_repository: Arc<dyn BatchRepository>,
        cancellations: CancellationRegistry,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            batch_repository,
            cancellations,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Batch worker started");
        while let Some(msg) = self.receiver.recv().await {
            self.process_batch(msg).await;
        }
        tracing::info!("Batch worker stopped: channel closed");
    }

    #[tracing::instrument(
        skip_all,
        fields(batch_id = %msg.batch_id, documents = msg.documents.len())
    )]
    async fn process_batch(&self, msg: BatchMessage) {
        let reporter =
            RepositoryProgressReporter::new(msg.batch_id, Arc::clone(&self.batch_repository));

        let report = self
            .pipeline
            .analyze(&msg.documents, &reporter, &msg.cancel)
            .await;

        self.cancellations.release(msg.batch_id);
        tracing::info!(
            pages = report.page_results.len(),
            projects = report.project_records.len(),
            cancelled = report.cancelled,
            "Batch finished"
        );
    }
}

/// Mirrors pipeline events into the batch repository so status polls see partial results.
pub struct RepositoryProgressReporter {
    batch_id: BatchId,
    batch_repository: Arc<dyn BatchRepository>,
}

impl RepositoryProgressReporter {
    pub fn new(batch_id: BatchId, batch_repository: Arc<dyn BatchRepository>) -> Self {
        Self {
            batch_id,
            batch_repository,
        }
    }
}

#[async_trait]
impl ProgressReporter for RepositoryProgressReporter {
    async fn status_changed(&self, status: BatchStatus) {
        tracing::debug!(status = %status, "Batch status transition");
        if let Err(e) = self.batch_repository.set_status(self.batch_id, status).await {
            tracing::warn!(error = %e, status = %status, "Failed to store batch status");
        }
    }

    async fn progress_changed(&self, progress: BatchProgress) {
        tracing::debug!(
            completed_pages = progress.completed_pages,
            total_pages = progress.total_pages,
            fraction = progress.fraction(),
            "Batch progress"
        );
        if let Err(e) = self.batch_repository.set_progress(self.batch_id, progress).await {
            tracing::warn!(error = %e, "Failed to store batch progress");
        }
    }

    async fn page_completed(&self, outcome: &PageOutcome) {
        if let Err(e) = self
            .batch_repository
            .record_page(self.batch_id, outcome.clone())
            .await
        {
            tracing::warn!(error = %e, "Failed to store page result");
        }
    }

    async fn warning(&self, warning: &BatchWarning) {
        if let Err(e) = self
            .batch_repository
            .add_warning(self.batch_id, warning.clone())
            .await
        {
            tracing::warn!(error = %e, "Failed to store batch warning");
        }
    }
}
