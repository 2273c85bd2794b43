use chrono::{DateTime, Utc};

use super::{
    BatchId, BatchProgress, BatchStatus, BatchWarning, ClassificationRecord, PageOutcome,
    ProjectRecord,
};

/// State of one analyze invocation as seen from outside the pipeline.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub id: BatchId,
    pub status: BatchStatus,
    pub document_count: usize,
    pub progress: BatchProgress,
    pub page_results: Vec<ClassificationRecord>,
    pub project_records: Vec<ProjectRecord>,
    pub warnings: Vec<BatchWarning>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BatchRun {
    pub fn new(document_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id: BatchId::new(),
            status: BatchStatus::Idle,
            document_count,
            progress: BatchProgress::default(),
            page_results: Vec::new(),
            project_records: Vec::new(),
            warnings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_page(&mut self, outcome: PageOutcome) {
        let (classification, projects) = outcome.into_parts();
        self.page_results.push(classification);
        self.project_records.extend(projects);
        self.touch();
    }

    /// A finished run always reports 1.0, including a batch that had no readable pages.
    pub fn progress_fraction(&self) -> f64 {
        if self.status == BatchStatus::Done {
            1.0
        } else {
            self.progress.fraction()
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
