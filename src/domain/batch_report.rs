use super::{BatchProgress, BatchWarning, ClassificationRecord, PageOutcome, ProjectRecord};

/// Collections accumulated by one pipeline run, returned even when the run was cut short.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub page_results: Vec<ClassificationRecord>,
    pub project_records: Vec<ProjectRecord>,
    pub warnings: Vec<BatchWarning>,
    pub progress: BatchProgress,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn push_page(&mut self, outcome: PageOutcome) {
        let (classification, projects) = outcome.into_parts();
        self.page_results.push(classification);
        self.project_records.extend(projects);
    }
}
