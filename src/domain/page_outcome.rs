use super::classification_record::ClassificationRecord;
use super::project_record::ProjectRecord;

/// Everything produced for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    classification: ClassificationRecord,
    projects: Vec<ProjectRecord>,
}

impl PageOutcome {
    /// Project records are discarded unless the page was classified as Include.
    pub fn new(classification: ClassificationRecord, projects: Vec<ProjectRecord>) -> Self {
        let projects = if classification.verdict.is_include() {
            projects
        } else {
            if !projects.is_empty() {
                tracing::warn!(
                    filename = %classification.source_document,
                    page = classification.page_number,
                    dropped = projects.len(),
                    "Dropping project records for a page that is not included"
                );
            }
            Vec::new()
        };

        Self {
            classification,
            projects,
        }
    }

    pub fn classification(&self) -> &ClassificationRecord {
        &self.classification
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn into_parts(self) -> (ClassificationRecord, Vec<ProjectRecord>) {
        (self.classification, self.projects)
    }
}
