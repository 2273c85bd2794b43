mod batch_id;
mod batch_progress;
mod batch_report;
mod batch_run;
mod batch_status;
mod batch_warning;
mod classification_record;
mod document;
mod document_id;
mod page_outcome;
mod project_record;
mod verdict;

pub use batch_id::BatchId;
pub use batch_progress::BatchProgress;
pub use batch_report::BatchReport;
pub use batch_run::BatchRun;
pub use batch_status::BatchStatus;
pub use batch_warning::BatchWarning;
pub use classification_record::{
    BLANK_PAGE_REASON, BLANK_PAGE_SUMMARY, ClassificationFields, ClassificationRecord,
    ERROR_OCCURRED, MANUAL_CHECK_SUMMARY, MISSING_FIELD, MODEL_UNABLE_REASON,
};
pub use document::{ContentType, SourceDocument, UploadedDocument};
pub use document_id::DocumentId;
pub use page_outcome::PageOutcome;
pub use project_record::{ProjectFacts, ProjectRecord};
pub use verdict::{UNKNOWN_VERDICT_LABEL, Verdict};
