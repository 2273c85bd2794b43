use serde::Serialize;

use super::verdict::Verdict;

pub const MISSING_FIELD: &str = "N/A";
pub const ERROR_OCCURRED: &str = "Error occurred";
pub const MANUAL_CHECK_SUMMARY: &str = "please check the content manually";
pub const MODEL_UNABLE_REASON: &str = "Model not able to analyze the content";
pub const BLANK_PAGE_SUMMARY: &str = "No extractable text on page";
pub const BLANK_PAGE_REASON: &str = "Page has no machine-readable text layer";

/// The three fields a classification response carries, before they are tied to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationFields {
    pub summary: String,
    pub verdict: Verdict,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    pub source_document: String,
    pub page_number: u32,
    pub summary: String,
    pub verdict: Verdict,
    pub reason: String,
}

impl ClassificationRecord {
    pub fn new(
        source_document: impl Into<String>,
        page_number: u32,
        fields: ClassificationFields,
    ) -> Self {
        Self {
            source_document: source_document.into(),
            page_number,
            summary: fields.summary,
            verdict: fields.verdict,
            reason: fields.reason,
        }
    }

    /// Record used when every classification attempt failed at the transport level.
    pub fn transport_failure(source_document: impl Into<String>, page_number: u32) -> Self {
        Self::new(
            source_document,
            page_number,
            ClassificationFields {
                summary: ERROR_OCCURRED.to_string(),
                verdict: Verdict::Exclude,
                reason: ERROR_OCCURRED.to_string(),
            },
        )
    }

    /// Record used when tool-call arguments never decoded. Marked Include for manual review.
    pub fn unparseable(source_document: impl Into<String>, page_number: u32) -> Self {
        Self::new(
            source_document,
            page_number,
            ClassificationFields {
                summary: MANUAL_CHECK_SUMMARY.to_string(),
                verdict: Verdict::Include,
                reason: MODEL_UNABLE_REASON.to_string(),
            },
        )
    }

    pub fn blank_page(source_document: impl Into<String>, page_number: u32) -> Self {
        Self::new(
            source_document,
            page_number,
            ClassificationFields {
                summary: BLANK_PAGE_SUMMARY.to_string(),
                verdict: Verdict::Exclude,
                reason: BLANK_PAGE_REASON.to_string(),
            },
        )
    }
}
