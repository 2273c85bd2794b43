use serde::Serialize;
use thiserror::Error;

use crate::domain::{ClassificationRecord, ProjectRecord};

pub const PAGES_CSV_HEADER: [&str; 5] = [
    "filename",
    "page",
    "summary",
    "include_or_exclude",
    "reason",
];
pub const PROJECTS_CSV_HEADER: [&str; 3] = ["filename", "page", "project"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv output is not valid UTF-8: {0}")]
    Encoding(String),
}

#[derive(Serialize)]
struct PageRow<'a> {
    filename: &'a str,
    page: u32,
    summary: &'a str,
    include_or_exclude: &'static str,
    reason: &'a str,
}

#[derive(Serialize)]
struct ProjectRow<'a> {
    filename: &'a str,
    page: u32,
    project: &'a str,
}

/// Renders batch results as the two CSV tables reviewers work from.
/// Headers are written even when there are no rows.
pub struct CsvExporter;

impl CsvExporter {
    pub fn pages_csv(records: &[ClassificationRecord]) -> Result<String, ExportError> {
        write_table(
            &PAGES_CSV_HEADER,
            records.iter().map(|record| PageRow {
                filename: &record.source_document,
                page: record.page_number,
                summary: &record.summary,
                include_or_exclude: record.verdict.as_str(),
                reason: &record.reason,
            }),
        )
    }

    pub fn projects_csv(records: &[ProjectRecord]) -> Result<String, ExportError> {
        write_table(
            &PROJECTS_CSV_HEADER,
            records.iter().map(|record| ProjectRow {
                filename: &record.source_document,
                page: record.page_number,
                project: &record.description,
            }),
        )
    }
}

fn write_table<R: Serialize>(
    header: &[&str],
    rows: impl Iterator<Item = R>,
) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}
