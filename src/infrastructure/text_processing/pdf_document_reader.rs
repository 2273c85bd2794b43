use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentError, DocumentReader, PagedText};
use crate::domain::{ContentType, SourceDocument};

use super::text_sanitizer::rejoin_hyphenated_lines;

pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the text layer of a PDF, one entry per physical page.
///
/// Pages whose text cannot be extracted are kept as empty strings so page numbers
/// always match the document.
pub struct PdfDocumentReader {
    timeout: Duration,
}

impl Default for PdfDocumentReader {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTION_TIMEOUT)
    }
}

impl PdfDocumentReader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, DocumentError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| DocumentError::Corrupt(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| DocumentError::Corrupt(format!("failed to read page count: {e}")))?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            let text = match doc.extract_text(page_index) {
                Ok(text) => rejoin_hyphenated_lines(&text),
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Page text extraction failed");
                    String::new()
                }
            };
            pages.push(text);
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentReader for PdfDocumentReader {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn open(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<PagedText, DocumentError> {
        if document.content_type != ContentType::Pdf {
            return Err(DocumentError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        if data.is_empty() {
            return Err(DocumentError::Empty(document.filename.clone()));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            DocumentError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            DocumentError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| DocumentError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| DocumentError::ExtractionFailed(format!("task join error: {e}")))??;

        if pages.is_empty() {
            return Err(DocumentError::Empty(document.filename.clone()));
        }

        let blank_pages = pages.iter().filter(|p| p.trim().is_empty()).count();
        tracing::info!(
            page_count = pages.len(),
            blank_pages,
            "PDF text extraction complete"
        );

        Ok(PagedText::new(pages))
    }
}
