use async_trait::async_trait;

use crate::application::ports::{DocumentError, DocumentReader, PagedText};
use crate::domain::{ContentType, SourceDocument};

pub const PAGE_BREAK: char = '\x0c';

/// UTF-8 text where form feeds separate pages, as produced by `pdftotext`.
pub struct PlainTextDocumentReader;

#[async_trait]
impl DocumentReader for PlainTextDocumentReader {
    async fn open(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<PagedText, DocumentError> {
        if document.content_type != ContentType::Text {
            return Err(DocumentError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        if data.is_empty() {
            return Err(DocumentError::Empty(document.filename.clone()));
        }

        let text = std::str::from_utf8(data).map_err(|e| DocumentError::Corrupt(e.to_string()))?;

        // pdftotext ends the last page with a form feed too
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);

        Ok(PagedText::new(
            text.split(PAGE_BREAK).map(str::to_string).collect(),
        ))
    }
}
