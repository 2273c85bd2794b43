use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{DocumentError, DocumentReader, PagedText};
use crate::domain::{ContentType, SourceDocument};

use super::{PdfDocumentReader, PlainTextDocumentReader};

pub struct CompositeDocumentReader {
    readers: HashMap<ContentType, Arc<dyn DocumentReader>>,
}

impl CompositeDocumentReader {
    pub fn new(readers: Vec<(ContentType, Arc<dyn DocumentReader>)>) -> Self {
        Self {
            readers: readers.into_iter().collect(),
        }
    }

    /// PDF and plain-text readers, the set the HTTP API accepts.
    pub fn standard(pdf_reader: PdfDocumentReader) -> Self {
        let pdf_reader: Arc<dyn DocumentReader> = Arc::new(pdf_reader);
        let text_reader: Arc<dyn DocumentReader> = Arc::new(PlainTextDocumentReader);
        Self::new(vec![
            (ContentType::Pdf, pdf_reader),
            (ContentType::Text, text_reader),
        ])
    }
}

#[async_trait]
impl DocumentReader for CompositeDocumentReader {
    async fn open(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<PagedText, DocumentError> {
        let reader = self.readers.get(&document.content_type).ok_or_else(|| {
            DocumentError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        reader.open(data, document).await
    }
}
