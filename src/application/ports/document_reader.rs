use async_trait::async_trait;

use crate::domain::SourceDocument;

/// Boundary to the text-layer extraction library.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn open(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<PagedText, DocumentError>;
}

/// Raw text of every page, in physical order. Pages without a text layer are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagedText {
    pages: Vec<String>,
}

impl PagedText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_text(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is empty: {0}")]
    Empty(String),
    #[error("document is corrupt: {0}")]
    Corrupt(String),
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
