mod composite_document_reader;
mod pdf_document_reader;
mod plain_text_document_reader;
mod text_sanitizer;

pub use composite_document_reader::CompositeDocumentReader;
pub use pdf_document_reader::{DEFAULT_EXTRACTION_TIMEOUT, PdfDocumentReader};
pub use plain_text_document_reader::{PAGE_BREAK, PlainTextDocumentReader};
pub use text_sanitizer::rejoin_hyphenated_lines;
