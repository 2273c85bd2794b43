mod batch_repository;
mod document_reader;
mod llm_client;
mod progress_reporter;
mod repository_error;

pub use batch_repository::BatchRepository;
pub use document_reader::{DocumentError, DocumentReader, PagedText};
pub use llm_client::{LlmClient, LlmClientError, ToolDefinition};
pub use progress_reporter::{NoopProgressReporter, ProgressReporter};
pub use repository_error::RepositoryError;
