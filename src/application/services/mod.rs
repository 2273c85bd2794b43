mod batch_worker;
mod cancellation;
mod page_pipeline;
pub mod prompt_builder;
pub mod result_parser;
mod retry;
mod text_normalizer;

pub use batch_worker::{BatchMessage, BatchWorker, RepositoryProgressReporter};
pub use cancellation::{CancellationFlag, CancellationRegistry};
pub use page_pipeline::{ClassificationMode, PagePipeline, PipelineOptions};
pub use prompt_builder::{PromptTemplates, page_analysis_tool};
pub use retry::{DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS, RetryPolicy, TerminalFailure};
pub use text_normalizer::normalize_whitespace;
