use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{
    DocumentReader, LlmClient, LlmClientError, PagedText, ProgressReporter,
};
use crate::domain::{
    BatchProgress, BatchReport, BatchStatus, BatchWarning, ClassificationFields,
    ClassificationRecord, PageOutcome, ProjectRecord, UploadedDocument,
};

use super::cancellation::CancellationFlag;
use super::prompt_builder::{PromptTemplates, page_analysis_tool};
use super::result_parser::{
    ParseError, ProjectLineFilter, parse_labeled_classification, parse_project_lines,
    parse_tool_arguments,
};
use super::retry::{RetryPolicy, TerminalFailure};
use super::text_normalizer::normalize_whitespace;

/// How the classification answer is requested and read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Plain completion with `Summary:` / `Include or Exclude:` / `Reason:` lines.
    #[default]
    Labeled,
    /// Forced function call whose JSON arguments carry the three fields.
    ToolCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub classification_mode: ClassificationMode,
    pub project_line_filter: ProjectLineFilter,
    pub skip_blank_pages: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            classification_mode: ClassificationMode::Labeled,
            project_line_filter: ProjectLineFilter::Lenient,
            skip_blank_pages: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ClassificationError {
    #[error("transport: {0}")]
    Transport(LlmClientError),
    #[error("parse: {0}")]
    Parse(ParseError),
}

/// Classifies every page of a batch and extracts project records from relevant ones.
///
/// Documents and pages are processed strictly in order. Failures are contained at the
/// page or document they happen in: an unreadable document is skipped with a warning,
/// and an LLM call that keeps failing turns into a fallback record, so a run always
/// returns whatever it accumulated.
pub struct PagePipeline {
    llm_client: Arc<dyn LlmClient>,
    document_reader: Arc<dyn DocumentReader>,
    prompts: PromptTemplates,
    retry_policy: RetryPolicy,
    options: PipelineOptions,
}

impl PagePipeline {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        document_reader: Arc<dyn DocumentReader>,
        prompts: PromptTemplates,
        retry_policy: RetryPolicy,
        options: PipelineOptions,
    ) -> Self {
        Self {
            llm_client,
            document_reader,
            prompts,
            retry_policy,
            options,
        }
    }

    pub async fn analyze(
        &self,
        documents: &[UploadedDocument],
        reporter: &dyn ProgressReporter,
        cancel: &CancellationFlag,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        reporter.status_changed(BatchStatus::Counting).await;
        let page_counts = self.count_pages(documents, reporter, &mut report).await;
        let total_pages: usize = page_counts.iter().flatten().sum();
        tracing::info!(
            documents = documents.len(),
            total_pages,
            "Page count complete"
        );

        report.progress = BatchProgress::new(total_pages);
        reporter.status_changed(BatchStatus::Running).await;
        reporter.progress_changed(report.progress).await;

        for (upload, counted) in documents.iter().zip(page_counts) {
            let Some(counted) = counted else {
                continue;
            };

            let flow = self
                .process_document(upload, counted, reporter, cancel, &mut report)
                .await;

            if flow.is_break() {
                report.cancelled = true;
                break;
            }
        }

        let final_status = if report.cancelled {
            tracing::info!(
                completed_pages = report.progress.completed_pages,
                total_pages = report.progress.total_pages,
                "Batch cancelled"
            );
            BatchStatus::Cancelled
        } else {
            tracing::info!(
                pages = report.page_results.len(),
                projects = report.project_records.len(),
                warnings = report.warnings.len(),
                "Batch complete"
            );
            BatchStatus::Done
        };
        reporter.status_changed(final_status).await;

        report
    }

    /// Opens every document once. Unreadable documents count as `None` and are skipped.
    async fn count_pages(
        &self,
        documents: &[UploadedDocument],
        reporter: &dyn ProgressReporter,
        report: &mut BatchReport,
    ) -> Vec<Option<usize>> {
        let mut counts = Vec::with_capacity(documents.len());

        for upload in documents {
            match self.open(upload).await {
                Ok(pages) => counts.push(Some(pages.page_count())),
                Err(warning) => {
                    emit_warning(warning, reporter, report).await;
                    counts.push(None);
                }
            }
        }

        counts
    }

    async fn process_document(
        &self,
        upload: &UploadedDocument,
        counted: usize,
        reporter: &dyn ProgressReporter,
        cancel: &CancellationFlag,
        report: &mut BatchReport,
    ) -> ControlFlow<()> {
        let filename = upload.filename();

        let pages = match self.open(upload).await {
            Ok(pages) => pages,
            Err(warning) => {
                emit_warning(warning, reporter, report).await;
                report.progress.advance(counted);
                reporter.progress_changed(report.progress).await;
                return ControlFlow::Continue(());
            }
        };

        tracing::info!(filename, pages = pages.page_count(), "Processing document");

        for (index, raw) in pages.iter().enumerate() {
            if cancel.is_cancelled() {
                return ControlFlow::Break(());
            }

            let page_number = index as u32 + 1;
            let mut page_warnings = Vec::new();
            let outcome = self
                .process_page(filename, page_number, raw, &mut page_warnings)
                .await;

            for warning in page_warnings {
                emit_warning(warning, reporter, report).await;
            }

            reporter.page_completed(&outcome).await;
            report.push_page(outcome);
            report.progress.advance(1);
            reporter.progress_changed(report.progress).await;
        }

        ControlFlow::Continue(())
    }

    #[tracing::instrument(skip_all, fields(filename = %filename, page = page_number))]
    async fn process_page(
        &self,
        filename: &str,
        page_number: u32,
        raw: &str,
        warnings: &mut Vec<BatchWarning>,
    ) -> PageOutcome {
        let text = normalize_whitespace(raw);

        if self.options.skip_blank_pages && text.trim().is_empty() {
            tracing::debug!("Blank page, skipping model calls");
            return PageOutcome::new(
                ClassificationRecord::blank_page(filename, page_number),
                Vec::new(),
            );
        }

        let classification = self.classify(filename, page_number, &text, warnings).await;
        tracing::debug!(verdict = %classification.verdict, "Page classified");

        let projects = if classification.verdict.is_include() {
            self.extract_projects(filename, page_number, &text, warnings)
                .await
        } else {
            Vec::new()
        };

        PageOutcome::new(classification, projects)
    }

    async fn classify(
        &self,
        filename: &str,
        page_number: u32,
        text: &str,
        warnings: &mut Vec<BatchWarning>,
    ) -> ClassificationRecord {
        let result = match self.options.classification_mode {
            ClassificationMode::Labeled => self.classify_labeled(text).await,
            ClassificationMode::ToolCall => self.classify_with_tool(text).await,
        };

        match result {
            Ok(fields) => ClassificationRecord::new(filename, page_number, fields),
            Err(failure) => {
                warnings.push(BatchWarning::page(
                    filename,
                    page_number,
                    format!(
                        "classification failed after {} attempts: {}",
                        failure.attempts, failure.last_error
                    ),
                ));

                match failure.last_error {
                    ClassificationError::Parse(e) => {
                        tracing::error!(
                            error = %e,
                            "Tool call never decoded, flagging page for review"
                        );
                        ClassificationRecord::unparseable(filename, page_number)
                    }
                    ClassificationError::Transport(e) => {
                        tracing::error!(
                            error = %e,
                            "Classification failed, recording fallback"
                        );
                        ClassificationRecord::transport_failure(filename, page_number)
                    }
                }
            }
        }
    }

    async fn classify_labeled(
        &self,
        text: &str,
    ) -> Result<ClassificationFields, TerminalFailure<ClassificationError>> {
        let prompt = self.prompts.classification_prompt(text);
        let prompt = prompt.as_str();
        let context = self.prompts.system_context.as_str();
        let client = &self.llm_client;

        self.retry_policy
            .run(move || async move {
                let raw = client
                    .complete(prompt, context)
                    .await
                    .map_err(ClassificationError::Transport)?;
                Ok::<_, ClassificationError>(parse_labeled_classification(&raw))
            })
            .await
    }

    async fn classify_with_tool(
        &self,
        text: &str,
    ) -> Result<ClassificationFields, TerminalFailure<ClassificationError>> {
        let prompt = self.prompts.structured_classification_prompt(text);
        let prompt = prompt.as_str();
        let context = self.prompts.system_context.as_str();
        let client = &self.llm_client;
        let tool = page_analysis_tool();
        let tool = &tool;

        self.retry_policy
            .run(move || async move {
                let raw = client
                    .complete_with_tool(prompt, context, tool)
                    .await
                    .map_err(|e| match e {
                        LlmClientError::MissingToolCall(detail) => {
                            ClassificationError::Parse(ParseError::MissingToolCall(detail))
                        }
                        other => ClassificationError::Transport(other),
                    })?;
                parse_tool_arguments(&raw).map_err(ClassificationError::Parse)
            })
            .await
    }

    async fn extract_projects(
        &self,
        filename: &str,
        page_number: u32,
        text: &str,
        warnings: &mut Vec<BatchWarning>,
    ) -> Vec<ProjectRecord> {
        let prompt = self.prompts.extraction_prompt(text);
        let prompt = prompt.as_str();
        let context = self.prompts.system_context.as_str();
        let client = &self.llm_client;

        let raw = match self
            .retry_policy
            .run(move || async move { client.complete(prompt, context).await })
            .await
        {
            Ok(raw) => raw,
            Err(failure) => {
                tracing::error!(error = %failure.last_error, "Project extraction failed");
                warnings.push(BatchWarning::page(
                    filename,
                    page_number,
                    format!(
                        "project extraction failed after {} attempts: {}",
                        failure.attempts, failure.last_error
                    ),
                ));
                return Vec::new();
            }
        };

        let projects: Vec<ProjectRecord> =
            parse_project_lines(&raw, self.options.project_line_filter)
                .into_iter()
                .map(|description| ProjectRecord::new(filename, page_number, description))
                .collect();
        tracing::debug!(projects = projects.len(), "Projects extracted");

        projects
    }

    async fn open(&self, upload: &UploadedDocument) -> Result<PagedText, BatchWarning> {
        self.document_reader
            .open(&upload.data, &upload.document)
            .await
            .map_err(|e| {
                tracing::warn!(filename = %upload.filename(), error = %e, "Skipping document");
                BatchWarning::document(upload.filename(), e.to_string())
            })
    }
}

async fn emit_warning(
    warning: BatchWarning,
    reporter: &dyn ProgressReporter,
    report: &mut BatchReport,
) {
    reporter.warning(&warning).await;
    report.warnings.push(warning);
}
