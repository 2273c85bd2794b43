use serde::Deserialize;

use crate::domain::{ClassificationFields, Verdict};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed tool arguments: {0}")]
    MalformedArguments(String),
    #[error("no tool call in reply: {0}")]
    MissingToolCall(String),
}

#[derive(Deserialize)]
struct PageAnalysisArguments {
    summary: String,
    include_or_exclude: String,
    reason: String,
}

/// Decodes the JSON arguments of a `save_page_analysis` call.
pub fn parse_tool_arguments(raw: &str) -> Result<ClassificationFields, ParseError> {
    let payload = strip_code_fence(raw);
    let arguments: PageAnalysisArguments = serde_json::from_str(payload)
        .map_err(|e| ParseError::MalformedArguments(e.to_string()))?;

    Ok(ClassificationFields {
        summary: arguments.summary.trim().to_string(),
        verdict: Verdict::from_label(&arguments.include_or_exclude),
        reason: arguments.reason.trim().to_string(),
    })
}

// Some OpenAI-compatible servers wrap arguments in a ```json fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
