use async_trait::async_trait;
use serde_json::Value;

/// A completion provider reachable as "prompt in, raw text out".
///
/// `context` is the system/role framing sent alongside the single user turn. Adapters
/// that can call functions also expose [`LlmClient::complete_with_tool`], which returns
/// the first tool invocation's arguments as a JSON-encoded string.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, context: &str) -> Result<String, LlmClientError>;

    fn supports_tools(&self) -> bool {
        false
    }

    async fn complete_with_tool(
        &self,
        _prompt: &str,
        _context: &str,
        tool: &ToolDefinition,
    ) -> Result<String, LlmClientError> {
        Err(LlmClientError::Unsupported(format!(
            "tool calling ({}) is not available for this provider",
            tool.name
        )))
    }
}

/// Function signature offered to a tool-calling model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The reply was well formed but answered in text instead of calling the tool.
    #[error("model did not call the tool: {0}")]
    MissingToolCall(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

