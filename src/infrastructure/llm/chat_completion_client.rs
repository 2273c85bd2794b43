use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::transport::{ApiAuth, log_request, log_response, send_json};
use crate::application::ports::{LlmClient, LlmClientError, ToolDefinition};

/// Client for OpenAI-compatible `/chat/completions` endpoints (OpenAI, Azure OpenAI,
/// LM Studio and other local servers speaking the same protocol).
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    auth: ApiAuth,
    api_version: Option<String>,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ChatCompletionResponse {
    pub fn into_text(self) -> Result<String, LlmClientError> {
        self.into_message()?
            .content
            .ok_or_else(|| LlmClientError::InvalidResponse("message has no content".to_string()))
    }

    /// Returns the raw JSON arguments of the first tool call.
    pub fn into_tool_arguments(self) -> Result<String, LlmClientError> {
        self.into_message()?
            .tool_calls
            .into_iter()
            .next()
            .map(|call| call.function.arguments)
            .ok_or_else(|| LlmClientError::MissingToolCall("no tool_calls in message".to_string()))
    }

    fn into_message(self) -> Result<ChatResponseMessage, LlmClientError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}

impl ChatCompletionClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        auth: ApiAuth,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            api_version: None,
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Adds the `api-version` query parameter Azure deployments require.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    async fn send(
        &self,
        request_body: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, LlmClientError> {
        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(request_body);
        if let Some(api_version) = &self.api_version {
            request = request.query(&[("api-version", api_version)]);
        }

        send_json(self.auth.apply(request)).await
    }

    fn request<'a>(&'a self, prompt: &'a str, context: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: context,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            tools: None,
            tool_choice: None,
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str, context: &str) -> Result<String, LlmClientError> {
        log_request("chat_completions", prompt);
        let request_body = self.request(prompt, context);
        let text = self.send(&request_body).await?.into_text()?;
        log_response("chat_completions", &text);
        Ok(text)
    }

    fn supports_tools(&self) -> bool {
        true
    }

    async fn complete_with_tool(
        &self,
        prompt: &str,
        context: &str,
        tool: &ToolDefinition,
    ) -> Result<String, LlmClientError> {
        log_request("chat_completions", prompt);
        let mut request_body = self.request(prompt, context);
        request_body.tools = Some(vec![json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": tool.parameters,
            }
        })]);
        request_body.tool_choice = Some(json!({
            "type": "function",
            "function": { "name": tool.name }
        }));

        let arguments = self.send(&request_body).await?.into_tool_arguments()?;
        log_response("chat_completions", &arguments);
        Ok(arguments)
    }
}
