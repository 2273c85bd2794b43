use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::transport::{ApiAuth, log_request, log_response, send_json};
use crate::application::ports::{LlmClient, LlmClientError, ToolDefinition};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        name: String,
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

impl AnthropicClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    fn request<'a>(&'a self, prompt: &'a str, context: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            system: context,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            tools: None,
            tool_choice: None,
        }
    }

    async fn send(
        &self,
        request_body: &MessagesRequest<'_>,
    ) -> Result<MessagesResponse, LlmClientError> {
        let auth = ApiAuth::Header {
            name: "x-api-key",
            value: self.api_key.clone(),
        };
        let request = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request_body);

        send_json(auth.apply(request)).await
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, prompt: &str, context: &str) -> Result<String, LlmClientError> {
        log_request("anthropic", prompt);
        let response = self.send(&self.request(prompt, context)).await?;

        let text = response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                _ => None,
            })
            .ok_or_else(|| LlmClientError::InvalidResponse("no text content block".to_string()))?;
        log_response("anthropic", &text);
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
        log_request("anthropic", prompt);
        let mut request_body = self.request(prompt, context);
        request_body.tools = Some(vec![json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": tool.parameters,
        })]);
        request_body.tool_choice = Some(json!({ "type": "tool", "name": tool.name }));

        let response = self.send(&request_body).await?;

        let arguments = response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::ToolUse { input, .. } => Some(input.to_string()),
                _ => None,
            })
            .ok_or_else(|| LlmClientError::MissingToolCall("no tool_use block".to_string()))?;
        log_response("anthropic", &arguments);
        Ok(arguments)
    }
}
