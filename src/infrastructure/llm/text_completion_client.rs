use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::transport::{ApiAuth, log_request, log_response, send_json};
use crate::application::ports::{LlmClient, LlmClientError};

/// Client for raw `/completions` endpoints. The system context is prepended to the
/// prompt since the protocol has no message roles.
pub struct TextCompletionClient {
    client: Client,
    base_url: String,
    auth: ApiAuth,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct TextCompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct TextCompletionResponse {
    choices: Vec<TextChoice>,
}

#[derive(Deserialize)]
struct TextChoice {
    text: String,
}

impl TextCompletionClient {
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
            model: model.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl LlmClient for TextCompletionClient {
    async fn complete(&self, prompt: &str, context: &str) -> Result<String, LlmClientError> {
        log_request("completions", prompt);
        let request_body = TextCompletionRequest {
            model: &self.model,
            prompt: format!("{}\n\n{}", context, prompt),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self
            .client
            .post(format!("{}/completions", self.base_url))
            .json(&request_body);
        let response: TextCompletionResponse = send_json(self.auth.apply(request)).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?;
        log_response("completions", &text);
        Ok(text)
    }
}
