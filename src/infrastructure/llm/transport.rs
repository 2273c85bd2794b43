use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::application::ports::LlmClientError;
use crate::infrastructure::observability::log_excerpt;

/// How a provider expects the credential to be presented.
#[derive(Debug, Clone)]
pub enum ApiAuth {
    Bearer(String),
    Header { name: &'static str, value: String },
}

impl ApiAuth {
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            ApiAuth::Bearer(key) => request.header("Authorization", format!("Bearer {}", key)),
            ApiAuth::Header { name, value } => request.header(*name, value),
        }
    }
}

/// Sends the request and decodes a JSON body, mapping every failure onto
/// [`LlmClientError`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, LlmClientError> {
    let response = request.send().await.map_err(map_send_error)?;

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(LlmClientError::RateLimited);
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(LlmClientError::ApiRequestFailed(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            LlmClientError::Timeout
        } else {
            LlmClientError::InvalidResponse(e.to_string())
        }
    })
}

fn map_send_error(e: reqwest::Error) -> LlmClientError {
    if e.is_timeout() {
        LlmClientError::Timeout
    } else {
        LlmClientError::ApiRequestFailed(e.to_string())
    }
}

pub(crate) fn log_request(provider: &'static str, prompt: &str) {
    tracing::debug!(provider, prompt = %log_excerpt(prompt), "Sending completion request");
}

pub(crate) fn log_response(provider: &'static str, completion: &str) {
    tracing::debug!(provider, completion = %log_excerpt(completion), "Completion received");
}
