use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::anthropic_client::{ANTHROPIC_BASE_URL, AnthropicClient};
use super::chat_completion_client::ChatCompletionClient;
use super::mock_llm_client::MockLlmClient;
use super::text_completion_client::TextCompletionClient;
use super::transport::ApiAuth;
use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmClientFactoryError {
    #[error("{0} is required for provider {1}")]
    MissingSetting(&'static str, &'static str),

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let provider = settings.provider;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| LlmClientFactoryError::HttpClient(e.to_string()))?;

        let bearer = ApiAuth::Bearer(settings.api_key.clone());

        let llm_client: Arc<dyn LlmClient> = match provider {
            LlmProvider::OpenAi => Arc::new(ChatCompletionClient::new(
                client,
                settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL),
                bearer,
                &settings.model,
                settings.max_tokens,
                settings.temperature,
            )),
            LlmProvider::LmStudio => Arc::new(ChatCompletionClient::new(
                client,
                required(&settings.base_url, "llm.base_url", provider)?,
                bearer,
                &settings.model,
                settings.max_tokens,
                settings.temperature,
            )),
            LlmProvider::Azure => {
                let endpoint = required(&settings.azure_endpoint, "llm.azure_endpoint", provider)?;
                let deployment_url = format!(
                    "{}/openai/deployments/{}",
                    endpoint.trim_end_matches('/'),
                    settings.model
                );
                let auth = ApiAuth::Header {
                    name: "api-key",
                    value: settings.api_key.clone(),
                };
                Arc::new(
                    ChatCompletionClient::new(
                        client,
                        deployment_url,
                        auth,
                        &settings.model,
                        settings.max_tokens,
                        settings.temperature,
                    )
                    .with_api_version(&settings.azure_api_version),
                )
            }
            LlmProvider::OpenAiCompletions => Arc::new(TextCompletionClient::new(
                client,
                required(&settings.base_url, "llm.base_url", provider)?,
                bearer,
                &settings.model,
                settings.max_tokens,
                settings.temperature,
            )),
            LlmProvider::Anthropic => Arc::new(AnthropicClient::new(
                client,
                settings.base_url.as_deref().unwrap_or(ANTHROPIC_BASE_URL),
                &settings.api_key,
                &settings.model,
                settings.max_tokens,
                settings.temperature,
            )),
            LlmProvider::Mock => Arc::new(MockLlmClient::new().with_tools()),
        };

        tracing::info!(
            provider = provider.as_str(),
            model = %settings.model,
            "LLM client created"
        );

        Ok(llm_client)
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
    provider: LlmProvider,
) -> Result<&'a str, LlmClientFactoryError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(LlmClientFactoryError::MissingSetting(name, provider.as_str()))
}
