use config::{Config, File};
use serde::Deserialize;
use thiserror::Error;

use super::Environment;
use crate::application::services::result_parser::ProjectLineFilter;
use crate::application::services::{ClassificationMode, PromptTemplates};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub prompts: PromptSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    #[serde(rename = "lmstudio")]
    LmStudio,
    #[serde(rename = "openai_completions")]
    OpenAiCompletions,
    Anthropic,
    Mock,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Azure => "azure",
            LlmProvider::LmStudio => "lmstudio",
            LlmProvider::OpenAiCompletions => "openai_completions",
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::Mock => "mock",
        }
    }

    /// Raw text completion endpoints cannot be forced into a function call.
    pub fn supports_tools(&self) -> bool {
        !matches!(self, LlmProvider::OpenAiCompletions | LlmProvider::Mock)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    #[serde(default)]
    pub api_key: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    #[serde(default = "default_azure_api_version")]
    pub azure_api_version: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_azure_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub classification_mode: ClassificationMode,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    #[serde(default)]
    pub project_line_filter: ProjectLineFilter,
    #[serde(default = "default_skip_blank_pages")]
    pub skip_blank_pages: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            classification_mode: ClassificationMode::default(),
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
            project_line_filter: ProjectLineFilter::default(),
            skip_blank_pages: default_skip_blank_pages(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_secs() -> u64 {
    2
}

fn default_skip_blank_pages() -> bool {
    true
}

/// Optional template overrides. Unset fields keep the built-in wording.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptSettings {
    pub system_context: Option<String>,
    pub classification: Option<String>,
    pub structured_classification: Option<String>,
    pub extraction: Option<String>,
}

impl PromptSettings {
    pub fn templates(&self) -> PromptTemplates {
        let mut templates = PromptTemplates::default();
        if let Some(system_context) = &self.system_context {
            templates.system_context = system_context.clone();
        }
        if let Some(classification) = &self.classification {
            templates.classification = classification.clone();
        }
        if let Some(structured) = &self.structured_classification {
            templates.structured_classification = structured.clone();
        }
        if let Some(extraction) = &self.extraction {
            templates.extraction = extraction.clone();
        }
        templates
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub max_file_size_mb: usize,
    #[serde(default = "default_extraction_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_extraction_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    #[serde(default)]
    pub enable_json: bool,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{environment}.toml` and `APP_*`
    /// environment variables (`__` separates nested keys).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.max_tokens", 1024)?
            .set_default("llm.temperature", 0.0)?
            .set_default("extraction.max_file_size_mb", 50)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;

        if llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }

        if llm.provider != LlmProvider::Mock && llm.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "llm.api_key is required for provider {}",
                llm.provider.as_str()
            )));
        }

        let needs_base_url = matches!(
            llm.provider,
            LlmProvider::LmStudio | LlmProvider::OpenAiCompletions
        );
        if needs_base_url && llm.base_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "llm.base_url is required for provider {}",
                llm.provider.as_str()
            )));
        }

        if llm.provider == LlmProvider::Azure
            && llm
                .azure_endpoint
                .as_deref()
                .is_none_or(|e| e.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "llm.azure_endpoint is required for provider azure".to_string(),
            ));
        }

        if self.pipeline.classification_mode == ClassificationMode::ToolCall
            && !llm.provider.supports_tools()
        {
            return Err(ConfigError::Invalid(format!(
                "pipeline.classification_mode tool_call is not supported by provider {}",
                llm.provider.as_str()
            )));
        }

        if self.pipeline.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.max_attempts must be at least 1".to_string(),
            ));
        }

        let missing = self.prompts.templates().missing_placeholders();
        if !missing.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "prompt templates missing {{page}} placeholder: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
