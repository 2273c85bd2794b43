use cranescope::application::services::ClassificationMode;
use cranescope::presentation::config::{
    ConfigError, Environment, ExtractionSettings, LlmProvider, LlmSettings, LoggingSettings,
    PipelineSettings, PromptSettings, ServerSettings, Settings,
};

fn valid_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        llm: LlmSettings {
            provider: LlmProvider::OpenAi,
            api_key: "test-key".to_string(),
            base_url: None,
            azure_endpoint: None,
            azure_api_version: "2024-02-01".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.0,
            request_timeout_secs: 30,
        },
        pipeline: PipelineSettings::default(),
        prompts: PromptSettings::default(),
        extraction: ExtractionSettings {
            max_file_size_mb: 10,
            timeout_secs: 30,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            enable_json: false,
        },
    }
}

fn assert_invalid(settings: Settings, needle: &str) {
    match settings.validate() {
        Err(ConfigError::Invalid(message)) => {
            assert!(message.contains(needle), "unexpected message: {}", message)
        }
        other => panic!("expected invalid configuration, got {:?}", other),
    }
}

#[test]
fn given_complete_settings_when_validating_then_passes() {
    assert!(valid_settings().validate().is_ok());
}

#[test]
fn given_empty_model_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.llm.model = "  ".to_string();

    assert_invalid(settings, "llm.model");
}

#[test]
fn given_empty_api_key_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.llm.api_key = String::new();

    assert_invalid(settings, "llm.api_key");
}

#[test]
fn given_mock_provider_without_api_key_when_validating_then_passes() {
    let mut settings = valid_settings();
    settings.llm.provider = LlmProvider::Mock;
    settings.llm.api_key = String::new();

    assert!(settings.validate().is_ok());
}

#[test]
fn given_lmstudio_without_base_url_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.llm.provider = LlmProvider::LmStudio;

    assert_invalid(settings, "llm.base_url");
}

#[test]
fn given_azure_without_endpoint_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.llm.provider = LlmProvider::Azure;

    assert_invalid(settings, "llm.azure_endpoint");
}

#[test]
fn given_tool_mode_with_text_completions_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.llm.provider = LlmProvider::OpenAiCompletions;
    settings.llm.base_url = Some("http://localhost:8000/v1".to_string());
    settings.pipeline.classification_mode = ClassificationMode::ToolCall;

    assert_invalid(settings, "tool_call");
}

#[test]
fn given_zero_attempts_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.pipeline.max_attempts = 0;

    assert_invalid(settings, "max_attempts");
}

#[test]
fn given_template_override_without_page_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.prompts.classification = Some("Classify this".to_string());

    assert_invalid(settings, "classification");
}

#[test]
fn given_template_override_when_building_templates_then_replaces_only_that_template() {
    let prompts = PromptSettings {
        extraction: Some("Projects on: {page}".to_string()),
        ..PromptSettings::default()
    };

    let templates = prompts.templates();

    assert_eq!(templates.extraction_prompt("x"), "Projects on: x");
    assert!(templates.classification_prompt("x").contains("Include or Exclude"));
}

#[test]
fn given_pipeline_defaults_when_created_then_three_attempts_two_seconds() {
    let pipeline = PipelineSettings::default();

    assert_eq!(pipeline.max_attempts, 3);
    assert_eq!(pipeline.backoff_secs, 2);
    assert!(pipeline.skip_blank_pages);
    assert_eq!(pipeline.classification_mode, ClassificationMode::Labeled);
}

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
    assert_eq!(Environment::Local.file_suffix(), "local");
}
