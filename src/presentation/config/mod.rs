mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ConfigError, ExtractionSettings, LlmProvider, LlmSettings, LoggingSettings,
    PipelineSettings, PromptSettings, ServerSettings, Settings,
};
