mod anthropic_client;
mod chat_completion_client;
mod llm_client_factory;
mod mock_llm_client;
mod text_completion_client;
mod transport;

pub use anthropic_client::{ANTHROPIC_BASE_URL, AnthropicClient, ContentBlock, MessagesResponse};
pub use chat_completion_client::{ChatCompletionClient, ChatCompletionResponse};
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError, OPENAI_BASE_URL};
pub use mock_llm_client::{MOCK_DEFAULT_ANSWER, MockLlmClient};
pub use text_completion_client::TextCompletionClient;
pub use transport::ApiAuth;
