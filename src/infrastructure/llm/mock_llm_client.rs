use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::ports::{LlmClient, LlmClientError, ToolDefinition};

pub const MOCK_DEFAULT_ANSWER: &str = "Summary: Mock analysis of the page\n\
Include or Exclude: Exclude\n\
Reason: Answer produced by the mock provider";

type Responder = Box<dyn Fn(&str) -> Result<String, LlmClientError> + Send + Sync>;

/// Scripted client for tests and dry runs.
///
/// Queued responses are served first, in order. Once the queue is empty the
/// responder (if any) decides based on the prompt, otherwise the default answer
/// is returned. Every prompt received is recorded.
pub struct MockLlmClient {
    queue: Mutex<VecDeque<Result<String, LlmClientError>>>,
    responder: Option<Responder>,
    default_answer: String,
    tools: bool,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            responder: None,
            default_answer: MOCK_DEFAULT_ANSWER.to_string(),
            tools: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_responses(
        self,
        responses: impl IntoIterator<Item = Result<String, LlmClientError>>,
    ) -> Self {
        self.queue.lock().extend(responses);
        self
    }

    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, LlmClientError> + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    pub fn with_default_answer(mut self, answer: impl Into<String>) -> Self {
        self.default_answer = answer.into();
        self
    }

    pub fn with_tools(mut self) -> Self {
        self.tools = true;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    fn answer(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().push(prompt.to_string());

        if let Some(response) = self.queue.lock().pop_front() {
            return response;
        }

        match &self.responder {
            Some(responder) => responder(prompt),
            None => Ok(self.default_answer.clone()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str, _context: &str) -> Result<String, LlmClientError> {
        self.answer(prompt)
    }

    fn supports_tools(&self) -> bool {
        self.tools
    }

    async fn complete_with_tool(
        &self,
        prompt: &str,
        _context: &str,
        tool: &ToolDefinition,
    ) -> Result<String, LlmClientError> {
        if !self.tools {
            return Err(LlmClientError::Unsupported(format!(
                "mock client was built without tool support ({})",
                tool.name
            )));
        }
        self.answer(prompt)
    }
}
