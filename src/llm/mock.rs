//! Scripted provider for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value;
use crate::errors::InfraFlowError;
use super::json::parse_json_response;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Returns queued replies in order; once the queue is empty every call fails.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Result<String, InfraFlowError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(InfraFlowError::Network(message)),
            None => Err(InfraFlowError::LLMApi("no scripted reply".into())),
        }
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<LLMResponse, InfraFlowError> {
        let content = self.next(prompt)?;
        Ok(LLMResponse {
            content,
            input_tokens: None,
            output_tokens: None,
            model: "mock-model".to_string(),
        })
    }

    async fn complete_structured(&self, prompt: &str, _schema: &Value, _system: Option<&str>) -> Result<Value, InfraFlowError> {
        let content = self.next(prompt)?;
        parse_json_response(&content)
    }

    fn provider_name(&self) -> &str { "mock" }
    fn model_name(&self) -> &str { "mock-model" }
}
