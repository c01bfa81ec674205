use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{Completion, CompletionResult, Provider};

/// One recorded call to the mock provider
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub messages: Vec<Message>,
    pub tools: Vec<Tool>,
}

/// A mock provider that returns pre-configured responses for testing
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<AgentResult<Message>>>>,
    calls: Arc<Mutex<Vec<RecordedCompletion>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<AgentResult<Message>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> CompletionResult {
        self.calls.lock().unwrap().push(RecordedCompletion {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok(Completion::from_message(Message::assistant().with_text("")))
        } else {
            responses.remove(0).map(Completion::from_message)
        }
    }
}
