use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::tool::Tool;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One decoded completion response
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

impl Completion {
    /// Wrap a single message as a completion, mostly useful for tests and mocks
    pub fn from_message(message: Message) -> Self {
        Self {
            choices: vec![Choice {
                message,
                finish_reason: None,
            }],
            usage: None,
        }
    }

    /// Take the first choice's message
    pub fn into_message(self) -> AgentResult<Message> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AgentError::CompletionMalformed("response has no choices".to_string()))
    }
}

pub type CompletionResult = AgentResult<Completion>;

/// Base trait for chat completion endpoints
#[async_trait]
pub trait Provider: Send + Sync {
    /// Run one non-streaming completion over the full message sequence.
    /// Tools are offered to the model only when `tools` is non-empty.
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> CompletionResult;

    /// List the models the endpoint serves
    async fn models(&self) -> AgentResult<Value> {
        Err(AgentError::Internal(
            "model listing is not supported by this provider".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_usage_serialization() -> Result<()> {
        let usage = Usage::new(Some(10), Some(20), Some(30));
        let json_value = serde_json::to_value(&usage)?;
        assert_eq!(json_value["input_tokens"], json!(10));
        assert_eq!(json_value["output_tokens"], json!(20));
        assert_eq!(json_value["total_tokens"], json!(30));
        Ok(())
    }

    #[test]
    fn test_into_message_takes_first_choice() {
        let completion = Completion {
            choices: vec![
                Choice {
                    message: Message::assistant().with_text("first"),
                    finish_reason: Some("stop".to_string()),
                },
                Choice {
                    message: Message::assistant().with_text("second"),
                    finish_reason: None,
                },
            ],
            usage: None,
        };

        let message = completion.into_message().unwrap();
        assert_eq!(message.text(), Some("first"));
    }

    #[test]
    fn test_into_message_without_choices() {
        let completion = Completion {
            choices: Vec::new(),
            usage: None,
        };
        assert!(matches!(
            completion.into_message(),
            Err(AgentError::CompletionMalformed(_))
        ));
    }
}
