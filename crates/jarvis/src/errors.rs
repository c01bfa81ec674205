use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Completion request failed: {0}")]
    CompletionTransport(String),

    #[error("Malformed completion response: {0}")]
    CompletionMalformed(String),

    #[error("Automation request failed: {0}")]
    AutomationTransport(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
