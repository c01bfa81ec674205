use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::AgentResult;

pub mod webhook;

#[cfg(test)]
pub mod mock;

/// An external workflow runner that accepts arbitrary JSON payloads
#[async_trait]
pub trait Automation: Send + Sync {
    /// Trigger the workflow once, returning the decoded response body
    async fn trigger(&self, payload: Value) -> AgentResult<Value>;
}

/// Render an automation outcome the way it is reported back to the model:
/// the raw body on success, `{"error": cause}` on failure
pub fn result_to_value(result: AgentResult<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(e) => json!({ "error": e.to_string() }),
    }
}
