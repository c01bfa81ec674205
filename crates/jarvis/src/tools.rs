use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::automation::Automation;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::Tool;
use crate::providers::utils::is_valid_function_name;

pub mod trigger_automation;

pub use trigger_automation::TriggerAutomation;

/// A tool the model can call, bound to the code that runs it
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The schema offered to the model
    fn tool(&self) -> &Tool;

    /// Run the tool. Implementations validate the shape of `arguments` themselves.
    async fn call(&self, arguments: Value) -> AgentResult<Value>;
}

/// The set of tools offered to the model, fixed once the gateway starts
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its tool name
    pub fn register<H: ToolHandler + 'static>(&mut self, handler: H) -> AgentResult<()> {
        let tool = handler.tool().clone();
        if !is_valid_function_name(&tool.name) {
            return Err(AgentError::Internal(format!(
                "Tool name '{}' must match [a-zA-Z0-9_-]+",
                tool.name
            )));
        }
        if self.handlers.contains_key(&tool.name) {
            return Err(AgentError::Internal(format!(
                "Duplicate tool name: {}",
                tool.name
            )));
        }

        tracing::debug!(tool = %tool.name, "registering tool");
        self.handlers.insert(tool.name.clone(), Arc::new(handler));
        self.tools.push(tool);
        Ok(())
    }

    pub fn with_handler<H: ToolHandler + 'static>(mut self, handler: H) -> AgentResult<Self> {
        self.register(handler)?;
        Ok(self)
    }

    /// Schemas of every registered tool, in registration order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The registry the gateway ships with: `trigger_automation` backed by `automation`
pub fn default_registry(automation: Arc<dyn Automation>) -> AgentResult<ToolRegistry> {
    ToolRegistry::new().with_handler(TriggerAutomation::new(automation))
}
