use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::ToolHandler;
use crate::automation::Automation;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::Tool;

pub const TRIGGER_AUTOMATION: &str = "trigger_automation";

#[derive(Debug, Deserialize)]
struct TriggerAutomationArgs {
    #[allow(dead_code)]
    task_name: String,
    #[allow(dead_code)]
    details: String,
}

/// Forwards the model's arguments to the automation webhook
pub struct TriggerAutomation {
    tool: Tool,
    automation: Arc<dyn Automation>,
}

impl TriggerAutomation {
    pub fn new(automation: Arc<dyn Automation>) -> Self {
        let tool = Tool::new(
            TRIGGER_AUTOMATION,
            "Trigger an automation workflow for a specific task.",
            json!({
                "type": "object",
                "properties": {
                    "task_name": {
                        "type": "string",
                        "description": "The name of the task to automate (e.g., 'send_email', 'update_spreadsheet')."
                    },
                    "details": {
                        "type": "string",
                        "description": "Specific details or parameters for the task."
                    }
                },
                "required": ["task_name", "details"]
            }),
        );

        Self { tool, automation }
    }
}

#[async_trait]
impl ToolHandler for TriggerAutomation {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, arguments: Value) -> AgentResult<Value> {
        // Validate only; the workflow receives the object exactly as the model wrote it
        TriggerAutomationArgs::deserialize(&arguments)
            .map_err(|e| AgentError::InvalidParameters(e.to_string()))?;

        self.automation.trigger(arguments).await
    }
}
