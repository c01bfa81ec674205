use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

use crate::automation::result_to_value;
use crate::errors::AgentError;
use crate::models::message::Message;
use crate::models::role::Role;
use crate::models::tool::ToolCall;
use crate::providers::base::{Completion, Provider};
use crate::tools::{ToolHandler, ToolRegistry};

pub const SYSTEM_PROMPT: &str = "You are Jarvis, an advanced AI assistant. You can help with automation tasks by calling tools. Be concise, professional, and slightly witty like the Jarvis from Iron Man.";

pub const APOLOGY_PREFIX: &str = "I'm sorry, I encountered an error: ";

pub const FOLLOW_UP_FALLBACK: &str = "Automation triggered, but I couldn't get a final response.";

/// What happened to one tool call from the model
#[derive(Debug, Clone, PartialEq)]
pub enum ToolDispatch {
    /// A handler ran (or rejected the arguments); `result` is what the model sees
    Recognized {
        id: String,
        name: String,
        result: Value,
    },
    /// No handler is registered under `name`; no tool result is produced
    Unrecognized { id: String, name: String },
    /// The id repeats an earlier call in the same response; skipped
    Duplicate { id: String, name: String },
}

impl ToolDispatch {
    pub fn is_recognized(&self) -> bool {
        matches!(self, ToolDispatch::Recognized { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The model answered without calling tools
    Answered,
    /// Tools ran and the model produced a follow-up answer
    ToolsDispatched(Vec<ToolDispatch>),
    /// The first completion call failed; nothing else ran
    CompletionFailed(AgentError),
    /// Tools ran but the follow-up completion call failed
    FollowUpFailed {
        dispatches: Vec<ToolDispatch>,
        error: AgentError,
    },
}

/// The result of one chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub response: String,
    pub history: Vec<Message>,
    pub outcome: TurnOutcome,
}

impl ChatTurn {
    /// The history to hand back to the caller; withheld when the first completion failed
    pub fn reply_history(&self) -> Option<&[Message]> {
        match self.outcome {
            TurnOutcome::CompletionFailed(_) => None,
            _ => Some(&self.history),
        }
    }
}

/// Agent drives one chat turn between the caller, the model and the registered tools
pub struct Agent {
    provider: Arc<dyn Provider>,
    registry: Arc<ToolRegistry>,
    system_prompt: String,
}

impl Agent {
    pub fn new(provider: Arc<dyn Provider>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            registry,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Run one turn: at most one completion offering tools, one round of tool
    /// dispatch, and one follow-up completion without tools.
    pub async fn handle_chat(&self, user_message: &str, history: Vec<Message>) -> ChatTurn {
        let mut messages = history.clone();
        messages.push(Message::user().with_text(user_message));
        if !messages.iter().any(|m| m.role == Role::System) {
            messages.insert(0, Message::system().with_text(&self.system_prompt));
        }

        let assistant = match self
            .provider
            .complete(&messages, self.registry.tools())
            .await
            .and_then(Completion::into_message)
        {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("completion failed: {}", e);
                return ChatTurn {
                    response: format!("{}{}", APOLOGY_PREFIX, e),
                    history,
                    outcome: TurnOutcome::CompletionFailed(e),
                };
            }
        };

        if !assistant.has_tool_calls() {
            let response = assistant.text().unwrap_or_default().to_string();
            messages.push(assistant);
            return ChatTurn {
                response,
                history: messages,
                outcome: TurnOutcome::Answered,
            };
        }

        let (results, dispatches) = self.dispatch_tool_calls(&assistant.tool_calls).await;
        tracing::info!(
            requested = assistant.tool_calls.len(),
            dispatched = results.len(),
            "tool round finished"
        );

        messages.push(assistant);
        messages.extend(results);

        // Tools are not offered again, so the follow-up cannot chain another call
        match self
            .provider
            .complete(&messages, &[])
            .await
            .and_then(Completion::into_message)
        {
            Ok(final_message) => ChatTurn {
                response: final_message.text().unwrap_or_default().to_string(),
                history: messages,
                outcome: TurnOutcome::ToolsDispatched(dispatches),
            },
            Err(e) => {
                tracing::warn!("follow-up completion failed: {}", e);
                ChatTurn {
                    response: FOLLOW_UP_FALLBACK.to_string(),
                    history: messages,
                    outcome: TurnOutcome::FollowUpFailed {
                        dispatches,
                        error: e,
                    },
                }
            }
        }
    }

    /// Dispatch tool calls strictly in order, producing one tool result per recognized call
    async fn dispatch_tool_calls(&self, calls: &[ToolCall]) -> (Vec<Message>, Vec<ToolDispatch>) {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        let mut dispatches = Vec::new();

        for call in calls {
            let id = call.id.clone();
            let name = call.name().to_string();

            // Endpoints that omit ids leave every call with an empty id; those are never duplicates
            if !call.id.is_empty() && !seen.insert(call.id.as_str()) {
                tracing::warn!(id = %id, tool = %name, "skipping tool call with duplicate id");
                dispatches.push(ToolDispatch::Duplicate { id, name });
                continue;
            }

            let Some(handler) = self.registry.get(&name) else {
                tracing::warn!(id = %id, tool = %name, "skipping unrecognized tool");
                dispatches.push(ToolDispatch::Unrecognized { id, name });
                continue;
            };

            let result = dispatch_tool_call(handler.as_ref(), call).await;
            results.push(Message::tool_result(&id, &name, &result));
            dispatches.push(ToolDispatch::Recognized { id, name, result });
        }

        (results, dispatches)
    }
}

async fn dispatch_tool_call(handler: &dyn ToolHandler, call: &ToolCall) -> Value {
    let arguments = match serde_json::from_str::<Value>(&call.function.arguments) {
        Ok(arguments @ Value::Object(_)) => arguments,
        Ok(other) => {
            let error = AgentError::InvalidParameters(format!(
                "arguments for tool call {} must be a JSON object, got {}",
                call.id, other
            ));
            return json!({ "error": error.to_string() });
        }
        Err(e) => {
            let error = AgentError::InvalidParameters(format!(
                "Could not interpret tool use parameters for id {}: {}",
                call.id, e
            ));
            return json!({ "error": error.to_string() });
        }
    };

    tracing::info!(id = %call.id, tool = %call.name(), "dispatching tool call");
    result_to_value(handler.call(arguments).await)
}
