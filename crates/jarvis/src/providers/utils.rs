use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;

use super::base::{Choice, Completion, Usage};
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::Tool;

lazy_static! {
    static ref FUNCTION_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Convert internal Tool format to OpenAI's API tool specification
pub fn tools_to_openai_spec(tools: &[Tool]) -> AgentResult<Vec<Value>> {
    let mut tool_names = HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(AgentError::Internal(format!(
                "Duplicate tool name: {}",
                tool.name
            )));
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": tool.parameters,
            }
        }));
    }

    Ok(result)
}

/// Convert OpenAI's API response body to a Completion
pub fn openai_response_to_completion(response: Value) -> AgentResult<Completion> {
    if let Some(error) = response.get("error") {
        return Err(AgentError::CompletionTransport(format!("API error: {}", error)));
    }

    let usage = get_usage(&response);

    let choices = response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .ok_or_else(|| AgentError::CompletionMalformed("missing `choices` array".to_string()))?;

    let choices = choices
        .iter()
        .cloned()
        .map(|mut choice| {
            // Some endpoints leave the role off the returned message
            if let Some(message) = choice.get_mut("message").and_then(Value::as_object_mut) {
                message
                    .entry("role")
                    .or_insert_with(|| json!("assistant"));
            }
            serde_json::from_value::<Choice>(choice)
                .map_err(|e| AgentError::CompletionMalformed(format!("invalid choice: {}", e)))
        })
        .collect::<AgentResult<Vec<_>>>()?;

    if choices.is_empty() {
        return Err(AgentError::CompletionMalformed(
            "response has no choices".to_string(),
        ));
    }

    Ok(Completion { choices, usage })
}

fn get_usage(data: &Value) -> Option<Usage> {
    let usage = data.get("usage")?;

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Some(Usage::new(input_tokens, output_tokens, total_tokens))
}

pub fn is_valid_function_name(name: &str) -> bool {
    FUNCTION_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;
    use anyhow::Result;
    use serde_json::json;

    const OPENAI_TOOL_USE_RESPONSE: &str = r#"{
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "1",
                    "type": "function",
                    "function": {
                        "name": "trigger_automation",
                        "arguments": "{\"task_name\": \"send_email\", \"details\": \"x\"}"
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 25
        }
    }"#;

    fn automation_tool() -> Tool {
        Tool::new(
            "trigger_automation",
            "Trigger an automation",
            json!({
                "type": "object",
                "properties": {
                    "task_name": {"type": "string"}
                },
                "required": ["task_name"]
            }),
        )
    }

    #[test]
    fn test_tools_to_openai_spec() -> Result<()> {
        let spec = tools_to_openai_spec(&[automation_tool()])?;

        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["type"], "function");
        assert_eq!(spec[0]["function"]["name"], "trigger_automation");
        assert_eq!(spec[0]["function"]["parameters"]["required"], json!(["task_name"]));
        Ok(())
    }

    #[test]
    fn test_tools_to_openai_spec_duplicate() {
        let result = tools_to_openai_spec(&[automation_tool(), automation_tool()]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Duplicate tool name"));
    }

    #[test]
    fn test_tools_to_openai_spec_empty() -> Result<()> {
        let spec = tools_to_openai_spec(&[])?;
        assert!(spec.is_empty());
        Ok(())
    }

    #[test]
    fn test_response_to_completion_text() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Hello!"}
            }]
        });

        let completion = openai_response_to_completion(response)?;
        assert_eq!(completion.usage, None);
        let message = completion.into_message()?;
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text(), Some("Hello!"));
        assert!(!message.has_tool_calls());
        Ok(())
    }

    #[test]
    fn test_response_to_completion_tool_call() -> Result<()> {
        let response: Value = serde_json::from_str(OPENAI_TOOL_USE_RESPONSE)?;
        let completion = openai_response_to_completion(response)?;

        assert_eq!(
            completion.usage,
            Some(Usage::new(Some(10), Some(25), Some(35)))
        );
        assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("tool_calls"));

        let message = completion.into_message()?;
        assert_eq!(message.text(), None);
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].id, "1");
        assert_eq!(message.tool_calls[0].name(), "trigger_automation");
        Ok(())
    }

    #[test]
    fn test_response_with_null_tool_calls_is_plain_answer() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Hello!", "tool_calls": null},
                "finish_reason": "stop"
            }]
        });

        let message = openai_response_to_completion(response)?.into_message()?;
        assert_eq!(message.text(), Some("Hello!"));
        assert!(!message.has_tool_calls());
        Ok(())
    }

    #[test]
    fn test_response_without_role_defaults_to_assistant() -> Result<()> {
        let response = json!({"choices": [{"message": {"content": "Done, email sent."}}]});
        let message = openai_response_to_completion(response)?.into_message()?;
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text(), Some("Done, email sent."));
        Ok(())
    }

    #[test]
    fn test_response_missing_choices() {
        let result = openai_response_to_completion(json!({"id": "chatcmpl-1"}));
        assert!(matches!(result, Err(AgentError::CompletionMalformed(_))));
    }

    #[test]
    fn test_response_empty_choices() {
        let result = openai_response_to_completion(json!({"choices": []}));
        assert!(matches!(result, Err(AgentError::CompletionMalformed(_))));
    }

    #[test]
    fn test_response_with_error_body() {
        let result = openai_response_to_completion(json!({
            "error": {"message": "model not found", "code": "model_not_found"}
        }));
        match result {
            Err(AgentError::CompletionTransport(msg)) => assert!(msg.contains("model not found")),
            other => panic!("Expected CompletionTransport, got {:?}", other),
        }
    }

    #[test]
    fn test_is_valid_function_name() {
        assert!(is_valid_function_name("trigger_automation"));
        assert!(is_valid_function_name("hello-world"));
        assert!(!is_valid_function_name("hello world"));
        assert!(!is_valid_function_name("hello@world"));
        assert!(!is_valid_function_name(""));
    }
}
