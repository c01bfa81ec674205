use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::base::{CompletionResult, Provider};
use super::configs::OpenAiProviderConfig;
use super::utils::{openai_response_to_completion, tools_to_openai_spec};
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::tool::Tool;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn post(&self, payload: &CompletionRequest<'_>) -> AgentResult<Value> {
        let response = self
            .authorize(self.client.post(self.url("chat/completions")))
            .json(payload)
            .send()
            .await
            .map_err(|e| AgentError::CompletionTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::CompletionTransport(format!(
                "Server error: {} {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::CompletionMalformed(e.to_string()))
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> CompletionResult {
        let tools_spec = if tools.is_empty() {
            None
        } else {
            Some(tools_to_openai_spec(tools)?)
        };

        let payload = CompletionRequest {
            model: &self.config.model,
            messages,
            stream: false,
            tool_choice: tools_spec.as_ref().map(|_| "auto"),
            tools: tools_spec,
        };

        tracing::debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "requesting completion"
        );

        let response = self.post(&payload).await?;
        let completion = openai_response_to_completion(response)?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                total_tokens = ?usage.total_tokens,
                "completion usage"
            );
        }

        Ok(completion)
    }

    async fn models(&self) -> AgentResult<Value> {
        let response = self
            .authorize(self.client.get(self.url("models")))
            .send()
            .await
            .map_err(|e| AgentError::CompletionTransport(e.to_string()))?
            .error_for_status()
            .map_err(|e| AgentError::CompletionTransport(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| AgentError::CompletionMalformed(e.to_string()))
    }
}
