use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::Automation;
use crate::errors::{AgentError, AgentResult};

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    /// Total request timeout; `None` leaves the request unbounded
    pub timeout: Option<Duration>,
}

impl WebhookConfig {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }
}

/// Posts payloads to a workflow webhook (n8n and friends)
pub struct WebhookAutomation {
    client: Client,
    config: WebhookConfig,
}

impl WebhookAutomation {
    pub fn new(config: WebhookConfig) -> AgentResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AgentError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Automation for WebhookAutomation {
    async fn trigger(&self, payload: Value) -> AgentResult<Value> {
        tracing::info!(url = %self.config.url, "triggering automation webhook");

        let response = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::AutomationTransport(e.to_string()))?
            .error_for_status()
            .map_err(|e| AgentError::AutomationTransport(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| AgentError::AutomationTransport(e.to_string()))
    }
}
