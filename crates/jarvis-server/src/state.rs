use jarvis::agent::Agent;
use jarvis::automation::webhook::{WebhookAutomation, WebhookConfig};
use jarvis::errors::AgentResult;
use jarvis::providers::configs::OpenAiProviderConfig;
use jarvis::providers::openai::OpenAiProvider;
use jarvis::tools::default_registry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// Wire the completion and webhook clients into an agent with the default tool set
    pub fn build(provider: OpenAiProviderConfig, webhook: WebhookConfig) -> AgentResult<Self> {
        let provider = Arc::new(OpenAiProvider::new(provider)?);
        let automation = Arc::new(WebhookAutomation::new(webhook)?);
        let registry = Arc::new(default_registry(automation)?);

        Ok(Self::new(Agent::new(provider, registry)))
    }
}
