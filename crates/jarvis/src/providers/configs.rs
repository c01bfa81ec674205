use std::time::Duration;

pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    /// Base URL; requests go to `{host}/chat/completions`
    pub host: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenAiProviderConfig {
    pub fn new<H: Into<String>, M: Into<String>>(host: H, model: M) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            api_key: None,
            timeout: DEFAULT_COMPLETION_TIMEOUT,
        }
    }
}
