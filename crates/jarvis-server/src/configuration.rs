use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use jarvis::automation::webhook::WebhookConfig;
use jarvis::providers::configs::OpenAiProviderConfig;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Process-wide settings, read once from the environment at startup
#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub listen_host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub completion_api_url: String,
    pub model_name: String,
    #[serde(default)]
    pub completion_api_key: Option<String>,
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,
    pub automation_webhook_url: String,
    #[serde(default)]
    pub automation_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Self::load()?;
        settings.validate()?;
        Ok(settings)
    }

    fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("listen_host", default_host())?
            .set_default("port", default_port())?
            .set_default("completion_timeout_secs", default_completion_timeout_secs())?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // Handle both NotFound and missing field message variants
                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // Extract field name from error message "missing field `model_name`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                env_var: to_env_var("model_name"),
            });
        }
        check_url("completion_api_url", &self.completion_api_url)?;
        check_url("automation_webhook_url", &self.automation_webhook_url)?;
        Ok(())
    }

    pub fn provider_config(&self) -> OpenAiProviderConfig {
        OpenAiProviderConfig {
            host: self.completion_api_url.clone(),
            model: self.model_name.clone(),
            api_key: self
                .completion_api_key
                .clone()
                .filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(self.completion_timeout_secs),
        }
    }

    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            url: self.automation_webhook_url.clone(),
            timeout: self.automation_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            env_var: to_env_var(field),
            reason: e.to_string(),
        })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_completion_timeout_secs() -> u64 {
    60
}
