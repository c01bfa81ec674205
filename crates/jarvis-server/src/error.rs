use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Invalid URL in {env_var}: {reason}")]
    InvalidUrl { env_var: String, reason: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

// Settings fields are read from upper-cased environment variables of the same name
pub fn to_env_var(field_path: &str) -> String {
    field_path.to_uppercase()
}
