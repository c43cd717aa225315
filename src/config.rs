use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Default base URL of the hosted inference endpoint.
pub const DEFAULT_SUMMARIZER_URL: &str = "https://api-inference.huggingface.co";
/// Default summarization model, matching the reference deployment.
pub const DEFAULT_SUMMARIZER_MODEL: &str = "facebook/bart-large-cnn";
/// Default number of sentences retained by the extractive ranker.
pub const DEFAULT_EXTRACTIVE_SENTENCES: usize = 3;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Textsum server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port (defaults to 5000).
    pub server_port: Option<u16>,
    /// Base URL of the abstractive summarization endpoint.
    pub summarizer_url: String,
    /// Model identifier passed to the summarization endpoint.
    pub summarizer_model: String,
    /// Optional bearer token forwarded to the summarization endpoint.
    pub summarizer_api_key: Option<String>,
    /// Optional per-call deadline for model inference, in seconds.
    pub summarizer_timeout_secs: Option<u64>,
    /// Optional override for the chunker word budget (defaults to 900).
    pub chunk_max_words: Option<usize>,
    /// Number of sentences selected by the extractive ranker.
    pub extractive_sentences: usize,
    /// Whether to compute the extractive summary for internal reporting.
    pub extractive_report: bool,
    /// Emit ranked sentences in document order instead of score order.
    pub extractive_document_order: bool,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            summarizer_url: load_env_optional("SUMMARIZER_URL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_URL.to_string()),
            summarizer_model: load_env_optional("SUMMARIZER_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_MODEL.to_string()),
            summarizer_api_key: load_env_optional("SUMMARIZER_API_KEY"),
            summarizer_timeout_secs: load_env_optional("SUMMARIZER_TIMEOUT_SECS")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SUMMARIZER_TIMEOUT_SECS".into()))
                })
                .transpose()?,
            chunk_max_words: load_env_optional("CHUNK_MAX_WORDS")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("CHUNK_MAX_WORDS".into()))
                })
                .transpose()?,
            extractive_sentences: load_env_optional("EXTRACTIVE_SENTENCES")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("EXTRACTIVE_SENTENCES".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_EXTRACTIVE_SENTENCES),
            extractive_report: load_env_flag("EXTRACTIVE_REPORT", true)?,
            extractive_document_order: load_env_flag("EXTRACTIVE_DOCUMENT_ORDER", false)?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match load_env_optional(key) {
        None => Ok(default),
        Some(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        },
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        summarizer_url = %config.summarizer_url,
        model = %config.summarizer_model,
        server_port = ?config.server_port,
        chunk_max_words = ?config.chunk_max_words,
        extractive_report = config.extractive_report,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
pub(crate) fn ensure_test_config() {
    let _ = CONFIG.set(Config {
        server_port: None,
        summarizer_url: "http://127.0.0.1:9".into(),
        summarizer_model: "test-model".into(),
        summarizer_api_key: None,
        summarizer_timeout_secs: Some(5),
        chunk_max_words: Some(12),
        extractive_sentences: 3,
        extractive_report: true,
        extractive_document_order: false,
    });
}
