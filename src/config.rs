//! Configuration management for logtriage
//!
//! Settings load from environment variables with sensible defaults and are
//! immutable after startup. There is no configuration file; the CLI can
//! override individual values per invocation.
//!
//! # Environment Variables
//!
//! - `LOGTRIAGE_ENDPOINT`: Ollama endpoint - default: "http://localhost:11434"
//! - `LOGTRIAGE_MODEL`: model name - default: "llama3.1"
//! - `LOGTRIAGE_REQUEST_TIMEOUT`: timeout in seconds - default: "60"
//! - `LOGTRIAGE_MAX_INPUT_CHARS`: raw log cap in characters - default: "20000"
//! - `LOGTRIAGE_LOG_LEVEL`: logging level - default: "info"

use crate::ai::ollama::OllamaRunner;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for logtriage
///
/// Constructed via `Default::default()`, which loads from environment
/// variables with fallback defaults.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Ollama endpoint URL
    pub endpoint: String,

    /// Model name to use for inference
    pub model: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum raw log input, in characters; longer logs keep only the tail
    pub max_input_chars: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        let endpoint =
            env::var("LOGTRIAGE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let model = env::var("LOGTRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs = env::var("LOGTRIAGE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_input_chars = env::var("LOGTRIAGE_MAX_INPUT_CHARS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_INPUT_CHARS);

        let log_level = env::var("LOGTRIAGE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            endpoint,
            model,
            request_timeout_secs,
            max_input_chars,
            log_level,
        }
    }
}

impl TriageConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Endpoint cannot be empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.max_input_chars < 1024 {
            return Err(ConfigError::ValidationFailed(
                "Max input chars must be at least 1024".to_string(),
            ));
        }
        if self.max_input_chars > 10_485_760 {
            return Err(ConfigError::ValidationFailed(
                "Max input chars cannot exceed 10MB".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Creates the configured Ollama runner
    pub fn create_runner(&self) -> Arc<OllamaRunner> {
        Arc::new(OllamaRunner::with_timeout(
            self.endpoint.clone(),
            self.model.clone(),
            Duration::from_secs(self.request_timeout_secs),
        ))
    }
}
