//! Text runner abstraction layer
//!
//! This module provides the core trait and error types for implementing text
//! runners, the single capability the analysis pipeline needs from a language
//! model: execute one prompt, get one completion back. Transport-level
//! failures surface as `BackendError`; content-level problems (malformed or
//! unhelpful completions) are not errors at this layer and are handled by the
//! pipeline's parsing discipline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during runner operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Network-related error
    NetworkError { message: String },

    /// Configuration error (invalid endpoint, missing model, etc.)
    ConfigurationError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// Substituted by runners when the model returns no usable text.
///
/// The pipeline treats this like any other non-JSON completion, so it lands
/// in the raw-fallback parse path rather than failing the request.
pub const NO_OUTPUT_SENTINEL: &str = "(no text output returned by model)";

/// Core trait that all text runners must implement
///
/// This trait provides a uniform interface for executing a prompt against a
/// language model and receiving the free-text completion. The pipeline stages
/// depend only on this capability, never on a specific transport library.
///
/// # Errors
///
/// `run` returns `BackendError` only for transport problems (network failure,
/// timeout, non-2xx status). A completion that is empty or unusable is still
/// `Ok`; implementations substitute [`NO_OUTPUT_SENTINEL`] instead.
#[async_trait]
pub trait TextRunner: Send + Sync {
    /// Executes a prompt and returns the completion text
    async fn run(&self, prompt: &str) -> Result<String, BackendError>;

    /// Returns the human-readable name of this runner
    fn name(&self) -> &str;

    /// Returns optional model information for this runner
    fn model_info(&self) -> Option<String> {
        None
    }
}
