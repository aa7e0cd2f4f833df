//! Ollama HTTP client for local LLM inference
//!
//! This module provides an HTTP client for the Ollama API, used to run the
//! triage prompts against a locally hosted model. Ollama supports various
//! models including Llama, Qwen, Mistral, and others; no API key is required.
//!
//! # Example
//!
//! ```no_run
//! use logtriage::ai::backend::TextRunner;
//! use logtriage::ai::ollama::OllamaRunner;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = OllamaRunner::with_timeout(
//!     "http://localhost:11434".to_string(),
//!     "llama3.1".to_string(),
//!     Duration::from_secs(60),
//! );
//!
//! if runner.health_check().await? {
//!     let completion = runner.run("Summarize this build failure: ...").await?;
//!     println!("{}", completion);
//! }
//! # Ok(())
//! # }
//! ```

use crate::ai::backend::{BackendError, TextRunner, NO_OUTPUT_SENTINEL};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default request timeout for Ollama API calls
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Runner backed by a local Ollama server
///
/// Communicates with Ollama's `/api/generate` endpoint to execute a single
/// prompt and collect the full (non-streamed) completion.
///
/// # Configuration
///
/// - **endpoint**: Ollama API endpoint (e.g., "http://localhost:11434")
/// - **model**: model name (e.g., "llama3.1", "qwen2.5-coder:7b")
/// - **timeout**: request timeout duration
///
/// # Thread Safety
///
/// This runner is thread-safe and can be shared across tasks using `Arc`.
pub struct OllamaRunner {
    endpoint: String,
    model: String,
    http_client: Client,
    timeout: Duration,
}

impl OllamaRunner {
    /// Creates a new Ollama runner with the default timeout
    pub fn new(endpoint: String, model: String) -> Self {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new Ollama runner with a custom timeout
    pub fn with_timeout(endpoint: String, model: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            endpoint,
            model,
            http_client,
            timeout,
        }
    }

    /// Checks if the Ollama server is available and healthy
    ///
    /// Makes a lightweight request to the `/api/tags` endpoint to verify that
    /// Ollama is running and accessible. Returns `Ok(false)` for unreachable
    /// or unresponsive servers rather than an error, so callers can report
    /// availability without failing.
    pub async fn health_check(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/tags", self.endpoint);

        debug!("Checking Ollama health at {}", url);

        match self.http_client.get(&url).send().await {
            Ok(response) => {
                let is_healthy = response.status().is_success();
                if is_healthy {
                    info!("Ollama health check successful");
                } else {
                    warn!(
                        "Ollama health check failed with status: {}",
                        response.status()
                    );
                }
                Ok(is_healthy)
            }
            Err(e) => {
                if e.is_timeout() {
                    warn!("Ollama health check timed out");
                    Ok(false)
                } else if e.is_connect() {
                    warn!("Cannot connect to Ollama at {}", self.endpoint);
                    Ok(false)
                } else {
                    error!("Ollama health check error: {}", e);
                    Err(BackendError::NetworkError {
                        message: format!("Health check failed: {}", e),
                    })
                }
            }
        }
    }

    /// Internal method to call the Ollama generate API
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            temperature: Some(0.1),
            num_predict: Some(512),
        };

        debug!(
            "Sending request to Ollama: model={}, prompt_length={}",
            self.model,
            request.prompt.len()
        );

        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Ollama request timed out after {:?}", self.timeout);
                    BackendError::TimeoutError {
                        seconds: self.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    error!("Cannot connect to Ollama at {}", self.endpoint);
                    BackendError::NetworkError {
                        message: format!("Connection failed: {}", e),
                    }
                } else {
                    error!("Ollama request error: {}", e);
                    BackendError::NetworkError {
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!("Ollama API returned error status {}: {}", status, body);

            if status.as_u16() == 404 && body.contains("model") {
                return Err(BackendError::Other {
                    message: format!(
                        "Model '{}' not found. Please pull it with: ollama pull {}",
                        self.model, self.model
                    ),
                });
            }

            return Err(BackendError::ApiError {
                message: format!("HTTP {}: {}", status, body),
                status_code: Some(status.as_u16()),
            });
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Ollama response body: {}", e);
            BackendError::ApiError {
                message: format!("Invalid response body: {}", e),
                status_code: None,
            }
        })?;

        debug!(
            "Ollama completion received in {:?} ({} chars)",
            start.elapsed(),
            ollama_response.response.len()
        );

        Ok(ollama_response.response)
    }
}

#[async_trait]
impl TextRunner for OllamaRunner {
    async fn run(&self, prompt: &str) -> Result<String, BackendError> {
        let completion = self.generate(prompt).await?;
        let trimmed = completion.trim();

        if trimmed.is_empty() {
            warn!("Model returned no usable text, substituting sentinel");
            return Ok(NO_OUTPUT_SENTINEL.to_string());
        }

        Ok(trimmed.to_string())
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn model_info(&self) -> Option<String> {
        Some(format!("{} @ {}", self.model, self.endpoint))
    }
}

impl fmt::Display for OllamaRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OllamaRunner({} @ {})", self.model, self.endpoint)
    }
}
