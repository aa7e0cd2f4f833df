//! logtriage - AI-powered CI/CD failure triage from build logs
//!
//! This library diagnoses CI/CD pipeline failures from raw build-log text.
//! A three-stage pipeline extracts the failure-relevant excerpt, classifies
//! the root cause, and proposes a remediation, using a locally hosted model
//! reached through a narrow "run one prompt, get one completion" capability.
//!
//! # Core Concepts
//!
//! - **Text Runners**: the single capability the pipeline needs from a
//!   language model; Ollama-backed in production, scripted in tests
//! - **Extraction**: bounded, failure-focused excerpt of an arbitrary-length
//!   build log
//! - **Signals**: ordered diagnostic tags recorded by each stage: the audit
//!   trail of every decision the pipeline took for a request
//! - **Defensive parsing**: completions are untrusted text; code fences are
//!   stripped and strict parsing degrades to best-effort recovery, so content
//!   problems never fail a request
//!
//! # Example Usage
//!
//! ```ignore
//! use logtriage::{AnalyzeService, TriageConfig};
//! use std::sync::Arc;
//!
//! async fn triage(raw_log: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TriageConfig::default();
//!     config.validate()?;
//!
//!     let service = AnalyzeService::with_max_input_chars(
//!         config.create_runner(),
//!         config.max_input_chars,
//!     );
//!     let report = service.analyze("build.log", raw_log).await?;
//!
//!     println!("{}: {}", report.error_type, report.root_cause);
//!     for step in &report.suggested_fix {
//!         println!("  - {}", step);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`ai`]: runner trait, Ollama client, scripted mock
//! - [`analysis`]: the three pipeline stages and their orchestration
//! - [`cli`]: command-line interface and output formatting
//! - [`config`]: environment-backed configuration

// Public modules
pub mod ai;
pub mod analysis;
pub mod cli;
pub mod config;

// Re-export key types for convenient access
pub use ai::backend::{BackendError, TextRunner, NO_OUTPUT_SENTINEL};
pub use ai::mock::{MockReply, MockRunner};
pub use ai::ollama::OllamaRunner;
pub use analysis::service::{AnalyzeService, DEFAULT_MAX_INPUT_CHARS};
pub use analysis::types::{AnalyzeReport, Extraction, FixResult, RootCauseResult};
pub use config::{ConfigError, TriageConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
