//! Text runner integrations
//!
//! This module provides the runner abstraction and implementations that power
//! the two model calls in the triage pipeline.

pub mod backend;
pub mod mock;
pub mod ollama;

// Re-export commonly used types
pub use backend::{BackendError, TextRunner, NO_OUTPUT_SENTINEL};
pub use mock::{MockReply, MockRunner};
pub use ollama::OllamaRunner;
