//! The three-stage triage pipeline
//!
//! Log excerpting, root-cause classification, and fix suggestion, plus the
//! defensive completion parsing shared by the model-backed stages.

pub mod extractor;
pub mod fix;
pub mod prompt;
pub mod response;
pub mod root_cause;
pub mod service;
pub mod types;

pub use extractor::LogExtractor;
pub use fix::FixSuggester;
pub use response::ParseOutcome;
pub use root_cause::RootCauseClassifier;
pub use service::{AnalyzeService, DEFAULT_MAX_INPUT_CHARS};
pub use types::{AnalyzeReport, Extraction, FixResult, RootCauseResult};
