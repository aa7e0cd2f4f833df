//! Value types flowing through the triage pipeline
//!
//! Each stage produces an immutable value carrying its payload plus the
//! ordered diagnostic signals it recorded. The final [`AnalyzeReport`] is the
//! aggregate handed to callers and serialized at the output boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure-focused excerpt of a build log, produced by the extractor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extraction {
    /// Display name of the analyzed log file
    pub filename: String,
    /// Human label for what the extractor did (e.g. "Empty log")
    pub summary: String,
    /// Bounded excerpt handed to the model stages; possibly empty
    pub extracted_block: String,
    /// Ordered diagnostic signals recorded by the extractor
    pub signals: Vec<String>,
}

/// Structured classification of the failure, produced by the classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootCauseResult {
    /// One of the fixed vocabulary (Build Failure, Dependency Issue, Test
    /// Failure, Timeout, Environment Issue, Lint/Format Issue, Unknown)
    pub error_type: String,
    /// One short sentence, or raw fallback text when parsing failed
    pub root_cause: String,
    /// Low | Medium | High
    pub confidence: String,
    /// Ordered diagnostic signals recorded by the classifier
    pub signals: Vec<String>,
}

/// Raw remediation text, produced by the fix suggester
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixResult {
    /// Possibly multi-line, possibly empty
    pub suggested_fix: String,
    /// Ordered diagnostic signals recorded by the suggester
    pub signals: Vec<String>,
}

/// Final aggregate returned to the caller.
///
/// Serializes with the camelCase field names of the external contract:
/// `errorType`, `rootCause`, `suggestedFix` (the steps, not the raw text),
/// `confidence`, `signals`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    pub error_type: String,
    pub root_cause: String,
    pub suggested_fix: Vec<String>,
    pub confidence: String,
    /// Concatenation of extraction, classification, and fix signals, in that
    /// fixed order; the audit trail of the request
    pub signals: Vec<String>,
}

impl fmt::Display for AnalyzeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} confidence): {}",
            self.error_type, self.confidence, self.root_cause
        )
    }
}
