//! Stage 2: classify the root cause of the failure
//!
//! Sends the extracted block to the model and parses the completion into a
//! [`RootCauseResult`]. Parsing never fails the request: a malformed
//! completion degrades to error_type "Unknown" with the stripped raw text
//! carried as a best-effort root cause. Only transport errors propagate.

use crate::ai::backend::{BackendError, TextRunner};
use crate::analysis::prompt;
use crate::analysis::response::{strip_code_fences, ParseOutcome};
use crate::analysis::types::{Extraction, RootCauseResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_ERROR_TYPE: &str = "Unknown";
const DEFAULT_ROOT_CAUSE: &str = "Could not determine root cause.";
const DEFAULT_CONFIDENCE: &str = "Low";

#[derive(Debug, Clone, PartialEq)]
struct ClassifierFields {
    error_type: String,
    root_cause: String,
    confidence: String,
}

fn classify_outcome(stripped: &str) -> ParseOutcome<ClassifierFields> {
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => {
            let field = |name: &str, default: &str| {
                value
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or(default)
                    .to_string()
            };

            ParseOutcome::Parsed(ClassifierFields {
                error_type: field("error_type", DEFAULT_ERROR_TYPE),
                root_cause: field("root_cause", DEFAULT_ROOT_CAUSE),
                confidence: field("confidence", DEFAULT_CONFIDENCE),
            })
        }
        Err(_) => ParseOutcome::RawFallback(stripped.to_string()),
    }
}

/// Classifies the failure behind an [`Extraction`] via one model call
pub struct RootCauseClassifier {
    runner: Arc<dyn TextRunner>,
}

impl RootCauseClassifier {
    pub fn new(runner: Arc<dyn TextRunner>) -> Self {
        Self { runner }
    }

    /// Runs the classification prompt and parses the completion.
    ///
    /// # Errors
    ///
    /// Only transport failures from the runner. Content problems are recovered
    /// locally and recorded via signals.
    pub async fn analyze(&self, extraction: &Extraction) -> Result<RootCauseResult, BackendError> {
        let mut signals = vec!["agent2:root_cause".to_string()];

        let prompt = prompt::root_cause_prompt(&extraction.extracted_block);
        let raw = self.runner.run(&prompt).await?;
        let stripped = strip_code_fences(&raw);

        let result = match classify_outcome(&stripped) {
            ParseOutcome::Parsed(fields) | ParseOutcome::Recovered(fields) => {
                debug!(error_type = %fields.error_type, "Classifier completion parsed");
                signals.push("agent2:parsed_json=true".to_string());
                RootCauseResult {
                    error_type: fields.error_type,
                    root_cause: fields.root_cause,
                    confidence: fields.confidence,
                    signals,
                }
            }
            ParseOutcome::RawFallback(raw_text) => {
                debug!("Classifier completion was not JSON, using raw fallback");
                signals.push("agent2:parsed_json=false".to_string());
                signals.push("agent2:raw_fallback".to_string());
                RootCauseResult {
                    error_type: DEFAULT_ERROR_TYPE.to_string(),
                    root_cause: raw_text,
                    confidence: DEFAULT_CONFIDENCE.to_string(),
                    signals,
                }
            }
        };

        Ok(result)
    }
}
