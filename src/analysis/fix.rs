//! Stage 3: suggest a remediation for the classified failure
//!
//! Sends the extracted block plus the classification to the model and parses
//! the completion into a [`FixResult`]. Like classification, content problems
//! never fail the request: a malformed completion goes through best-effort
//! field recovery before degrading to the stripped raw text.

use crate::ai::backend::{BackendError, TextRunner};
use crate::analysis::prompt;
use crate::analysis::response::{recover_string_field, strip_code_fences, ParseOutcome};
use crate::analysis::types::{Extraction, FixResult, RootCauseResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_FIX: &str = "No fix suggestion available.";

fn fix_outcome(stripped: &str) -> ParseOutcome<String> {
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => {
            let fix = value
                .get("suggested_fix")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_FIX)
                .to_string();
            ParseOutcome::Parsed(fix)
        }
        Err(_) => match recover_string_field(stripped, "suggested_fix") {
            Some(fix) => ParseOutcome::Recovered(fix),
            None => ParseOutcome::RawFallback(stripped.trim().to_string()),
        },
    }
}

/// Produces a remediation suggestion via one model call
pub struct FixSuggester {
    runner: Arc<dyn TextRunner>,
}

impl FixSuggester {
    pub fn new(runner: Arc<dyn TextRunner>) -> Self {
        Self { runner }
    }

    /// Runs the fix prompt and parses the completion.
    ///
    /// # Errors
    ///
    /// Only transport failures from the runner. Content problems are recovered
    /// locally and recorded via signals.
    pub async fn suggest_fix(
        &self,
        extraction: &Extraction,
        root_cause: &RootCauseResult,
    ) -> Result<FixResult, BackendError> {
        let mut signals = vec!["agent3:fix_suggester".to_string()];

        let prompt = prompt::fix_prompt(
            &root_cause.error_type,
            &root_cause.root_cause,
            &extraction.extracted_block,
        );
        let raw = self.runner.run(&prompt).await?;
        let stripped = strip_code_fences(&raw);

        let suggested_fix = match fix_outcome(&stripped) {
            ParseOutcome::Parsed(fix) => {
                debug!("Fix completion parsed");
                signals.push("agent3:parsed_json=true".to_string());
                fix
            }
            ParseOutcome::Recovered(fix) => {
                debug!("Fix completion recovered by field extraction");
                signals.push("agent3:parsed_json=false".to_string());
                signals.push("agent3:raw_fallback".to_string());
                signals.push("agent3:best_effort_extract=true".to_string());
                fix
            }
            ParseOutcome::RawFallback(raw_text) => {
                debug!("Fix completion unrecoverable, using raw text");
                signals.push("agent3:parsed_json=false".to_string());
                signals.push("agent3:raw_fallback".to_string());
                signals.push("agent3:best_effort_extract=false".to_string());
                raw_text
            }
        };

        Ok(FixResult {
            suggested_fix,
            signals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{MockReply, MockRunner};

    fn extraction() -> Extraction {
        Extraction {
            filename: "build.log".to_string(),
            summary: "Extracted failure-focused section from CI/CD log".to_string(),
            extracted_block: "npm ERR! 404 Not Found".to_string(),
            signals: vec!["agent1:log_extractor".to_string()],
        }
    }

    fn classification() -> RootCauseResult {
        RootCauseResult {
            error_type: "Dependency Issue".to_string(),
            root_cause: "package missing from registry".to_string(),
            confidence: "High".to_string(),
            signals: vec!["agent2:root_cause".to_string()],
        }
    }

    async fn suggest_with(reply: &str) -> FixResult {
        let runner = Arc::new(MockRunner::new());
        runner.add_reply(MockReply::text(reply));
        FixSuggester::new(runner)
            .suggest_fix(&extraction(), &classification())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_well_formed_json() {
        let result =
            suggest_with(r#"{"suggested_fix": "Run npm install\nCheck package.json"}"#).await;

        assert_eq!(result.suggested_fix, "Run npm install\nCheck package.json");
        assert_eq!(
            result.signals,
            vec!["agent3:fix_suggester", "agent3:parsed_json=true"]
        );
    }

    #[tokio::test]
    async fn test_missing_field_gets_default() {
        let result = suggest_with(r#"{"something_else": true}"#).await;

        assert_eq!(result.suggested_fix, "No fix suggestion available.");
        assert!(result
            .signals
            .contains(&"agent3:parsed_json=true".to_string()));
    }

    #[tokio::test]
    async fn test_best_effort_recovery_from_prose() {
        let result = suggest_with(
            "Sure, here is what I would do: {\"suggested_fix\": \"Run npm install\\nCheck package.json\"}",
        )
        .await;

        assert_eq!(result.suggested_fix, "Run npm install\nCheck package.json");
        assert_eq!(
            result.signals,
            vec![
                "agent3:fix_suggester",
                "agent3:parsed_json=false",
                "agent3:raw_fallback",
                "agent3:best_effort_extract=true"
            ]
        );
    }

    #[tokio::test]
    async fn test_unrecoverable_text_falls_back_raw() {
        let result = suggest_with("Just rerun the job and hope.").await;

        assert_eq!(result.suggested_fix, "Just rerun the job and hope.");
        assert_eq!(
            result.signals,
            vec![
                "agent3:fix_suggester",
                "agent3:parsed_json=false",
                "agent3:raw_fallback",
                "agent3:best_effort_extract=false"
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let runner = Arc::new(MockRunner::new());
        runner.add_reply(MockReply::error(BackendError::TimeoutError {
            seconds: 60,
        }));

        let err = FixSuggester::new(runner)
            .suggest_fix(&extraction(), &classification())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::TimeoutError { .. }));
    }

    #[test]
    fn test_fix_outcome_branches() {
        assert!(fix_outcome(r#"{"suggested_fix": "x"}"#).is_parsed());
        assert!(fix_outcome(r#"oops {"suggested_fix": "x"}"#).is_recovered());
        assert!(matches!(
            fix_outcome("nothing here"),
            ParseOutcome::RawFallback(_)
        ));
    }
}
