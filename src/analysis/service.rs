//! Pipeline orchestration
//!
//! `AnalyzeService` sequences the three stages for one request: truncate the
//! raw log, extract the failure-focused block, classify the root cause,
//! suggest a fix, then assemble the final report. Stages never run
//! concurrently for a single request, since each stage's output is a hard input
//! dependency of the next, and every request issues exactly two model calls.

use crate::ai::backend::{BackendError, TextRunner};
use crate::analysis::extractor::LogExtractor;
use crate::analysis::fix::FixSuggester;
use crate::analysis::root_cause::RootCauseClassifier;
use crate::analysis::types::{AnalyzeReport, RootCauseResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Default cap on raw log input, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;

/// Keeps the trailing `max_chars` characters of an oversized log.
///
/// Failure signal is almost always near the end of a CI log, so the head is
/// the safe part to discard.
fn truncate_tail(log: &str, max_chars: usize) -> String {
    let total = log.chars().count();
    if total <= max_chars {
        return log.to_string();
    }
    log.chars().skip(total - max_chars).collect()
}

/// Splits raw fix text into discrete steps: any line-break variant, trimmed,
/// blank lines dropped, order preserved, no deduplication.
fn split_fix_steps(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Orchestrates the three-stage triage pipeline for one log at a time
pub struct AnalyzeService {
    extractor: LogExtractor,
    classifier: RootCauseClassifier,
    suggester: FixSuggester,
    max_input_chars: usize,
}

impl AnalyzeService {
    pub fn new(runner: Arc<dyn TextRunner>) -> Self {
        Self::with_max_input_chars(runner, DEFAULT_MAX_INPUT_CHARS)
    }

    pub fn with_max_input_chars(runner: Arc<dyn TextRunner>, max_input_chars: usize) -> Self {
        Self {
            extractor: LogExtractor::new(),
            classifier: RootCauseClassifier::new(Arc::clone(&runner)),
            suggester: FixSuggester::new(runner),
            max_input_chars,
        }
    }

    /// Analyzes one build log and returns the aggregated report.
    ///
    /// # Errors
    ///
    /// Transport failures from either model call fail the whole request; no
    /// stage is retried. Content problems never surface here; they are
    /// recovered inside the stages and recorded via signals.
    pub async fn analyze(
        &self,
        filename: &str,
        raw_log: &str,
    ) -> Result<AnalyzeReport, BackendError> {
        let start = Instant::now();

        let log = truncate_tail(raw_log, self.max_input_chars);
        if log.len() != raw_log.len() {
            debug!(
                filename,
                kept = self.max_input_chars,
                "Input truncated to trailing characters"
            );
        }

        let extraction = self.extractor.extract(filename, &log);
        let root_cause = self.classifier.analyze(&extraction).await?;
        let fix = self.suggester.suggest_fix(&extraction, &root_cause).await?;

        let suggested_fix = split_fix_steps(&fix.suggested_fix);

        let RootCauseResult {
            error_type,
            root_cause,
            confidence,
            signals: classification_signals,
        } = root_cause;

        // Audit trail: extraction, then classification, then fix, never
        // reordered or deduplicated.
        let mut signals = extraction.signals;
        signals.extend(classification_signals);
        signals.extend(fix.signals);

        info!(
            filename,
            error_type = %error_type,
            confidence = %confidence,
            steps = suggested_fix.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(AnalyzeReport {
            error_type,
            root_cause,
            suggested_fix,
            confidence,
            signals,
        })
    }
}
