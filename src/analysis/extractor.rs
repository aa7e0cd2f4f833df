//! Stage 1: reduce an arbitrary-length build log to a failure-focused excerpt

use crate::analysis::types::Extraction;
use regex::Regex;
use tracing::debug;

/// Maximum number of matched error lines kept, counted from the end of the
/// log (later failures are more relevant than earlier ones)
const MAX_ERROR_LINES: usize = 30;

/// Number of trailing raw lines used when no line matches the vocabulary
const FALLBACK_LINE_COUNT: usize = 200;

/// Common CI/CD "error-ish" vocabulary, matched as a substring anywhere on a
/// line, case-insensitive
const ERROR_LINE_PATTERN: &str = r"(?i)(error|exception|fail(ed)?|fatal|segmentation fault|cannot find symbol|command not found|permission denied|no such file or directory)";

const EMPTY_SUMMARY: &str = "Empty log";
const EXTRACTED_SUMMARY: &str = "Extracted failure-focused section from CI/CD log";

/// Scans a build log for error-ish lines and produces a bounded excerpt
pub struct LogExtractor {
    error_line: Regex,
}

impl LogExtractor {
    pub fn new() -> Self {
        Self {
            error_line: Regex::new(ERROR_LINE_PATTERN).unwrap(),
        }
    }

    /// Produces the failure-focused [`Extraction`] for a log.
    ///
    /// Empty or blank logs short-circuit with an empty block; otherwise the
    /// excerpt is the last [`MAX_ERROR_LINES`] matching lines, or the last
    /// [`FALLBACK_LINE_COUNT`] raw lines when nothing matches.
    pub fn extract(&self, filename: &str, log: &str) -> Extraction {
        let mut signals = vec!["agent1:log_extractor".to_string()];

        if log.trim().is_empty() {
            debug!(filename, "Empty log, skipping scan");
            signals.push("agent1:empty_log".to_string());
            return Extraction {
                filename: filename.to_string(),
                summary: EMPTY_SUMMARY.to_string(),
                extracted_block: String::new(),
                signals,
            };
        }

        let matched: Vec<&str> = log
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && self.error_line.is_match(line))
            .collect();

        let extracted_block = if !matched.is_empty() {
            debug!(filename, matches = matched.len(), "Found error-ish lines");
            signals.push(format!("agent1:found_error_lines={}", matched.len()));

            let from = matched.len().saturating_sub(MAX_ERROR_LINES);
            matched[from..].join("\n")
        } else {
            debug!(filename, "No error-ish lines, falling back to log tail");
            signals.push(format!("agent1:fallback_last_lines={}", FALLBACK_LINE_COUNT));

            let lines: Vec<&str> = log.lines().collect();
            let from = lines.len().saturating_sub(FALLBACK_LINE_COUNT);
            lines[from..].join("\n").trim().to_string()
        };

        Extraction {
            filename: filename.to_string(),
            summary: EXTRACTED_SUMMARY.to_string(),
            extracted_block,
            signals,
        }
    }
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self::new()
    }
}
