//! Output formatting for multiple formats
//!
//! Formatters for JSON (machine-readable), YAML, and human-readable text.
//! JSON and YAML use the report's external serialization contract
//! (`errorType`, `rootCause`, `suggestedFix`, `confidence`, `signals`).

use crate::analysis::types::AnalyzeReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Health status of the model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub endpoint: String,
    pub model: String,
}

/// Output formatter for analysis reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats an analysis report according to the configured format
    pub fn format(&self, filename: &str, report: &AnalyzeReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report as YAML")
            }
            OutputFormat::Human => Ok(self.format_human(filename, report)),
        }
    }

    /// Formats health check results
    pub fn format_health(&self, status: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(status)
                .context("Failed to serialize health status as JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(status)
                .context("Failed to serialize health status as YAML"),
            OutputFormat::Human => Ok(format!(
                "Endpoint: {}\nModel:    {}\nStatus:   {}",
                status.endpoint,
                status.model,
                if status.healthy {
                    "available"
                } else {
                    "unavailable"
                }
            )),
        }
    }

    fn format_human(&self, filename: &str, report: &AnalyzeReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("CI/CD failure analysis: {}\n", filename));
        out.push_str(&format!("Error type: {}\n", report.error_type));
        out.push_str(&format!("Confidence: {}\n", report.confidence));
        out.push_str(&format!("Root cause: {}\n", report.root_cause));

        out.push_str("\nSuggested fix:\n");
        if report.suggested_fix.is_empty() {
            out.push_str("  (none)\n");
        } else {
            for (i, step) in report.suggested_fix.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }

        out.push_str("\nSignals:\n");
        for signal in &report.signals {
            out.push_str(&format!("  - {}\n", signal));
        }

        out
    }
}
