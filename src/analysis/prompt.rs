//! Prompts for the two model calls
//!
//! Both prompts are schema-first: the model is told to return ONLY a JSON
//! object, with the expected shape spelled out verbatim. The extracted log
//! block is embedded inside a delimited section so log content cannot be
//! confused with instructions. Parsing still treats the completion as
//! untrusted; see [`crate::analysis::response`].

/// Prompt for the root-cause classification call
pub fn root_cause_prompt(extracted_block: &str) -> String {
    format!(
        r#"Return ONLY valid JSON. No markdown. No extra text.
Schema:
{{
  "error_type": "Build Failure|Dependency Issue|Test Failure|Timeout|Environment Issue|Lint/Format Issue|Unknown",
  "root_cause": "<one short sentence>",
  "confidence": "Low|Medium|High"
}}

Context: You are analyzing a CI/CD pipeline failure.
Use the log block below to decide.

LOG BLOCK:
-----
{block}
-----
"#,
        block = extracted_block
    )
}

/// Prompt for the fix-suggestion call
pub fn fix_prompt(error_type: &str, root_cause: &str, extracted_block: &str) -> String {
    format!(
        r#"Return ONLY valid JSON. No markdown. No extra text.
Schema:
{{
  "suggested_fix": "<max 8 short lines, separated by \n>"
}}

Rules:
- The value must be a JSON string.
- Use \n for line breaks (do NOT put raw newlines inside the string).

You are a senior DevOps engineer.
Make suggestions safe and realistic (no destructive commands).

error_type: {error_type}
root_cause: {root_cause}

LOG BLOCK:
-----
{block}
-----
"#,
        error_type = error_type,
        root_cause = root_cause,
        block = extracted_block
    )
}
