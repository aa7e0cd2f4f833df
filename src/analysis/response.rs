//! Defensive parsing of model completions
//!
//! Models are instructed to return bare JSON but frequently wrap it in
//! markdown code fences, prepend prose, or return text that is not JSON at
//! all. The helpers here normalize completions before parsing and recover
//! single fields from near-JSON text, so a malformed completion never fails
//! a request.

use regex::Regex;

/// How a completion was turned into a stage payload.
///
/// An explicit tagged outcome rather than exception-driven control flow, so
/// callers (and tests) can see which branch fired.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// Strict JSON parse of the stripped completion succeeded
    Parsed(T),
    /// Strict parse failed; the payload was recovered by pattern matching
    Recovered(T),
    /// Nothing could be recovered; carries the stripped raw text
    RawFallback(String),
}

impl<T> ParseOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, ParseOutcome::Recovered(_))
    }
}

/// Removes markdown code-fence markup a model may wrap around JSON output.
///
/// Strips every ```` ```json ```` and ```` ``` ```` marker (with trailing
/// whitespace) and trims the result. Deliberately lenient: even when no JSON
/// object is present the stripped text is still useful, since the fallback
/// paths carry it verbatim as best-effort diagnostic text.
pub fn strip_code_fences(raw: &str) -> String {
    let fence_json = Regex::new(r"```json\s*").unwrap();
    let fence = Regex::new(r"```\s*").unwrap();

    let stripped = fence_json.replace_all(raw, "");
    let stripped = fence.replace_all(&stripped, "");
    stripped.trim().to_string()
}

/// Converts JSON string escapes back to literal characters.
///
/// Handles the escapes the prompts instruct models to emit (`\n`, `\t`,
/// `\"`); anything else passes through untouched.
pub fn unescape_json_string(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
}

/// Best-effort recovery of a single string field from near-JSON text.
///
/// Searches for `"<field>": "<value>"` followed by a closing brace,
/// non-greedy, across line breaks. Returns the unescaped, trimmed value.
pub fn recover_string_field(text: &str, field: &str) -> Option<String> {
    let pattern = format!(r#"(?s)"{}"\s*:\s*"(.*?)"\s*\}}"#, regex::escape(field));
    let re = Regex::new(&pattern).unwrap();

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape_json_string(m.as_str()).trim().to_string())
}
