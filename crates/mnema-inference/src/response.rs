//! Response-to-record parsing for model output.
//!
//! Models are asked to return only a JSON array, but many wrap the payload
//! in a Markdown code fence or lead with a line of prose anyway. Parsing is
//! a best-effort cleanup (strip the known wrapper markers) followed by a
//! strict parse: the result is either the full record sequence or a
//! `MalformedResponse` error, never a silent partial parse.

use mnema_core::{EnrichmentRecord, Error, Result};
use tracing::debug;

/// Parse a raw model response into enrichment records.
///
/// Strips one leading code-fence marker (optionally tagged, e.g.
/// ```` ```json ````), one trailing fence, and surrounding whitespace, then
/// parses the remainder as JSON. The top-level value must be an array.
///
/// # Errors
/// `MalformedResponse` when the cleaned text is not valid JSON or the
/// top-level value is not an array. Callers are expected to recover locally
/// (log and continue with zero records).
pub fn parse_enrichment_response(raw: &str) -> Result<Vec<EnrichmentRecord>> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| Error::MalformedResponse(format!("invalid JSON: {}", e)))?;

    if !value.is_array() {
        return Err(Error::MalformedResponse(
            "expected a JSON array at the top level".to_string(),
        ));
    }

    let records: Vec<EnrichmentRecord> = serde_json::from_value(value)
        .map_err(|e| Error::MalformedResponse(format!("array items are not records: {}", e)))?;

    debug!(
        subsystem = "inference",
        component = "response",
        result_count = records.len(),
        "parsed enrichment records"
    );
    Ok(records)
}

/// Strip one layer of Markdown code fencing, if present.
///
/// Tolerates a language tag on the opening fence (` ```json `) and leaves
/// text without fences untouched apart from whitespace trimming. Interior
/// fences are not touched; only the outermost wrapper is a formatting
/// artifact.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the tag line: everything up to the first newline belongs to
        // the fence marker, not the payload.
        text = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}
