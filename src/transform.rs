//! Pure transformation from a chant record to the GABC source the notation
//! compiler consumes: a generated metadata header followed by the score body
//! extracted from the record's nested `gabc` field.

use crate::chant::Chant;
use crate::errors::RenderError;

/// Replace the header field separator inside a value.
///
/// Semicolons terminate header fields in GABC, so a raw `;` inside a value
/// would corrupt the header.
fn sanitize(value: &str) -> String {
    value.replace(';', ":")
}

/// Build the GABC header from the chant's metadata.
///
/// Emits only the fields present on the record, in a fixed order, each as a
/// `key:value;` line, followed by the mandatory `%%` separator.
pub fn generate_header(chant: &Chant) -> String {
    let mut lines = Vec::new();

    if let Some(name) = chant.incipit.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("name:{};", sanitize(name)));
    }
    if let Some(part) = chant.office_part.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("office-part:{};", sanitize(part)));
    }
    if let Some(mode) = chant.mode.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("mode:{};", sanitize(mode)));
    }
    if let Some(transcriber) = chant.transcriber.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("transcriber:{};", sanitize(transcriber)));
    }

    let mut header = lines.join("\n");
    header.push_str("\n%%\n");
    header
}

/// Extract the score body from the record's `gabc` field.
///
/// The field holds a JSON-encoded array of `[tag, value]` pairs; the entry
/// tagged `"gabc"` carries the score text. Anything else, a parse failure, or
/// an absent field is `MissingScore`.
pub fn extract_score(chant: &Chant) -> Result<String, RenderError> {
    let raw = chant.gabc.as_deref().ok_or(RenderError::MissingScore)?;

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|_| RenderError::MissingScore)?;

    for entry in &entries {
        if let Some(pair) = entry.as_array() {
            if pair.first().and_then(|tag| tag.as_str()) == Some("gabc") {
                if let Some(score) = pair.get(1).and_then(|body| body.as_str()) {
                    return Ok(score.trim().to_string());
                }
            }
        }
    }

    Err(RenderError::MissingScore)
}

/// Full GABC source for one chant: header + score body.
///
/// Pure; safe to call concurrently and repeatedly on the same record.
pub fn gabc_source(chant: &Chant) -> Result<String, RenderError> {
    let score = extract_score(chant)?;
    Ok(format!("{}{}", generate_header(chant), score))
}
