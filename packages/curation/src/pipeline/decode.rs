//! Decode structured JSON out of free-form model replies.

use serde::de::DeserializeOwned;

/// Slice out the outermost JSON object in a model reply.
///
/// Models wrap JSON in prose or markdown fences often enough that
/// parsing the whole reply is unreliable. Taking the first `{` through
/// the last `}` strips the wrapping; if no brace pair exists the text
/// comes back unchanged and parsing fails downstream.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Outcome of decoding one model reply.
///
/// A reply that cannot be parsed is not an error for the pipeline; each
/// stage decides what a parse failure costs (a batch, a dedup pass), so
/// this is a value rather than an `Err`.
#[derive(Debug)]
pub enum Decoded<T> {
    /// The reply contained a parseable payload.
    Parsed(T),
    /// The reply could not be parsed; carries the raw text for logging.
    ParseFailure { raw: String, reason: String },
}

impl<T> Decoded<T> {
    /// Whether decoding succeeded.
    pub fn is_parsed(&self) -> bool {
        matches!(self, Decoded::Parsed(_))
    }
}

/// Decode a typed payload from a model reply.
pub fn decode_response<T: DeserializeOwned>(text: &str) -> Decoded<T> {
    let candidate = extract_json_object(text);
    match serde_json::from_str(candidate) {
        Ok(value) => Decoded::Parsed(value),
        Err(e) => Decoded::ParseFailure {
            raw: text.to_string(),
            reason: e.to_string(),
        },
    }
}
