//! JavaScript string literal encoding.

use super::GenerationError;

/// Encodes `value` as a double-quoted JavaScript string literal.
///
/// JSON string escaping is used, with U+2028 and U+2029 additionally escaped
/// since older engines treat them as line terminators inside literals.
///
/// # Errors
///
/// Returns [`GenerationError::Encode`] if the encoder fails.
pub fn js_string_literal(value: &str) -> Result<String, GenerationError> {
    let encoded = serde_json::to_string(value).map_err(|error| GenerationError::Encode {
        message: error.to_string(),
    })?;
    if encoded.contains(['\u{2028}', '\u{2029}']) {
        Ok(encoded
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029"))
    } else {
        Ok(encoded)
    }
}
