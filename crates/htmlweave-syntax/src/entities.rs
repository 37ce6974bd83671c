//! Character reference decoding for attribute values.

use std::borrow::Cow;

/// Decodes named and numeric character references in an attribute value.
///
/// Unknown references are left as written. The input is borrowed back when
/// it holds no references.
#[must_use]
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}
