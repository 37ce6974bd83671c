//! Decoding of `srcset` attribute values into image candidates.
//!
//! A `srcset` value is a comma-separated list of candidates, each made of a
//! URL followed by optional width (`100w`), density (`2x`) or height (`50h`)
//! descriptors. URLs may themselves contain commas, so the split follows the
//! HTML candidate grammar rather than a plain `split(',')`.

use std::ops::Range;

use crate::error::SyntaxError;

/// One image candidate of a `srcset` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcsetCandidate {
    url: String,
    url_range: Range<usize>,
    descriptor: Option<String>,
}

impl SrcsetCandidate {
    /// Returns the candidate URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the byte range of the URL relative to the start of the value.
    #[must_use]
    pub fn url_range(&self) -> Range<usize> {
        self.url_range.clone()
    }

    /// Returns the descriptor text, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }
}

const fn is_html_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

/// Splits a `srcset` value into its candidates.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidSrcset`] when the value holds no candidate
/// or a descriptor is malformed.
pub fn parse_srcset(value: &str) -> Result<Vec<SrcsetCandidate>, SyntaxError> {
    let bytes = value.as_bytes();
    let len = bytes.len();
    let mut candidates = Vec::new();
    let mut pos = 0;

    loop {
        while pos < len && bytes.get(pos).is_some_and(|b| is_html_space(*b) || *b == b',') {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        let url_start = pos;
        while pos < len && bytes.get(pos).is_some_and(|b| !is_html_space(*b)) {
            pos += 1;
        }
        let mut url_end = pos;

        let mut descriptor = None;
        if bytes.get(url_end.saturating_sub(1)) == Some(&b',') {
            while url_end > url_start && bytes.get(url_end - 1) == Some(&b',') {
                url_end -= 1;
            }
        } else {
            let descriptor_start = pos;
            let mut depth = 0_u32;
            while pos < len {
                match bytes.get(pos) {
                    Some(b'(') => depth += 1,
                    Some(b')') => depth = depth.saturating_sub(1),
                    Some(b',') if depth == 0 => break,
                    _ => {}
                }
                pos += 1;
            }
            let text = value.get(descriptor_start..pos).unwrap_or_default().trim();
            if !text.is_empty() {
                validate_descriptor(text)?;
                descriptor = Some(text.to_owned());
            }
        }

        let url = value
            .get(url_start..url_end)
            .ok_or_else(|| SyntaxError::invalid_srcset("candidate is not valid UTF-8"))?;
        if url.is_empty() {
            return Err(SyntaxError::invalid_srcset("candidate has an empty URL"));
        }

        candidates.push(SrcsetCandidate {
            url: url.to_owned(),
            url_range: url_start..url_end,
            descriptor,
        });
    }

    if candidates.is_empty() {
        return Err(SyntaxError::invalid_srcset("no image candidates"));
    }

    Ok(candidates)
}

fn validate_descriptor(text: &str) -> Result<(), SyntaxError> {
    for token in text.split_ascii_whitespace() {
        let split = token.char_indices().last().map_or(0, |(index, _)| index);
        let (number, unit) = token.split_at(split);
        let valid_unit = matches!(unit, "w" | "x" | "h");
        let valid_number = !number.is_empty() && number.parse::<f64>().is_ok_and(|n| n >= 0.0);
        if !valid_unit || !valid_number {
            return Err(SyntaxError::invalid_srcset(format!(
                "invalid descriptor '{token}'"
            )));
        }
    }
    Ok(())
}
