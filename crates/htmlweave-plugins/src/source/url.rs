//! URL classification and request shaping for attribute values.

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Characters that keep their escaped form during normalisation.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// First characters that mark a value as a template expression, anchor or
/// other non-request.
const NON_REQUEST_LEADS: &[char] = &[
    '{', '}', '[', ']', '#', '*', ';', ',', '\'', '§', '$', '%', '&', '(', '=', '?', '`', '´',
    '^', '°', '<', '>',
];

/// Failure to normalise an attribute URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape {
        /// Byte offset of the `%`.
        position: usize,
    },

    /// Decoded bytes are not valid UTF-8.
    #[error("percent-decoded value is not valid UTF-8")]
    InvalidUtf8,
}

/// Reports whether `value` starts with a Windows drive path (`C:\`, `c:/`).
#[must_use]
pub fn is_windows_drive_path(value: &str) -> bool {
    let bytes = value.as_bytes();
    matches!(
        bytes,
        [drive, b':', b'\\' | b'/', ..] if drive.is_ascii_alphabetic()
    )
}

fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Reports whether `value` names a resource the module system should import.
///
/// Empty values, scheme URLs (`data:`, `https:`, `mailto:`), protocol-relative
/// URLs and values opening with a template or anchor character are not
/// requestable. Root-relative URLs are requestable only when a root is
/// configured. Windows drive paths always are.
#[must_use]
pub fn is_url_requestable(value: &str, has_root: bool) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if is_windows_drive_path(trimmed) {
        return true;
    }
    if has_scheme(trimmed) || trimmed.starts_with("//") {
        return false;
    }
    if trimmed.starts_with(NON_REQUEST_LEADS) {
        return false;
    }
    if trimmed.starts_with('/') {
        return has_root;
    }
    true
}

/// Splits an inline loader chain (`style!css!./a.css`) into the chain and the
/// resource.
#[must_use]
pub fn split_loader_prefix(value: &str) -> (Option<&str>, &str) {
    match value.rsplit_once('!') {
        Some((chain, resource)) => (Some(chain), resource),
        None => (None, value),
    }
}

/// Strips tabs and newlines, decodes percent escapes except reserved
/// characters, and turns backslashes into slashes outside drive paths.
///
/// # Errors
///
/// Returns a [`UrlError`] when an escape is malformed or decodes to invalid
/// UTF-8.
pub fn normalize_url(value: &str) -> Result<String, UrlError> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    let mut chunk_start = 0;
    let mut cursor = 0;
    while let Some(offset) = cleaned.get(cursor..).and_then(|rest| rest.find('%')) {
        let at = cursor + offset;
        let byte = cleaned
            .get(at + 1..at + 3)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or(UrlError::MalformedEscape { position: at })?;
        if RESERVED.contains(&byte) {
            decode_chunk(cleaned.get(chunk_start..at).unwrap_or_default(), &mut out)?;
            out.push_str(cleaned.get(at..at + 3).unwrap_or_default());
            chunk_start = at + 3;
        }
        cursor = at + 3;
    }
    decode_chunk(cleaned.get(chunk_start..).unwrap_or_default(), &mut out)?;

    if is_windows_drive_path(&out) {
        Ok(out)
    } else {
        Ok(out.replace('\\', "/"))
    }
}

fn decode_chunk(chunk: &str, out: &mut String) -> Result<(), UrlError> {
    let decoded = percent_decode_str(chunk)
        .decode_utf8()
        .map_err(|_| UrlError::InvalidUtf8)?;
    out.push_str(&decoded);
    Ok(())
}

/// Splits a trailing fragment (`#...`) off `url`.
#[must_use]
pub fn split_hash(url: &str) -> (&str, Option<&str>) {
    match url.rfind('#') {
        Some(index) => {
            let (path, hash) = url.split_at(index);
            (path, Some(hash))
        }
        None => (url, None),
    }
}

/// Turns a requestable URL into an explicit module request.
///
/// Bare relative paths gain `./`, `~module` requests lose the tilde,
/// root-relative paths are prefixed with `root`, and drive paths and
/// `file:` URLs pass through.
#[must_use]
pub fn requestify(url: &str, root: Option<&str>) -> String {
    if is_windows_drive_path(url) || url.get(..5).is_some_and(|s| s.eq_ignore_ascii_case("file:"))
    {
        return url.to_owned();
    }
    if let Some(module) = url.strip_prefix('~') {
        return module.to_owned();
    }
    if url.starts_with('/') {
        return match root {
            Some(root) => format!("{}{url}", root.trim_end_matches('/')),
            None => url.to_owned(),
        };
    }
    if url.starts_with("./") || url.starts_with("../") {
        return url.to_owned();
    }
    format!("./{url}")
}
