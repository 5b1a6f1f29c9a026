//! Locate the media URL embedded in a metadata payload.
//!
//! Works on raw bytes so the URL comes back exactly as the payload carries it,
//! even when the payload is not valid UTF-8.

use std::borrow::Cow;
use thiserror::Error;

/// Byte terminating the embedded URL.
const TERMINATOR: u8 = b'"';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("marker {0:?} not found")]
    MarkerNotFound(String),
    #[error("terminator not found after marker")]
    TerminatorNotFound,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Returns the bytes between the first `marker` and the next `"`.
///
/// The URL is returned verbatim: no validation, decoding or normalization.
/// Only the first marker occurrence is considered.
pub fn extract_url<'a>(payload: &'a [u8], marker: &[u8]) -> Result<&'a [u8], ExtractError> {
    let start = find(payload, marker)
        .map(|i| i + marker.len())
        .ok_or_else(|| {
            ExtractError::MarkerNotFound(String::from_utf8_lossy(marker).into_owned())
        })?;
    let rest = &payload[start..];
    let end = rest
        .iter()
        .position(|&b| b == TERMINATOR)
        .ok_or(ExtractError::TerminatorNotFound)?;
    Ok(&rest[..end])
}

/// Text form of an extracted URL for the HTTP client.
///
/// Valid UTF-8 is passed through untouched. Otherwise every byte at or above
/// 0x80 is percent-encoded, which is how such a byte goes out on the wire.
pub fn url_text(raw: &[u8]) -> Cow<'_, str> {
    if let Ok(s) = std::str::from_utf8(raw) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for &b in raw {
        if b.is_ascii() {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    Cow::Owned(out)
}
