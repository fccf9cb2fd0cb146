//! Literal keyword search with a surrounding context window.

use bytes::Bytes;
use memchr::memmem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Bytes of context kept on each side of a match.
pub const DEFAULT_CONTEXT_RADIUS: usize = 32;

/// First occurrence of a keyword and the bytes around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub offset: usize,
    /// Image offset of `context[0]`.
    pub context_start: usize,
    pub context: Bytes,
}

impl KeywordMatch {
    /// Context as space-separated lower-case hex pairs.
    pub fn context_hex(&self) -> String {
        let mut out = String::with_capacity(self.context.len() * 3);
        for (i, b) in self.context.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02x}", b);
        }
        out
    }

    /// Position of the keyword inside `context`.
    pub fn offset_in_context(&self) -> usize {
        self.offset - self.context_start
    }
}

/// Lowest-offset exact match of `keyword` with the default context radius.
pub fn find(data: &[u8], keyword: &[u8]) -> Option<KeywordMatch> {
    find_with_radius(data, keyword, DEFAULT_CONTEXT_RADIUS)
}

/// Lowest-offset exact match of `keyword`.
///
/// The context spans `[offset - radius, offset + keyword.len() + radius)`,
/// clamped to the image. An empty keyword never matches.
pub fn find_with_radius(data: &[u8], keyword: &[u8], radius: usize) -> Option<KeywordMatch> {
    if keyword.is_empty() {
        return None;
    }
    let offset = memmem::find(data, keyword)?;
    let context_start = offset.saturating_sub(radius);
    let context_end = offset
        .saturating_add(keyword.len())
        .saturating_add(radius)
        .min(data.len());
    Some(KeywordMatch {
        offset,
        context_start,
        context: Bytes::copy_from_slice(&data[context_start..context_end]),
    })
}

/// Look up each keyword (UTF-8 encoded). Keywords that are absent are left out.
pub fn find_keywords<S: AsRef<str>>(
    data: &[u8],
    keywords: &[S],
    radius: usize,
) -> BTreeMap<String, KeywordMatch> {
    let mut out = BTreeMap::new();
    for keyword in keywords {
        let keyword = keyword.as_ref();
        if let Some(m) = find_with_radius(data, keyword.as_bytes(), radius) {
            tracing::trace!(keyword, offset = m.offset, "Keyword found");
            out.insert(keyword.to_string(), m);
        }
    }
    out
}
