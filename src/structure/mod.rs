//! Heuristic discovery of array descriptors.
//!
//! Looks for two consecutive big-endian u32 words `(count, size)` where both
//! are small and non-zero, the shape of an array header such as "12 entries
//! of 40 bytes". This is a heuristic: most hits in real data are noise, and
//! the default bounds are the open interval `(0, 1000)`.

use crate::formats::dat::utils::ReadExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Default chunk size for the scan (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
/// Bytes read per window: two u32 words.
pub const WINDOW_LEN: usize = 8;

/// A window that looks like an array header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayCandidate {
    pub offset: usize,
    pub count: u32,
    pub size: u32,
}

impl ArrayCandidate {
    /// Bytes the described array would occupy.
    pub fn span(&self) -> u64 {
        u64::from(self.count) * u64::from(self.size)
    }
}

/// Exclusive upper bounds for a qualifying window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayHeuristic {
    pub max_count: u32,
    pub max_element_size: u32,
}

impl Default for ArrayHeuristic {
    fn default() -> Self {
        Self {
            max_count: 1000,
            max_element_size: 1000,
        }
    }
}

impl ArrayHeuristic {
    #[inline(always)]
    pub fn qualifies(&self, count: u32, size: u32) -> bool {
        count > 0 && count < self.max_count && size > 0 && size < self.max_element_size
    }
}

/// Scan `data` with the default bounds.
pub fn scan(data: &[u8], chunk_size: usize) -> Vec<ArrayCandidate> {
    scan_with(data, chunk_size, &ArrayHeuristic::default())
}

/// Scan `data` chunk by chunk.
///
/// Each chunk reaches [`WINDOW_LEN`] bytes past its nominal end so windows
/// straddling a boundary are still seen. Offsets revisited by that overlap
/// collapse to a single candidate. Results are sorted by offset.
pub fn scan_with(data: &[u8], chunk_size: usize, heuristic: &ArrayHeuristic) -> Vec<ArrayCandidate> {
    let chunk_size = chunk_size.max(1);
    let mut found: BTreeMap<usize, ArrayCandidate> = BTreeMap::new();

    let mut chunk_start = 0;
    while chunk_start < data.len() {
        let chunk_end = chunk_start
            .saturating_add(chunk_size)
            .saturating_add(WINDOW_LEN)
            .min(data.len());
        let chunk = &data[chunk_start..chunk_end];

        for (i, window) in chunk.windows(WINDOW_LEN).enumerate() {
            let (Some(count), Some(size)) = (window.read_u32_be_at(0), window.read_u32_be_at(4))
            else {
                continue;
            };
            if heuristic.qualifies(count, size) {
                let offset = chunk_start + i;
                found.insert(offset, ArrayCandidate { offset, count, size });
            }
        }

        chunk_start = chunk_start.saturating_add(chunk_size);
    }

    debug!(
        candidates = found.len(),
        chunk_size,
        len = data.len(),
        "Array structure scan finished"
    );
    found.into_values().collect()
}
