//! Byte-frequency histogram over a whole image.

use serde::{Deserialize, Serialize};

/// Occurrence count per byte value, built in a single pass.
///
/// The first offset at which each value appears is kept so that ranking
/// ties resolve the same way on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteFrequencies {
    counts: [u64; 256],
    first_seen: [Option<usize>; 256],
    total: u64,
}

/// A byte value and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteCount {
    pub byte: u8,
    pub count: u64,
}

/// Count every byte of `data`.
pub fn byte_frequencies(data: &[u8]) -> ByteFrequencies {
    let mut freq = ByteFrequencies::new();
    for (offset, &byte) in data.iter().enumerate() {
        freq.add(byte, offset);
    }
    freq
}

impl ByteFrequencies {
    #[inline]
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            first_seen: [None; 256],
            total: 0,
        }
    }

    #[inline]
    fn add(&mut self, byte: u8, offset: usize) {
        let idx = byte as usize;
        self.counts[idx] += 1;
        self.first_seen[idx].get_or_insert(offset);
        self.total += 1;
    }

    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Offset of the first occurrence of `byte`.
    #[inline]
    pub fn first_seen(&self, byte: u8) -> Option<usize> {
        self.first_seen[byte as usize]
    }

    /// Number of bytes counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Raw 256-bucket histogram.
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// The `k` most frequent values, by descending count then first appearance.
    pub fn most_common(&self, k: usize) -> Vec<ByteCount> {
        let mut present: Vec<(u8, u64, usize)> = (0..=255u8)
            .filter_map(|b| self.first_seen(b).map(|first| (b, self.count(b), first)))
            .collect();
        present.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        present
            .into_iter()
            .take(k)
            .map(|(byte, count, _)| ByteCount { byte, count })
            .collect()
    }

    /// Shannon entropy in bits per byte, between 0.0 and 8.0.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = self.total as f64;
        let mut entropy = 0.0;

        for &count in &self.counts {
            if count == 0 {
                continue;
            }
            let p = (count as f64) / total;
            entropy -= p * p.log2();
        }

        entropy
    }
}

impl Default for ByteFrequencies {
    fn default() -> Self {
        Self::new()
    }
}
