//! Fixed-width n-gram frequency tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Width used when callers do not ask for one.
pub const DEFAULT_NGRAM_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    count: u64,
    first_seen: usize,
}

/// Occurrence counts of every overlapping `width`-byte window.
#[derive(Debug, Clone, Default)]
pub struct NgramFrequencies {
    width: usize,
    windows: u64,
    table: HashMap<Vec<u8>, Entry>,
}

/// One ranked n-gram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramCount {
    pub pattern: Vec<u8>,
    pub count: u64,
    /// Offset of the first occurrence.
    pub first_offset: usize,
}

impl NgramCount {
    /// Pattern bytes as lower-case hex.
    pub fn pattern_hex(&self) -> String {
        hex::encode(&self.pattern)
    }
}

/// Count the windows starting at each offset in `[0, len - width)`.
///
/// The final full window is not counted, so exactly `len - width` windows
/// are seen. Inputs no longer than `width`, or a zero width, give an empty
/// table.
pub fn ngram_frequencies(data: &[u8], width: usize) -> NgramFrequencies {
    let mut freq = NgramFrequencies {
        width,
        windows: 0,
        table: HashMap::new(),
    };
    if width == 0 {
        return freq;
    }

    let starts = data.len().saturating_sub(width);
    for i in 0..starts {
        let window = &data[i..i + width];
        match freq.table.get_mut(window) {
            Some(entry) => entry.count += 1,
            None => {
                freq.table.insert(
                    window.to_vec(),
                    Entry {
                        count: 1,
                        first_seen: i,
                    },
                );
            }
        }
    }
    freq.windows = starts as u64;
    freq
}

/// The `k` most frequent n-grams by descending count, ties by first offset.
pub fn top_k(freq: &NgramFrequencies, k: usize) -> Vec<NgramCount> {
    let mut ranked: Vec<NgramCount> = freq
        .table
        .iter()
        .map(|(pattern, entry)| NgramCount {
            pattern: pattern.clone(),
            count: entry.count,
            first_offset: entry.first_seen,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.first_offset.cmp(&b.first_offset)));
    ranked.truncate(k);
    ranked
}

impl NgramFrequencies {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of windows counted.
    pub fn windows(&self) -> u64 {
        self.windows
    }

    /// Number of distinct n-grams.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn count(&self, pattern: &[u8]) -> u64 {
        self.table.get(pattern).map_or(0, |e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.table.iter().map(|(k, e)| (k.as_slice(), e.count))
    }
}
