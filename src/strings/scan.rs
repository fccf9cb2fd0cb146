//! Printable-ASCII run scanner.

use serde::{Deserialize, Serialize};

/// A run of printable ASCII copied out of the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedString {
    pub offset: usize,
    pub text: String,
}

#[inline(always)]
pub fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}

/// Collect every maximal printable run of at least `min_length` bytes.
///
/// A `min_length` of zero is treated as one, so empty strings are never
/// produced. Results are in ascending offset order and never overlap.
pub fn extract(data: &[u8], min_length: usize) -> Vec<ExtractedString> {
    let min_length = min_length.max(1);
    let mut out = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &b) in data.iter().enumerate() {
        if is_printable(b) {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            push_run(&mut out, data, start, i, min_length);
        }
    }
    if let Some(start) = run_start {
        push_run(&mut out, data, start, data.len(), min_length);
    }

    tracing::debug!(count = out.len(), min_length, "Extracted printable strings");
    out
}

fn push_run(out: &mut Vec<ExtractedString>, data: &[u8], start: usize, end: usize, min: usize) {
    if end - start >= min {
        out.push(ExtractedString {
            offset: start,
            text: data[start..end].iter().map(|&b| b as char).collect(),
        });
    }
}

/// Bytes that may appear in a text file: BEL, BS, TAB, LF, FF, CR, ESC and
/// everything from 0x20 upward except DEL.
#[inline(always)]
fn is_text_byte(b: u8) -> bool {
    matches!(b, 7 | 8 | 9 | 10 | 12 | 13 | 27) || (b >= 0x20 && b != 0x7F)
}

/// Whether `data` looks like text rather than binary.
///
/// Empty input is not considered text.
pub fn is_text(data: &[u8]) -> bool {
    !data.is_empty() && data.iter().all(|&b| is_text_byte(b))
}
