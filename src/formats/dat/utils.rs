//! Utility functions for DAT parsing

use crate::formats::dat::types::{FormatError, Result};

/// Extension trait for reading big-endian primitives from byte slices
pub trait ReadExt {
    fn read_u32_be_at(&self, offset: usize) -> Option<u32>;
    fn read_slice_at(&self, offset: usize, len: usize) -> Option<&[u8]>;
}

impl ReadExt for [u8] {
    #[inline(always)]
    fn read_u32_be_at(&self, offset: usize) -> Option<u32> {
        self.get(offset..offset.checked_add(4)?)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_be_bytes)
    }

    #[inline(always)]
    fn read_slice_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.get(offset..offset.checked_add(len)?)
    }
}

/// Read a big-endian u32, reporting truncation against `data.len()`.
#[inline]
pub fn read_u32_be(data: &[u8], offset: usize) -> Result<u32> {
    data.read_u32_be_at(offset).ok_or(FormatError::Truncated {
        offset,
        needed: 4,
        len: data.len(),
    })
}

/// Check that `[offset, offset + size)` lies within `data_len`.
#[inline(always)]
pub fn check_bounds(offset: usize, size: usize, data_len: usize) -> Result<()> {
    match offset.checked_add(size) {
        Some(end) if end <= data_len => Ok(()),
        _ => Err(FormatError::Truncated {
            offset,
            needed: size,
            len: data_len,
        }),
    }
}

/// Keep printable ASCII bytes and drop everything else.
pub fn printable_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| (0x20..=0x7E).contains(*b))
        .map(|&b| b as char)
        .collect()
}
