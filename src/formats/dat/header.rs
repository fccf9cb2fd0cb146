//! DAT header decoding

use crate::formats::dat::types::*;
use crate::formats::dat::utils::{printable_ascii, read_u32_be};
use chrono::{DateTime, Utc};

/// Decode the fixed 24-byte header at the start of `data`.
///
/// No magic or checksum validation is performed: any 24 bytes decode.
pub fn decode(data: &[u8]) -> Result<Header> {
    if data.len() < HEADER_LEN {
        return Err(FormatError::Truncated {
            offset: 0,
            needed: HEADER_LEN,
            len: data.len(),
        });
    }

    let mut raw_magic = [0u8; MAGIC_LEN];
    raw_magic.copy_from_slice(&data[..MAGIC_LEN]);

    Ok(Header {
        magic: printable_ascii(&raw_magic),
        raw_magic,
        version: read_u32_be(data, 12)?,
        file_size: read_u32_be(data, 16)?,
        timestamp: read_u32_be(data, 20)?,
    })
}

impl Header {
    /// Creation time as a UTC datetime.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.timestamp), 0)
    }

    /// Whether the recorded size agrees with the real image length.
    pub fn declared_size_matches(&self, actual_len: usize) -> bool {
        u64::from(self.file_size) == actual_len as u64
    }
}
