//! Core DAT data types and structures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes decoded by the header codec.
pub const HEADER_LEN: usize = 24;
/// Size of the header region that precedes the section table.
pub const HEADER_REGION_LEN: usize = 32;
/// Length of the magic field at the start of the header.
pub const MAGIC_LEN: usize = 12;
/// Offset of the section count. Fixed by convention, not derived from the header.
pub const SECTION_TABLE_OFFSET: usize = HEADER_REGION_LEN;
/// Size of one section descriptor (kind + size) preceding its payload.
pub const SECTION_DESCRIPTOR_LEN: usize = 8;

/// DAT parsing error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Truncated data at offset {offset:#x}: need {needed} bytes, image has {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Offset {offset:#x} cannot be represented as a 32-bit value")]
    OffsetOverflow { offset: u64 },
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Decoded fixed-size file header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Printable ASCII from the magic field; other bytes are dropped.
    pub magic: String,
    /// The magic field exactly as stored.
    pub raw_magic: [u8; MAGIC_LEN],
    pub version: u32,
    /// Size recorded by the writer. Not checked against the real length.
    pub file_size: u32,
    /// Creation time, seconds since the Unix epoch.
    pub timestamp: u32,
}

/// One entry of the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub kind: u32,
    pub size: u32,
    /// Offset of the first payload byte, immediately after the size field.
    pub payload_offset: u32,
}
