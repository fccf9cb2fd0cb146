//! Section table walking for DAT files

use crate::formats::dat::types::*;
use crate::formats::dat::utils::{check_bounds, read_u32_be, ReadExt};
use tracing::{debug, warn};

/// Walk the section table that follows the header region.
///
/// The count is read at [`SECTION_TABLE_OFFSET`]; each descriptor is a
/// big-endian `(kind, size)` pair followed by `size` payload bytes. The walk
/// is all-or-nothing: if any descriptor or payload runs past the end of
/// `data`, no sections are returned.
pub fn walk(data: &[u8]) -> Result<Vec<SectionDescriptor>> {
    let count = read_u32_be(data, SECTION_TABLE_OFFSET)?;
    let mut cursor = SECTION_TABLE_OFFSET + 4;

    // A hostile count must not drive the allocation.
    let max_possible = data.len().saturating_sub(cursor) / SECTION_DESCRIPTOR_LEN;
    let mut sections = Vec::with_capacity((count as usize).min(max_possible));

    for index in 0..count {
        let kind = read_u32_be(data, cursor).map_err(|e| truncated(index, e))?;
        let size = read_u32_be(data, cursor + 4).map_err(|e| truncated(index, e))?;
        let payload = cursor + SECTION_DESCRIPTOR_LEN;
        check_bounds(payload, size as usize, data.len()).map_err(|e| truncated(index, e))?;

        sections.push(SectionDescriptor {
            kind,
            size,
            payload_offset: to_u32(payload)?,
        });
        cursor = payload + size as usize;
    }

    debug!(count, end = cursor, "Walked section table");
    Ok(sections)
}

fn truncated(index: u32, err: FormatError) -> FormatError {
    warn!(section = index, error = %err, "Section table is truncated");
    err
}

fn to_u32(offset: usize) -> Result<u32> {
    u32::try_from(offset).map_err(|_| FormatError::OffsetOverflow {
        offset: offset as u64,
    })
}

impl SectionDescriptor {
    /// Offset one past the last payload byte.
    pub fn end(&self) -> u64 {
        u64::from(self.payload_offset) + u64::from(self.size)
    }

    /// The payload bytes of this section within `data`.
    pub fn payload<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.read_slice_at(self.payload_offset as usize, self.size as usize)
    }
}
