//! Hex and ASCII rendering of image bytes.
//!
//! ```text
//! 00000000  53 59 53 44 41 54 41 00 00 00 00 00 00 00 00 03  |SYSDATA.........|
//! ```

use std::fmt::Write as _;

/// Bytes per line when not specified.
pub const DEFAULT_BYTES_PER_LINE: usize = 16;
/// Widest line rendered; larger requests are clamped to this.
pub const MAX_BYTES_PER_LINE: usize = 4096;

/// Dump `data` with offsets starting at zero.
pub fn hex_dump(data: &[u8], bytes_per_line: usize) -> String {
    hex_dump_at(data, 0, bytes_per_line)
}

/// Dump `data`, labelling the first byte as `base_offset`.
///
/// Each line is `OFFSET  HEX  |ASCII|`: an 8-digit upper-case offset, the
/// bytes as upper-case hex pairs left-justified to `bytes_per_line * 3`
/// columns, and the bytes as ASCII with non-printable ones shown as `.`.
/// `bytes_per_line` is clamped to `1..=MAX_BYTES_PER_LINE`.
pub fn hex_dump_at(data: &[u8], base_offset: usize, bytes_per_line: usize) -> String {
    let bytes_per_line = bytes_per_line.clamp(1, MAX_BYTES_PER_LINE);
    let hex_width = bytes_per_line * 3;
    let lines = data.len().div_ceil(bytes_per_line);
    let mut out = String::with_capacity(lines * (hex_width + bytes_per_line + 16));

    for (idx, chunk) in data.chunks(bytes_per_line).enumerate() {
        let offset = base_offset + idx * bytes_per_line;

        let mut hex = String::with_capacity(hex_width);
        for (i, b) in chunk.iter().enumerate() {
            if i > 0 {
                hex.push(' ');
            }
            let _ = write!(hex, "{:02X}", b);
        }

        let ascii: String = chunk
            .iter()
            .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
            .collect();

        let _ = writeln!(out, "{:08X}  {:<hex_width$}  |{}|", offset, hex, ascii);
    }
    out
}
