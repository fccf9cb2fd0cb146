//! Parsing helpers for user-supplied numbers.

use crate::error::{DatError, Result};
use crate::io::error::RangeError;

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_number(text: &str) -> Result<u64> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|_| DatError::InvalidInput(format!("not a number: {}", text)))
}

/// Parse an image offset.
pub fn parse_offset(text: &str) -> Result<usize> {
    let value = parse_number(text)?;
    usize::try_from(value)
        .map_err(|_| DatError::InvalidInput(format!("offset out of range: {}", text)))
}

/// Parse a byte value, rejecting anything above 255.
pub fn parse_byte(text: &str) -> Result<u8> {
    let value = parse_number(text)?;
    u8::try_from(value).map_err(|_| RangeError::InvalidValue { value }.into())
}
