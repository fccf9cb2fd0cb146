//! Common test utilities and helpers.

pub mod test_utils;

pub use test_utils::*;

/// Common test data and constants
pub mod test_data {
    /// Magic written by [`super::build_dat_image`] callers in these tests.
    pub const MAGIC: &[u8] = b"SYSDATA\0\0\0\x01\x02";

    /// Printable part of [`MAGIC`].
    pub const MAGIC_TEXT: &str = "SYSDATA";

    /// 2023-11-14T22:13:20Z
    pub const TIMESTAMP: u32 = 1_700_000_000;
}
