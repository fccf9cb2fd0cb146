//! DAT container decoding.
//!
//! The layout is guessed by convention rather than documented: a 24-byte
//! big-endian header inside a 32-byte header region, then a counted table
//! of `(kind, size, payload)` sections.

pub mod header;
pub mod sections;
pub mod types;
pub mod utils;

pub use header::decode as decode_header;
pub use sections::walk as walk_sections;
pub use types::*;
