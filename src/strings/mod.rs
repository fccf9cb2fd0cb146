//! Printable string extraction and text detection.

mod config;
mod scan;

pub use config::StringsConfig;
pub use scan::{extract, is_printable, is_text, ExtractedString};
