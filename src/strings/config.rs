//! Configuration for printable string extraction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringsConfig {
    /// Minimum run length for a string to be reported
    pub min_length: usize,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self { min_length: 4 }
    }
}
