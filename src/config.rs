//! Configuration for loading and analysis.
//!
//! Every section has defaults matching the library constants,
//! and every field may be omitted from a JSON config file.

use crate::error::{DatError, Result};
use crate::hexdump::DEFAULT_BYTES_PER_LINE;
use crate::inspect::DEFAULT_CONTEXT_RADIUS;
use crate::io::LoadOptions;
use crate::patterns::DEFAULT_NGRAM_WIDTH;
use crate::strings::StringsConfig;
use crate::structure::{ArrayHeuristic, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How images are loaded.
    pub io: LoadOptions,
    /// Printable string extraction.
    pub strings: StringsConfig,
    /// Keyword search.
    pub keywords: KeywordConfig,
    /// Byte and n-gram statistics.
    pub patterns: PatternConfig,
    /// Array structure heuristic.
    pub structure: StructureConfig,
    /// Hex dump rendering.
    pub hexdump: HexDumpConfig,
}

impl AnalysisConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DatError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Keyword search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Bytes of context kept on each side of a match (default: 32).
    pub context_radius: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
        }
    }
}

/// Pattern statistics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// N-gram width in bytes (default: 4).
    pub ngram_width: usize,
    /// Number of n-grams to report (default: 5).
    pub top_k: usize,
    /// Number of byte values to report (default: 10).
    pub top_bytes: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            ngram_width: DEFAULT_NGRAM_WIDTH,
            top_k: 5,
            top_bytes: 10,
        }
    }
}

/// Array structure heuristic configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Scan chunk size in bytes (default: 1 MiB).
    pub chunk_size: usize,
    /// Exclusive upper bound on the element count (default: 1000).
    pub max_count: u32,
    /// Exclusive upper bound on the element size (default: 1000).
    pub max_element_size: u32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        let bounds = ArrayHeuristic::default();
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_count: bounds.max_count,
            max_element_size: bounds.max_element_size,
        }
    }
}

impl StructureConfig {
    pub fn heuristic(&self) -> ArrayHeuristic {
        ArrayHeuristic {
            max_count: self.max_count,
            max_element_size: self.max_element_size,
        }
    }
}

/// Hex dump configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexDumpConfig {
    /// Bytes rendered per line (default: 16).
    pub bytes_per_line: usize,
}

impl Default for HexDumpConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
        }
    }
}
