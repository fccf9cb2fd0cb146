//! Session facade over a loaded image.
//!
//! A [`Session`] owns one [`ByteStore`] and runs every analysis against its
//! current view, so all components agree on the bytes they see. Read-only
//! operations take `&self` and may run concurrently; `patch_byte` takes
//! `&mut self`, so a reader can never observe a half-applied edit. Callers
//! that need to interleave the two across threads wrap the session in a
//! `std::sync::RwLock`.

use crate::config::AnalysisConfig;
use crate::formats::dat::{self, FormatError, Header, SectionDescriptor};
use crate::hexdump;
use crate::inspect::{self, KeywordMatch};
use crate::io::error::{IoError, RangeError};
use crate::io::ByteStore;
use crate::patterns::{self, ByteCount, ByteFrequencies, NgramCount, NgramFrequencies};
use crate::span_trace;
use crate::strings::{self, ExtractedString};
use crate::structure::{self, ArrayCandidate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Overview of a loaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub file_size: usize,
    pub mapped: bool,
    pub is_text: bool,
    /// Shannon entropy in bits per byte.
    pub entropy: f64,
    pub string_count: usize,
    /// Present when the image is long enough to hold a header.
    pub header: Option<Header>,
    /// Present when the section table walks cleanly.
    pub section_count: Option<usize>,
    pub top_bytes: Vec<ByteCount>,
}

/// An open image plus the configuration used to analyse it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: ByteStore,
    config: AnalysisConfig,
}

/// Open `path` with the default configuration.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Session, IoError> {
    Session::open(path)
}

/// Release a session and its image.
pub fn close(session: Session) {
    session.close()
}

impl Session {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        Self::open_with_config(path, AnalysisConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: AnalysisConfig,
    ) -> Result<Self, IoError> {
        let path = path.as_ref();
        let id = Uuid::new_v4();
        let _span = span_trace!("open", session = %id, path = %path.display()).entered();
        let store = ByteStore::open(path, config.io.clone())?;
        info!(
            session = %id,
            size = store.len(),
            mapped = store.is_mapped(),
            "Session opened"
        );
        Ok(Self { id, store, config })
    }

    /// Build a session over an in-memory image. `path` is the default save target.
    pub fn from_store(store: ByteStore, config: AnalysisConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            store,
            config,
        }
    }

    /// Release the image. Equivalent to dropping the session.
    pub fn close(self) {
        debug!(session = %self.id, "Session closed");
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn store(&self) -> &ByteStore {
        &self.store
    }

    /// Current image bytes, including any unsaved patches.
    pub fn view(&self) -> &[u8] {
        self.store.view()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn read_header(&self) -> Result<Header, FormatError> {
        dat::decode_header(self.view())
    }

    pub fn read_sections(&self) -> Result<Vec<SectionDescriptor>, FormatError> {
        let _span = span_trace!("read_sections", session = %self.id).entered();
        dat::walk_sections(self.view())
    }

    /// Render the whole image as a hex dump.
    pub fn hex_dump(&self, bytes_per_line: usize) -> String {
        hexdump::hex_dump(self.view(), bytes_per_line)
    }

    /// Render `len` bytes starting at `offset`, clamped to the image.
    pub fn hex_dump_range(&self, offset: usize, len: usize, bytes_per_line: usize) -> String {
        let data = self.view();
        let start = offset.min(data.len());
        let end = start.saturating_add(len).min(data.len());
        hexdump::hex_dump_at(&data[start..end], start, bytes_per_line)
    }

    /// Overwrite one byte in memory. Nothing is written to disk until [`Session::save`].
    pub fn patch_byte(&mut self, offset: usize, value: u8) -> Result<(), RangeError> {
        let _span = span_trace!("patch_byte", session = %self.id, offset, value).entered();
        let old = self.store.byte_at(offset);
        self.store.write_byte(offset, value)?;
        debug!(offset, old = ?old, new = value, "Patched byte");
        Ok(())
    }

    /// Persist the image to `path`, or back to the file it was opened from.
    pub fn save(&self, path: Option<&Path>) -> Result<(), IoError> {
        let _span = span_trace!("save", session = %self.id).entered();
        self.store.save(path)
    }

    pub fn find_strings(&self, min_length: usize) -> Vec<ExtractedString> {
        strings::extract(self.view(), min_length)
    }

    /// Strings using the configured minimum length.
    pub fn strings(&self) -> Vec<ExtractedString> {
        self.find_strings(self.config.strings.min_length)
    }

    pub fn find_keyword(&self, keyword: &[u8]) -> Option<KeywordMatch> {
        inspect::find_with_radius(self.view(), keyword, self.config.keywords.context_radius)
    }

    pub fn find_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> BTreeMap<String, KeywordMatch> {
        let _span = span_trace!("find_keywords", session = %self.id, count = keywords.len()).entered();
        inspect::find_keywords(self.view(), keywords, self.config.keywords.context_radius)
    }

    pub fn find_array_candidates(&self) -> Vec<ArrayCandidate> {
        let _span = span_trace!("find_array_candidates", session = %self.id).entered();
        let cfg = &self.config.structure;
        structure::scan_with(self.view(), cfg.chunk_size, &cfg.heuristic())
    }

    pub fn byte_frequencies(&self) -> ByteFrequencies {
        patterns::byte_frequencies(self.view())
    }

    pub fn ngram_frequencies(&self, width: usize) -> NgramFrequencies {
        patterns::ngram_frequencies(self.view(), width)
    }

    pub fn top_ngrams(&self, width: usize, k: usize) -> Vec<NgramCount> {
        let _span = span_trace!("top_ngrams", session = %self.id, width, k).entered();
        patterns::top_k(&self.ngram_frequencies(width), k)
    }

    pub fn is_text(&self) -> bool {
        strings::is_text(self.view())
    }

    /// Size, text/binary guess, entropy, string count, and header details if they decode.
    pub fn summarize(&self) -> FileSummary {
        let _span = span_trace!("summarize", session = %self.id).entered();
        let freq = self.byte_frequencies();
        FileSummary {
            path: self.store.path().display().to_string(),
            file_size: self.len(),
            mapped: self.store.is_mapped(),
            is_text: self.is_text(),
            entropy: freq.entropy(),
            string_count: self.strings().len(),
            header: self.read_header().ok(),
            section_count: self.read_sections().ok().map(|s| s.len()),
            top_bytes: freq.most_common(self.config.patterns.top_bytes),
        }
    }
}
