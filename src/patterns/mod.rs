//! Byte and n-gram frequency statistics.
//!
//! Both tables are built by one linear pass over the image and are owned
//! values; nothing here borrows from the store once computed.
//!
//! # Example
//!
//! ```
//! use datlens::patterns::{byte_frequencies, ngram_frequencies, top_k};
//!
//! let data = b"\x00\x00\x00\x00\x00\x01";
//! assert_eq!(byte_frequencies(data).count(0), 5);
//!
//! let top = top_k(&ngram_frequencies(data, 4), 1);
//! assert_eq!(top[0].pattern, vec![0, 0, 0, 0]);
//! ```

pub mod histogram;
pub mod ngram;

pub use self::histogram::{byte_frequencies, ByteCount, ByteFrequencies};
pub use self::ngram::{ngram_frequencies, top_k, NgramCount, NgramFrequencies, DEFAULT_NGRAM_WIDTH};
