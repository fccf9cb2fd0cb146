//! # datlens
//!
//! Load an opaque binary image once and analyse it from a single source of
//! truth: header and section decoding, byte and n-gram statistics, printable
//! strings, keyword context, heuristic array discovery, and single-byte
//! patching with save-back.
//!
//! ```no_run
//! use datlens::Session;
//!
//! let mut session = Session::open("SystemData.dat")?;
//! let header = session.read_header()?;
//! println!("{} v{}", header.magic, header.version);
//!
//! session.patch_byte(2, 0xFF)?;
//! session.save(Some("patched.dat".as_ref()))?;
//! # Ok::<(), datlens::DatError>(())
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod hexdump;
pub mod inspect;
pub mod io;
pub mod logging;
pub mod patterns;
pub mod session;
pub mod strings;
pub mod structure;
pub mod util;

pub use config::AnalysisConfig;
pub use error::{DatError, FormatError, IoError, RangeError, Result};
pub use formats::dat::{Header, SectionDescriptor};
pub use inspect::KeywordMatch;
pub use io::{ByteStore, LoadOptions};
pub use session::{close, open, FileSummary, Session};
pub use strings::ExtractedString;
pub use structure::ArrayCandidate;
