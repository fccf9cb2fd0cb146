//! Ownership of the loaded image and bounds-checked access to it.
//!
//! A [`ByteStore`] holds exactly one representation of the file contents:
//! a read-only memory map, or an owned buffer. Reads are zero-copy over
//! either form. The first mutation copies a mapped image into an owned
//! buffer and drops the mapping; that transition is one-way.

pub mod error;

use crate::io::error::{IoError, RangeError, Result};
use bytes::Bytes;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

/// Default ceiling on the size of a loaded image (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Controls how files are brought into memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Files larger than this are rejected with `IoError::FileTooLarge`.
    pub max_file_size: u64,
    /// Map files read-only when possible instead of reading them into a buffer.
    pub prefer_mmap: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            prefer_mmap: true,
        }
    }
}

enum Image {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Image {
    fn as_slice(&self) -> &[u8] {
        match self {
            Image::Mapped(map) => map,
            Image::Owned(buf) => buf,
        }
    }

    fn is_mapped(&self) -> bool {
        matches!(self, Image::Mapped(_))
    }

    /// Copy a mapped image into an owned buffer, dropping the map.
    fn make_owned(&mut self) {
        if let Image::Mapped(map) = self {
            *self = Image::Owned(map.to_vec());
        }
    }

    fn owned_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            Image::Owned(buf) => Some(buf),
            Image::Mapped(_) => None,
        }
    }
}

/// Exclusive owner of the bytes under analysis.
pub struct ByteStore {
    path: PathBuf,
    image: Image,
    options: LoadOptions,
    dirty: bool,
}

impl ByteStore {
    /// Opens `path` and loads its contents.
    ///
    /// The file is memory-mapped read-only when `options.prefer_mmap` is set and
    /// the platform allows it; otherwise the whole file is read into memory.
    pub fn open<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let image = read_image(path, &options)?;
        Ok(Self {
            path: path.to_path_buf(),
            image,
            options,
            dirty: false,
        })
    }

    /// Wraps an in-memory buffer. `path` is where [`ByteStore::save`] writes by default.
    pub fn from_bytes<P: AsRef<Path>>(path: P, data: Vec<u8>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            image: Image::Owned(data),
            options: LoadOptions::default(),
            dirty: false,
        }
    }

    /// Replaces the current image with the contents of `path`.
    ///
    /// On failure the previous image, path and dirty flag are left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = read_image(path, &self.options)?;
        self.image = image;
        self.path = path.to_path_buf();
        self.dirty = false;
        Ok(())
    }

    /// Read-only view of the whole image.
    #[inline]
    pub fn view(&self) -> &[u8] {
        self.image.as_slice()
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    pub fn is_mapped(&self) -> bool {
        self.image.is_mapped()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Path the image was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Returns the byte at `offset`, if any.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.view().get(offset).copied()
    }

    /// Copies out up to `len` bytes starting at `offset`.
    ///
    /// Reads past the end are clamped; a start at or beyond the end yields an
    /// empty buffer.
    pub fn read_at(&self, offset: usize, len: usize) -> Bytes {
        let data = self.view();
        if offset >= data.len() {
            return Bytes::new();
        }
        let end = offset.saturating_add(len).min(data.len());
        Bytes::copy_from_slice(&data[offset..end])
    }

    /// Switches to an owned, mutable buffer. No-op if already owned.
    pub fn materialize(&mut self) {
        if self.is_mapped() {
            self.image.make_owned();
            debug!(
                path = %self.path.display(),
                size = self.len(),
                "Materialized mapped image into owned buffer"
            );
        }
    }

    /// Overwrites one byte and marks the store dirty.
    ///
    /// Fails without touching any state when `offset >= len`.
    pub fn write_byte(&mut self, offset: usize, value: u8) -> std::result::Result<(), RangeError> {
        let len = self.len();
        if offset >= len {
            warn!(offset, len, "Rejected out-of-bounds write");
            return Err(RangeError::OutOfBounds { offset, len });
        }
        self.materialize();
        let Some(buf) = self.image.owned_mut() else {
            return Err(RangeError::OutOfBounds { offset, len });
        };
        let old = buf[offset];
        buf[offset] = value;
        self.dirty = true;
        trace!(offset, old, new = value, "Wrote byte");
        Ok(())
    }

    /// Writes the image to `path`, or to the path it was loaded from.
    ///
    /// An existing target is resolved through symlinks and replaced by
    /// renaming a temporary file from the same directory over it, so the
    /// target is never truncated while it may still be mapped and keeps its
    /// permissions. A missing target is created with the process umask. The
    /// dirty flag is left as is.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let requested = path.unwrap_or(&self.path);
        let other = |source: std::io::Error| IoError::Other {
            path: requested.to_path_buf(),
            source,
        };

        let written = match fs::canonicalize(requested) {
            Ok(target) => {
                replace_file(&target, self.view()).map_err(other)?;
                target
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                create_file(requested, self.view()).map_err(other)?;
                requested.to_path_buf()
            }
            Err(err) => return Err(other(err)),
        };

        debug!(
            path = %written.display(),
            size = self.len(),
            dirty = self.dirty,
            "Saved image"
        );
        Ok(())
    }

    /// Releases the image. Equivalent to dropping the store.
    pub fn close(self) {}
}

impl Drop for ByteStore {
    fn drop(&mut self) {
        trace!(
            path = %self.path.display(),
            mapped = self.is_mapped(),
            "Releasing image"
        );
    }
}

impl fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStore")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .field("dirty", &self.dirty)
            .finish()
    }
}

fn replace_file(target: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(target)?.permissions();
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

fn create_file(target: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(target)?;
    file.write_all(data)?;
    file.sync_all()
}

fn read_image(path: &Path, options: &LoadOptions) -> Result<Image> {
    let file = File::open(path).map_err(|e| IoError::from_io(path, e))?;
    let file_size = file
        .metadata()
        .map_err(|e| IoError::from_io(path, e))?
        .len();

    debug!(
        path = %path.display(),
        size = file_size,
        max_file_size = options.max_file_size,
        prefer_mmap = options.prefer_mmap,
        "Opening image"
    );

    if file_size > options.max_file_size {
        warn!(
            path = %path.display(),
            size = file_size,
            limit = options.max_file_size,
            "File is too large"
        );
        return Err(IoError::FileTooLarge {
            limit: options.max_file_size,
            found: file_size,
        });
    }

    // memmap cannot map empty files. Pseudo-files that report a zero size
    // may still have content, so those are read.
    if options.prefer_mmap && file_size > 0 {
        // Safety: the map is read-only and never handed out beyond the
        // lifetime of the owning ByteStore.
        match unsafe { Mmap::map(&file) } {
            Ok(map) => return Ok(Image::Mapped(map)),
            Err(err) => debug!(
                path = %path.display(),
                error = %err,
                "Memory mapping unavailable, reading into memory"
            ),
        }
    }

    let capacity = usize::try_from(file_size).unwrap_or(0);
    let mut data = Vec::with_capacity(capacity);
    (&file)
        .read_to_end(&mut data)
        .map_err(|e| IoError::from_io(path, e))?;
    Ok(Image::Owned(data))
}
