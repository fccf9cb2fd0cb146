//! Shared test utilities for creating temporary files and synthetic images.

use datlens::Session;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
///
/// The file is removed when the returned `NamedTempFile` is dropped.
///
/// # Panics
///
/// Panics if the temporary file cannot be created or written
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Creates a temporary file of `size` bytes, all equal to `pattern`.
pub fn create_temp_file_with_size(size: usize, pattern: u8) -> NamedTempFile {
    create_temp_file(&vec![pattern; size])
}

/// Builds a DAT image: a 24-byte header padded to 32 bytes, then a section
/// table with one `(kind, size, payload)` entry per element of `sections`.
///
/// The header's file size field is set to the final image length. `magic`
/// is truncated or zero-padded to 12 bytes.
pub fn build_dat_image(magic: &[u8], version: u32, timestamp: u32, sections: &[(u32, &[u8])]) -> Vec<u8> {
    let mut data = vec![0u8; 12];
    let n = magic.len().min(12);
    data[..n].copy_from_slice(&magic[..n]);
    data.extend_from_slice(&version.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&timestamp.to_be_bytes());
    data.resize(32, 0);

    data.extend_from_slice(&(sections.len() as u32).to_be_bytes());
    for (kind, payload) in sections {
        data.extend_from_slice(&kind.to_be_bytes());
        data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        data.extend_from_slice(payload);
    }

    let size = data.len() as u32;
    data[16..20].copy_from_slice(&size.to_be_bytes());
    data
}

/// Opens a session with the default configuration, unwrapping any errors.
///
/// # Panics
///
/// Panics if the file cannot be opened
pub fn open_session<P: AsRef<Path>>(path: P) -> Session {
    Session::open(path).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_temp_file() {
        let content = b"hello world";
        let temp_file = create_temp_file(content);
        assert_eq!(fs::read(temp_file.path()).unwrap(), content);
    }

    #[test]
    fn test_create_temp_file_with_size() {
        let temp_file = create_temp_file_with_size(1024, 0xAA);
        let read_content = fs::read(temp_file.path()).unwrap();
        assert_eq!(read_content.len(), 1024);
        assert!(read_content.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_build_dat_image_layout() {
        let image = build_dat_image(b"ABC", 2, 3, &[(7, b"xyz")]);
        assert_eq!(image.len(), 32 + 4 + 8 + 3);
        assert_eq!(&image[..3], b"ABC");
        assert_eq!(&image[12..16], &2u32.to_be_bytes());
        assert_eq!(&image[16..20], &(image.len() as u32).to_be_bytes());
        assert_eq!(&image[32..36], &1u32.to_be_bytes());
        assert_eq!(&image[44..], b"xyz");
    }
}
