//! Integration tests for header decoding and the section walk.

use datlens::formats::dat::HEADER_LEN;
use datlens::FormatError;

use crate::common::test_data::*;
use crate::common::{build_dat_image, create_temp_file, open_session};

/// A header built by the helper decodes field for field
#[test]
fn test_header_fields() {
    let image = build_dat_image(MAGIC, 7, TIMESTAMP, &[]);
    let temp = create_temp_file(&image);
    let session = open_session(temp.path());

    let header = session.read_header().unwrap();
    assert_eq!(header.magic, MAGIC_TEXT);
    assert_eq!(&header.raw_magic[..], MAGIC);
    assert_eq!(header.version, 7);
    assert_eq!(header.file_size as usize, image.len());
    assert!(header.declared_size_matches(session.len()));
    assert_eq!(header.timestamp, TIMESTAMP);
    assert_eq!(
        header.timestamp_utc().unwrap().to_rfc3339(),
        "2023-11-14T22:13:20+00:00"
    );
}

/// Twenty-four zero bytes decode to an empty, zeroed header
#[test]
fn test_all_zero_header() {
    let temp = create_temp_file(&[0u8; HEADER_LEN]);
    let session = open_session(temp.path());
    let header = session.read_header().unwrap();
    assert_eq!(header.magic, "");
    assert_eq!(header.version, 0);
    assert_eq!(header.file_size, 0);
    assert_eq!(header.timestamp, 0);
}

/// Too short for a header
#[test]
fn test_short_header() {
    let temp = create_temp_file(&[0u8; HEADER_LEN - 1]);
    let session = open_session(temp.path());
    assert_eq!(
        session.read_header(),
        Err(FormatError::Truncated {
            offset: 0,
            needed: HEADER_LEN,
            len: HEADER_LEN - 1
        })
    );
}

/// Sections are reported in file order with their payload positions
#[test]
fn test_section_walk() {
    let image = build_dat_image(MAGIC, 1, 0, &[(0x10, b"alpha"), (0x20, b""), (0x30, b"gamma!")]);
    let temp = create_temp_file(&image);
    let session = open_session(temp.path());

    let sections = session.read_sections().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].kind, 0x10);
    assert_eq!(sections[0].payload_offset, 44);
    assert_eq!(sections[0].payload(session.view()), Some(&b"alpha"[..]));
    assert_eq!(sections[1].size, 0);
    assert_eq!(sections[1].payload_offset, 57);
    assert_eq!(sections[2].payload(session.view()), Some(&b"gamma!"[..]));
    assert_eq!(sections[2].end() as usize, image.len());
}

/// A truncated third payload fails the whole walk
#[test]
fn test_truncated_section_is_atomic() {
    let mut image = build_dat_image(MAGIC, 1, 0, &[(1, b"aaaa"), (2, b"bbbb"), (3, b"cccccccc")]);
    image.truncate(image.len() - 3);
    let temp = create_temp_file(&image);
    let session = open_session(temp.path());

    let err = session.read_sections().unwrap_err();
    assert!(matches!(err, FormatError::Truncated { .. }));
    // Header decoding is independent of the table.
    assert!(session.read_header().is_ok());
    assert!(session.summarize().section_count.is_none());
}

/// An image that ends inside the count field has no section table
#[test]
fn test_missing_section_count() {
    let temp = create_temp_file(&[0u8; 34]);
    let session = open_session(temp.path());
    assert!(matches!(
        session.read_sections(),
        Err(FormatError::Truncated { offset: 32, .. })
    ));
}

/// Summary of a well-formed image
#[test]
fn test_summary_of_dat_image() {
    let image = build_dat_image(MAGIC, 1, TIMESTAMP, &[(1, b"Hello, sections")]);
    let temp = create_temp_file(&image);
    let session = open_session(temp.path());

    let summary = session.summarize();
    assert_eq!(summary.file_size, image.len());
    assert!(!summary.is_text);
    assert_eq!(summary.section_count, Some(1));
    assert_eq!(summary.header.unwrap().magic, MAGIC_TEXT);
    assert_eq!(summary.top_bytes[0].byte, 0);
    assert!(summary.entropy > 0.0 && summary.entropy <= 8.0);
    assert_eq!(summary.path, temp.path().display().to_string());
}
