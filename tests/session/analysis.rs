//! Integration tests for the read-only analyzers.

use datlens::config::AnalysisConfig;
use datlens::structure::{scan, DEFAULT_CHUNK_SIZE};
use datlens::{ExtractedString, Session};

use crate::common::{create_temp_file, open_session};

/// Runs of printable bytes separated by NULs
#[test]
fn test_strings_with_min_length() {
    let temp = create_temp_file(b"AB\x00CDE\x00\x00F");
    let session = open_session(temp.path());

    let found = session.find_strings(2);
    assert_eq!(
        found,
        vec![
            ExtractedString {
                offset: 0,
                text: "AB".to_string()
            },
            ExtractedString {
                offset: 3,
                text: "CDE".to_string()
            },
        ]
    );
    assert_eq!(session.find_strings(3).len(), 1);
    // Configured default is 4.
    assert!(session.strings().is_empty());
}

/// Context windows are clamped to the image at both ends
#[test]
fn test_keyword_context_clamping() {
    let mut image = b"KEY".to_vec();
    image.resize(36, b'.');
    image.extend_from_slice(b"END!");
    assert_eq!(image.len(), 40);

    let temp = create_temp_file(&image);
    let session = open_session(temp.path());
    let found = session.find_keywords(&["KEY", "END!", "missing"]);

    assert_eq!(found.len(), 2);
    assert!(!found.contains_key("missing"));

    let head = &found["KEY"];
    assert_eq!(head.offset, 0);
    assert_eq!(head.context_start, 0);
    assert_eq!(head.context.len(), 3 + 32);
    assert_eq!(head.offset_in_context(), 0);

    let tail = &found["END!"];
    assert_eq!(tail.offset, 36);
    assert_eq!(tail.context_start, 4);
    assert_eq!(tail.context.len(), 36);
    assert_eq!(&tail.context[tail.offset_in_context()..], b"END!");
}

/// Only the first occurrence of a keyword is reported
#[test]
fn test_keyword_first_occurrence() {
    let temp = create_temp_file(b"..Alpha....Alpha..");
    let session = open_session(temp.path());
    let m = session.find_keyword(b"Alpha").unwrap();
    assert_eq!(m.offset, 2);
    assert!(session.find_keyword(b"").is_none());
}

fn array_fixture() -> Vec<u8> {
    let mut data = vec![0xFFu8; 10_000];
    for (i, offset) in [0usize, 99, 1023, 1024, 4097, 9992].iter().enumerate() {
        let count = (i as u32 + 1) * 10;
        data[*offset..*offset + 4].copy_from_slice(&count.to_be_bytes());
        data[*offset + 4..*offset + 8].copy_from_slice(&64u32.to_be_bytes());
    }
    data
}

/// Candidates do not depend on chunk size and are never duplicated
#[test]
fn test_array_candidates_are_deterministic() {
    let data = array_fixture();
    let temp = create_temp_file(&data);

    let reference = open_session(temp.path()).find_array_candidates();
    assert_eq!(reference, scan(&data, DEFAULT_CHUNK_SIZE));
    let offsets: Vec<usize> = reference.iter().map(|c| c.offset).collect();
    for expected in [0usize, 99, 4097, 9992] {
        assert!(offsets.contains(&expected), "missing candidate at {}", expected);
    }
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));

    for chunk_size in [1usize, 8, 100, 1024, 4096] {
        let mut config = AnalysisConfig::default();
        config.structure.chunk_size = chunk_size;
        let session = Session::open_with_config(temp.path(), config).unwrap();
        assert_eq!(
            session.find_array_candidates(),
            reference,
            "chunk size {}",
            chunk_size
        );
    }
}

/// Byte histogram and top n-grams
#[test]
fn test_pattern_statistics() {
    let temp = create_temp_file(b"abcabcabcabc");
    let session = open_session(temp.path());

    let bytes = session.byte_frequencies();
    assert_eq!(bytes.total(), 12);
    assert_eq!(bytes.count(b'a'), 4);
    assert_eq!(bytes.distinct(), 3);

    let grams = session.ngram_frequencies(3);
    assert_eq!(grams.windows(), 9);
    assert_eq!(grams.count(b"abc"), 3);

    let top = session.top_ngrams(3, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].pattern, b"abc".to_vec());
    assert_eq!(top[0].first_offset, 0);
    assert_eq!(top[1].pattern, b"bca".to_vec());
    assert_eq!(top[1].pattern_hex(), "626361");
}

/// Whole-file hex dump
#[test]
fn test_hex_dump_lines() {
    let temp = create_temp_file(b"0123456789ABCDEFGHIJ");
    let session = open_session(temp.path());
    let dump = session.hex_dump(16);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "00000000  30 31 32 33 34 35 36 37 38 39 41 42 43 44 45 46   |0123456789ABCDEF|"
    );
    assert_eq!(lines[1], format!("00000010  {:<48}  |GHIJ|", "47 48 49 4A"));
}

/// Text and binary classification
#[test]
fn test_text_classification() {
    let text = create_temp_file(b"plain text\r\n\tindented\n");
    assert!(open_session(text.path()).is_text());

    let binary = create_temp_file(b"text\x00with nul");
    assert!(!open_session(binary.path()).is_text());

    let empty = create_temp_file(b"");
    assert!(!open_session(empty.path()).is_text());
}
