//! Integration tests for in-memory patching and save-back.

use datlens::{util, DatError, RangeError, Session};
use std::fs;

use crate::common::test_data::*;
use crate::common::{build_dat_image, create_temp_file, open_session};

fn sample_image() -> Vec<u8> {
    build_dat_image(MAGIC, 3, TIMESTAMP, &[(1, b"first payload"), (2, b"SECOND")])
}

/// Patch, save to a new path, reopen: exactly one byte differs
#[test]
fn test_patch_round_trip_to_new_path() {
    let original = sample_image();
    let temp = create_temp_file(&original);
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("patched.dat");

    let mut session = open_session(temp.path());
    session.patch_byte(2, 0xFF).unwrap();
    session.save(Some(&out)).unwrap();
    session.close();

    let reopened = open_session(&out);
    assert_eq!(reopened.len(), original.len());
    assert_eq!(reopened.view()[2], 0xFF);
    for (i, (&a, &b)) in original.iter().zip(reopened.view()).enumerate() {
        if i != 2 {
            assert_eq!(a, b, "byte {} changed", i);
        }
    }

    // The source file is untouched.
    assert_eq!(fs::read(temp.path()).unwrap(), original);
}

/// Saving over the file the session mapped replaces it without corruption
#[test]
fn test_save_in_place_over_mapped_file() {
    let original = sample_image();
    let temp = create_temp_file(&original);

    let mut session = open_session(temp.path());
    session.patch_byte(0, b'Z').unwrap();
    session.patch_byte(original.len() - 1, b'!').unwrap();
    assert!(!session.store().is_mapped());
    session.save(None).unwrap();

    let on_disk = fs::read(temp.path()).unwrap();
    assert_eq!(on_disk.len(), original.len());
    assert_eq!(on_disk[0], b'Z');
    assert_eq!(on_disk[original.len() - 1], b'!');
    assert_eq!(&on_disk[1..original.len() - 1], &original[1..original.len() - 1]);

    // The session still reads its own copy after the rename.
    assert_eq!(session.view(), &on_disk[..]);
}

/// Out-of-bounds patches are rejected and change nothing
#[test]
fn test_out_of_bounds_patch() {
    let original = sample_image();
    let temp = create_temp_file(&original);
    let mut session = open_session(temp.path());
    let len = session.len();

    let err = session.patch_byte(len, 0x41).unwrap_err();
    assert_eq!(err, RangeError::OutOfBounds { offset: len, len });
    assert!(session.patch_byte(usize::MAX, 0).is_err());

    assert!(!session.is_dirty());
    assert_eq!(session.view(), &original[..]);
    session.save(None).unwrap();
    assert_eq!(fs::read(temp.path()).unwrap(), original);
}

/// Values above 255 never reach the image
#[test]
fn test_out_of_range_value_is_rejected() {
    assert!(matches!(
        util::parse_byte("256"),
        Err(DatError::Range(RangeError::InvalidValue { value: 256 }))
    ));
    assert_eq!(util::parse_byte("0xff").unwrap(), 0xFF);
    assert_eq!(util::parse_offset("0x20").unwrap(), 32);
}

/// Analyses see a patch as soon as it is applied
#[test]
fn test_patch_visible_to_analyzers() {
    let temp = create_temp_file(&sample_image());
    let mut session = open_session(temp.path());
    assert!(session.find_keywords(&["SECOND"]).contains_key("SECOND"));

    let offset = session.find_keywords(&["SECOND"])["SECOND"].offset;
    session.patch_byte(offset, b'X').unwrap();

    assert!(session.find_keywords(&["SECOND"]).is_empty());
    assert!(session.find_keywords(&["XECOND"]).contains_key("XECOND"));
    assert!(session.find_strings(4).iter().any(|s| s.text == "XECOND"));
}

/// A session stays usable after saving
#[test]
fn test_repeated_patch_and_save() {
    let temp = create_temp_file(&sample_image());
    let mut session = Session::open(temp.path()).unwrap();

    for (i, value) in [0x10u8, 0x20, 0x30].iter().enumerate() {
        session.patch_byte(40 + i, *value).unwrap();
        session.save(None).unwrap();
        assert_eq!(fs::read(temp.path()).unwrap()[40 + i], *value);
    }
    assert_eq!(&session.view()[40..43], &[0x10, 0x20, 0x30]);
}
