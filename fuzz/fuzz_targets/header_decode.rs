#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = datlens::formats::dat::decode_header(data) {
        let _ = header.timestamp_utc();
        assert!(header.magic.len() <= datlens::formats::dat::MAGIC_LEN);
    }
});
