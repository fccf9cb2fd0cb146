#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(sections) = datlens::formats::dat::walk_sections(data) {
        for s in &sections {
            assert!(s.end() <= data.len() as u64);
            assert!(s.payload(data).is_some());
        }
    }
});
