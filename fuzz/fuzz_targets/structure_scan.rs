#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, rest)) = data.split_first() else {
        return;
    };
    let small = datlens::structure::scan(rest, usize::from(chunk));
    let whole = datlens::structure::scan(rest, datlens::structure::DEFAULT_CHUNK_SIZE);
    assert_eq!(small, whole);
});
