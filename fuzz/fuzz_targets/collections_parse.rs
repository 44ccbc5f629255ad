//! Fuzz target for the collections parser.
//!
//! This fuzzer feeds arbitrary UTF-8 text to the brace scanner and
//! rectangle matcher, checking for panics, crashes, or hangs.

#![no_main]

use cellplot::cells::fuzz_parse_collections;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_collections(text);
});
