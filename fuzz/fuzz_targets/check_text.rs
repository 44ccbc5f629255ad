//! Fuzz target for the structural input check.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let report = cellplot::validation::check_text(text);
        assert!(report.collections <= report.groups);
    }
});
