//! Fuzz target for the snippet builder.
//!
//! Run with: cargo +nightly fuzz run fuzz_snippet_builder
//!
//! Exercises `build_snippet` with arbitrary extract/term pairs. The builder
//! must never panic (UTF-8 boundary handling included) and must respect the
//! window-plus-ellipsis length bound.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Use the first byte as a split point to divide data into term + extract
    let split = (data[0] as usize % (data.len() - 1)).max(1);
    let Ok(term) = std::str::from_utf8(&data[1..split]) else {
        return;
    };
    let Ok(extract) = std::str::from_utf8(&data[split..]) else {
        return;
    };

    let snippet = scratchlight_core::snippet::build_snippet(extract, term);

    // 220-byte window plus an ellipsis marker on each side
    assert!(snippet.len() <= 220 + 6);
});
