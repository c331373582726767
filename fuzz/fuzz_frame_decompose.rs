//! Fuzz target for spotlight frame decomposition.
//!
//! Run with: cargo +nightly fuzz run fuzz_frame_decompose
//!
//! Exercises `decompose` with arbitrary snippet/term pairs. Decomposition
//! must never panic and the side contexts must stay within their caps.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let split = (data[0] as usize % (data.len() - 1)).max(1);
    let Ok(term) = std::str::from_utf8(&data[1..split]) else {
        return;
    };
    let Ok(snippet) = std::str::from_utf8(&data[split..]) else {
        return;
    };

    let frame = scratchlight_core::snippet::decompose(snippet, term);

    assert!(frame.left.len() <= 50);
    assert!(frame.right.len() <= 50);
});
