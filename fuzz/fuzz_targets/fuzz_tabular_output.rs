//! Fuzz target for parsing the store client's tab-separated output.
//!
//! Goal: the parser should **never panic**, whatever the client prints.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tabular_output
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let text = String::from_utf8_lossy(data);
    let _ = govguard_store::fuzz::parse_tabular_output(&text);
});
