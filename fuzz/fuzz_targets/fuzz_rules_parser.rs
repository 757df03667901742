//! Fuzz target for the rules file parser.
//!
//! Goal: arbitrary YAML is either a rule set or a `RegistryError`, never a panic. Every rule set
//! that loads must also translate into queries without panicking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rules_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(rules) = govguard_settings::parse_rules_yaml(text) {
        for rule in rules.iter() {
            let _ = govguard_domain::checks::translate(rule);
        }
    }
});
