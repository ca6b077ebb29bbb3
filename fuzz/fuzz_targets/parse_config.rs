//! Fuzz harness for skip list configuration files
//!
//! Parsing must never panic, and anything that parses must build a list.

#![no_main]

use libfuzzer_sys::fuzz_target;
use strata_config::{ConfigFormat, parse_config};
use strata_skiplist::SkipList;

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    for format in [ConfigFormat::Yaml, ConfigFormat::Json] {
        if let Ok(config) = parse_config(input, format) {
            assert!(SkipList::<u8>::from_config(&config).is_ok());
        }
    }
});
