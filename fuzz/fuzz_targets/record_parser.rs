#![no_main]

use libfuzzer_sys::fuzz_target;
use subcombi::{calculate, pipeline::parse_record, Thresholds};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Neither parsing nor the full pipeline may panic on arbitrary lines
        for line in input.lines() {
            if let Some(tokens) = parse_record(line) {
                assert!(tokens.iter().all(|token| !token.contains('_')));
            }
        }
        let _ = calculate(input.lines(), &Thresholds::default());
    }
});
