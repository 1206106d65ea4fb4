#![no_main]

use arashi::history::History;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(history) = History::parse(text) {
            // The compact form of a parsed history parses back to itself.
            let compact: String = history.iter().map(|o| o.letter()).collect();
            assert_eq!(History::parse(&compact).unwrap(), history);
        }
    }
});
