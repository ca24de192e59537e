#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(node) = vetting::parse(input) {
            // Parsed trees are always binary.
            let yaml = vetting::serialize(&node).expect("parsed tree serializes");
            assert_eq!(vetting::parse(&yaml).ok(), Some(node));
        }
    }
});
