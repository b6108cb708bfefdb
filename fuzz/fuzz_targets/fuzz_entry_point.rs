#![no_main]

use libfuzzer_sys::fuzz_target;
use skein::domain::value_objects::EntryPoint;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(entry_point) = s.parse::<EntryPoint>() {
            let candidates = entry_point.source_candidates(&["java".to_string(), "kt".to_string()]);
            assert_eq!(candidates.len(), 2);
            assert!(candidates.iter().all(|c| c.is_relative()));
        }
    }
});
