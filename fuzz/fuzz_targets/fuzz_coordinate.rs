#![no_main]

use libfuzzer_sys::fuzz_target;
use skein::domain::value_objects::Coordinate;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(coordinate) = s.parse::<Coordinate>() {
            let reparsed: Coordinate = coordinate
                .to_string()
                .parse()
                .expect("displayed coordinate must parse");
            assert_eq!(reparsed, coordinate);
        }
    }
});
