#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = skein::config::parse(content, Path::new("/fuzz/skein.toml"), Path::new("/fuzz"));
    }
});
