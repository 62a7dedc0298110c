//! Fuzz target for shape sidecar parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::shapes::json_to_shapes;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(json) = std::str::from_utf8(data) {
        let _ = json_to_shapes(json);
    }
});
