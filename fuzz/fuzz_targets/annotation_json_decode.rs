//! Fuzz target for annotation file decoding.
//!
//! The decoder is documented as total: arbitrary bytes must produce
//! either a valid file or rejection reasons, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::store::decode_annotation_file;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(json) = std::str::from_utf8(data) {
        let outcome = decode_annotation_file(json);
        if outcome.file.is_none() {
            assert!(!outcome.issues.is_empty());
        }
    }
});
