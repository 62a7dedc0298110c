//! Fuzz target for file-id derivation.
//!
//! Any derived id must be storage-safe: no separators, no whitespace,
//! none of the filename-illegal characters.

#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::store::derive_file_id;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        if let Ok(id) = derive_file_id(path) {
            assert!(!id.is_empty());
            assert!(!id.contains('/') && !id.contains('\\'));
            assert!(!id.chars().any(char::is_whitespace));
            assert!(!id.chars().any(|c| "<>:\"|?*".contains(c)));
        }
    }
});
