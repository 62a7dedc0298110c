//! Fuzz target for legacy file migration.

#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::migrate::try_migrate_legacy_json;
use marginalia::model::CURRENT_VERSION;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(json) = std::str::from_utf8(data) {
        if let Some(migrated) = try_migrate_legacy_json(json) {
            assert_eq!(migrated.version, CURRENT_VERSION);
        }
    }
});
