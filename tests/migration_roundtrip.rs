//! End-to-end: a legacy version-1 file migrates into a container the
//! current codec accepts, and the result survives an encode/decode cycle.

use marginalia::migrate::try_migrate_legacy_json;
use marginalia::model::FileType;
use marginalia::store::{decode_annotation_file, encode_annotation_file};
use marginalia::validation::validate_file;

const LEGACY_FIXTURE: &str = include_str!("fixtures/sample_legacy.v1.json");

#[test]
fn migrated_file_decodes_as_current() {
    let migrated = try_migrate_legacy_json(LEGACY_FIXTURE).expect("fixture should migrate");
    let json = encode_annotation_file(&migrated).expect("encode migrated file");

    let outcome = decode_annotation_file(&json);
    assert_eq!(outcome.file, Some(migrated));
}

#[test]
fn migrated_file_has_no_validation_errors() {
    let migrated = try_migrate_legacy_json(LEGACY_FIXTURE).unwrap();
    let report = validate_file(&migrated);
    // The legacy schema had no author field, so empty-author warnings are
    // expected; errors are not.
    assert_eq!(report.error_count(), 0, "issues: {:?}", report.issues);
}

#[test]
fn migrated_file_is_pdf_typed() {
    let migrated = try_migrate_legacy_json(LEGACY_FIXTURE).unwrap();
    assert_eq!(migrated.file_type, FileType::Pdf);
    assert_eq!(migrated.annotations.len(), 2);
}

#[test]
fn migration_refuses_current_files() {
    let migrated = try_migrate_legacy_json(LEGACY_FIXTURE).unwrap();
    let json = encode_annotation_file(&migrated).unwrap();
    assert!(try_migrate_legacy_json(&json).is_none());
}

#[test]
fn legacy_files_are_rejected_by_the_current_codec() {
    let outcome = decode_annotation_file(LEGACY_FIXTURE);
    assert!(outcome.file.is_none());
    assert!(outcome.issues.iter().any(|i| i.contains("version")));
}
