//! Versioned serialization of annotation files and file-id derivation.
//!
//! Decoding is total: malformed JSON, a wrong version literal, or any
//! missing or mistyped required field yields `None` plus human-readable
//! reasons. Corrupted persisted state is an expected runtime condition,
//! not a programming error, so nothing here panics or returns `Err` for
//! bad input bytes.

pub mod io;

use serde_json::Value;

use crate::error::MarginaliaError;
use crate::model::{AnnotationFile, CURRENT_VERSION};
use crate::validation;

/// The result of a total decode: either a valid file, or the reasons it
/// was rejected. Warnings may be present even when decoding succeeds.
#[derive(Clone, Debug, Default)]
pub struct DecodeOutcome {
    /// The decoded file, when the bytes were a valid current container.
    pub file: Option<AnnotationFile>,

    /// Human-readable reasons for rejection, plus any validation warnings.
    pub issues: Vec<String>,
}

impl DecodeOutcome {
    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            file: None,
            issues: vec![reason.into()],
        }
    }
}

/// Serializes an annotation file to pretty JSON.
pub fn encode_annotation_file(file: &AnnotationFile) -> Result<String, MarginaliaError> {
    serde_json::to_string_pretty(file).map_err(MarginaliaError::Encode)
}

/// Decodes a JSON-encoded annotation file. Total: never panics, never
/// errors; inspect [`DecodeOutcome::file`] for success.
pub fn decode_annotation_file(json: &str) -> DecodeOutcome {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return DecodeOutcome::rejected(format!("Not valid JSON: {}", e)),
    };

    // Version is an exact literal; anything else is invalid, never coerced.
    match value.get("version").and_then(Value::as_u64) {
        Some(v) if v == u64::from(CURRENT_VERSION) => {}
        Some(v) => {
            return DecodeOutcome::rejected(format!(
                "Unsupported version {} (expected {})",
                v, CURRENT_VERSION
            ));
        }
        None => {
            return DecodeOutcome::rejected("Missing or non-integer 'version' field");
        }
    }

    let file: AnnotationFile = match serde_json::from_value(value) {
        Ok(file) => file,
        Err(e) => return DecodeOutcome::rejected(format!("Malformed annotation file: {}", e)),
    };

    let report = validation::validate_file(&file);
    let issues: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
    if report.is_ok() {
        DecodeOutcome {
            file: Some(file),
            issues,
        }
    } else {
        DecodeOutcome { file: None, issues }
    }
}

/// Convenience wrapper when the rejection reasons are not needed.
pub fn deserialize_annotation_file(json: &str) -> Option<AnnotationFile> {
    decode_annotation_file(json).file
}

/// Derives a deterministic, storage-safe key from a filesystem path.
///
/// `/` and `\` become `-`, whitespace becomes `_`, and characters illegal
/// in filenames (`< > : " | ? *` and control characters) are stripped.
/// Pure function of its input: no global or time-based state.
///
/// ```
/// use marginalia::store::derive_file_id;
/// assert_eq!(
///     derive_file_id("documents/papers/research.pdf").unwrap(),
///     "documents-papers-research.pdf"
/// );
/// assert_eq!(
///     derive_file_id("my documents/my paper.pdf").unwrap(),
///     "my_documents-my_paper.pdf"
/// );
/// ```
pub fn derive_file_id(path: &str) -> Result<String, MarginaliaError> {
    if path.trim().is_empty() {
        return Err(MarginaliaError::EmptyPath);
    }

    let id: String = path
        .trim()
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' => Some('-'),
            c if c.is_whitespace() => Some('_'),
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    if id.is_empty() {
        return Err(MarginaliaError::EmptyPath);
    }
    Ok(id)
}
