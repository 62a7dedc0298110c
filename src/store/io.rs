//! Path-based read/write helpers for the CLI and other storage
//! collaborators. The engine itself only works with in-memory values.

use std::fs;
use std::path::Path;

use crate::error::MarginaliaError;
use crate::model::AnnotationFile;

use super::{decode_annotation_file, encode_annotation_file, DecodeOutcome};

/// Reads and decodes an annotation file, with the total-decode semantics
/// of [`decode_annotation_file`]. Only the file read itself can error.
pub fn read_annotation_file(path: &Path) -> Result<DecodeOutcome, MarginaliaError> {
    let json = fs::read_to_string(path).map_err(MarginaliaError::Io)?;
    Ok(decode_annotation_file(&json))
}

/// Encodes and writes an annotation file as pretty JSON.
pub fn write_annotation_file(path: &Path, file: &AnnotationFile) -> Result<(), MarginaliaError> {
    let json = encode_annotation_file(file)?;
    fs::write(path, json).map_err(MarginaliaError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationFile, FileType};

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.annotations.json");

        let file = AnnotationFile::new("docs-paper.pdf", FileType::Pdf);
        write_annotation_file(&path, &file).expect("write");

        let outcome = read_annotation_file(&path).expect("read");
        assert_eq!(outcome.file, Some(file));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_annotation_file(Path::new("/nonexistent/annotations.json"));
        assert!(matches!(err, Err(MarginaliaError::Io(_))));
    }
}
