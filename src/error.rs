use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for marginalia operations.
#[derive(Debug, Error)]
pub enum MarginaliaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid canvas dimensions {width}x{height} (both must be positive)")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Invalid page dimensions {width}x{height} (both must be positive)")]
    InvalidPage { width: f64, height: f64 },

    #[error("Cannot derive a file identifier from an empty path")]
    EmptyPath,

    #[error("Failed to parse annotation JSON from {}: {source}", path.display())]
    AnnotationJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation JSON to {}: {source}", path.display())]
    AnnotationJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize annotation file: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Not a legacy (version 1) annotation file")]
    NotLegacy,

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Annotation file is not valid: decoder reported {0} issue(s)")]
    DecodeFailed(usize),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
