//! Annotation targets: the document-type-specific locator an annotation
//! attaches to.
//!
//! Exactly one variant per annotation. Every consumer (formatter, exporter,
//! migrator, validator) matches exhaustively, so adding a variant is a
//! compile-time failure at each of them.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::space::Normalized;

/// Where an annotation is anchored within its document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnnotationTarget {
    /// A region on one page of a paginated document.
    ///
    /// `page` is 1-indexed. Rects are in normalized page space (0..1,
    /// top-left origin); a single highlight spanning wrapped lines carries
    /// one rect per visual line.
    #[serde(rename_all = "camelCase")]
    Pdf {
        page: u32,
        rects: Vec<Rect<Normalized>>,
    },

    /// A region on a raster image, in percentage space (0..100).
    #[serde(rename_all = "camelCase")]
    Image { x: f64, y: f64, w: f64, h: f64 },

    /// A single line of line-addressed source text. 1-indexed.
    #[serde(rename_all = "camelCase")]
    CodeLine { line: u32 },

    /// A position inside anchored rich text, addressed by element id and
    /// character offset within that element.
    #[serde(rename_all = "camelCase")]
    TextAnchor { element_id: String, offset: u32 },
}

impl AnnotationTarget {
    /// Returns the 1-indexed page for PDF targets, `None` otherwise.
    pub fn page(&self) -> Option<u32> {
        match self {
            AnnotationTarget::Pdf { page, .. } => Some(*page),
            AnnotationTarget::Image { .. }
            | AnnotationTarget::CodeLine { .. }
            | AnnotationTarget::TextAnchor { .. } => None,
        }
    }

    /// Returns the line number for code-line targets, `None` otherwise.
    pub fn line(&self) -> Option<u32> {
        match self {
            AnnotationTarget::CodeLine { line } => Some(*line),
            AnnotationTarget::Pdf { .. }
            | AnnotationTarget::Image { .. }
            | AnnotationTarget::TextAnchor { .. } => None,
        }
    }
}
