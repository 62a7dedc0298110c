//! Migration from the legacy version-1 schema to the current polymorphic
//! schema.
//!
//! The legacy format was PDF-only and stored a single implicit target per
//! annotation. It is modeled here as its own set of immutable record
//! types, never as optional fields on the current schema, so both sets of
//! invariants stay independently checkable. Migration is a pure function
//! from one to the other.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{
    non_empty, AnnotationFile, AnnotationItem, AnnotationStyle, AnnotationTarget, FileType,
    Normalized, Rect, StyleKind, CURRENT_VERSION,
};

/// The legacy container version this module accepts.
pub const LEGACY_VERSION: u64 = 1;

// ============================================================================
// Legacy schema types (read-only)
// ============================================================================

/// A legacy version-1 annotation file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnnotationFile {
    pub version: u64,
    pub file_id: String,
    pub annotations: Vec<LegacyAnnotation>,
    pub last_modified: i64,
}

/// A legacy annotation: always PDF-targeted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnnotation {
    pub id: Uuid,
    pub page: u32,
    pub position: LegacyPosition,
    #[serde(default)]
    pub content: LegacyContent,
    #[serde(default)]
    pub comment: String,
    pub color: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPosition {
    #[serde(default)]
    pub bounding_rect: Option<LegacyRect>,
    #[serde(default)]
    pub rects: Vec<LegacyRect>,
}

/// A legacy rect: four corners plus redundant width/height.
///
/// Width/height are derivable from the corners and risk drifting from
/// them, so migration drops both and keeps the corners only.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct LegacyRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// ============================================================================
// Detection and migration
// ============================================================================

/// Returns true iff the parsed JSON value is shaped like a legacy file:
/// `version == 1` with the legacy required fields present. A current
/// version-2 file (or anything else) is false.
pub fn is_legacy_annotation_file(value: &Value) -> bool {
    value.get("version").and_then(Value::as_u64) == Some(LEGACY_VERSION)
        && value.get("fileId").map(Value::is_string) == Some(true)
        && value.get("annotations").map(Value::is_array) == Some(true)
        && value.get("lastModified").is_some()
}

/// Converts a single legacy record into the polymorphic shape.
///
/// `id`, `timestamp`, and `color` are copied unchanged; legacy `type`
/// "text" becomes a highlight style and "area" stays an area; any other
/// value passes through. Content text and comment are copied only when
/// non-empty; the rect list loses its redundant width/height fields.
pub fn migrate_legacy_annotation(legacy: &LegacyAnnotation) -> AnnotationItem {
    let kind = match legacy.kind.as_str() {
        "text" => StyleKind::Highlight,
        "area" => StyleKind::Area,
        other => StyleKind::from_name(other),
    };

    let rects: Vec<Rect<Normalized>> = legacy
        .position
        .rects
        .iter()
        .map(|r| Rect::from_corners(r.x1, r.y1, r.x2, r.y2))
        .collect();

    AnnotationItem {
        id: legacy.id,
        target: AnnotationTarget::Pdf {
            page: legacy.page,
            rects,
        },
        style: AnnotationStyle::new(legacy.color.clone(), kind),
        content: legacy
            .content
            .text
            .clone()
            .and_then(non_empty),
        comment: non_empty(legacy.comment.clone()),
        author: String::new(),
        created_at: legacy.timestamp,
    }
}

/// Migrates a whole legacy file: every annotation converted, version set
/// to the current literal, file type fixed to PDF, `fileId` and
/// `lastModified` preserved.
pub fn migrate_legacy_annotation_file(legacy: &LegacyAnnotationFile) -> AnnotationFile {
    AnnotationFile {
        version: CURRENT_VERSION,
        file_id: legacy.file_id.clone(),
        file_type: FileType::Pdf,
        annotations: legacy
            .annotations
            .iter()
            .map(migrate_legacy_annotation)
            .collect(),
        last_modified: legacy.last_modified,
    }
}

/// Parse, guard, migrate. Returns `None` on parse failure or when the
/// value is not legacy-shaped, which makes migration idempotent: feeding
/// an already-migrated version-2 file back in returns `None` rather than
/// re-migrating.
pub fn try_migrate_legacy_json(json: &str) -> Option<AnnotationFile> {
    let value: Value = serde_json::from_str(json).ok()?;
    if !is_legacy_annotation_file(&value) {
        return None;
    }
    let legacy: LegacyAnnotationFile = serde_json::from_value(value).ok()?;
    Some(migrate_legacy_annotation_file(&legacy))
}
