//! Structural validation of annotation files and shapes.
//!
//! Validators check structure, types, and ranges only. Cross-document
//! semantic validity (whether a code line exists in the real file, whether
//! a page exists in the real document) is a collaborator's concern.
//!
//! Out-of-range values fail validation outright; they are never clamped,
//! since clamping would corrupt stored author intent.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::model::{AnnotationFile, AnnotationItem, AnnotationTarget, CURRENT_VERSION};
use crate::shapes::ShapeRecord;

/// Validates an annotation file and returns a report of all issues found.
///
/// Checks the version literal, file id, duplicate annotation ids, and
/// every annotation's target geometry.
pub fn validate_file(file: &AnnotationFile) -> ValidationReport {
    let mut report = ValidationReport::new();

    if file.version != CURRENT_VERSION {
        report.add(ValidationIssue::error(
            IssueCode::WrongVersion,
            format!(
                "Version {} is not the supported version {}",
                file.version, CURRENT_VERSION
            ),
            IssueContext::File,
        ));
    }

    if file.file_id.is_empty() {
        report.add(ValidationIssue::error(
            IssueCode::EmptyFileId,
            "Empty file identifier",
            IssueContext::File,
        ));
    }

    let mut seen_ids: HashMap<uuid::Uuid, usize> = HashMap::new();
    for (idx, item) in file.annotations.iter().enumerate() {
        if let Some(first_idx) = seen_ids.get(&item.id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateAnnotationId,
                format!(
                    "Duplicate annotation id {} (first seen at index {})",
                    item.id, first_idx
                ),
                IssueContext::Annotation {
                    id: item.id.to_string(),
                },
            ));
        } else {
            seen_ids.insert(item.id, idx);
        }

        validate_item(item, &mut report);
    }

    report
}

/// Validates a single annotation's structure into the given report.
fn validate_item(item: &AnnotationItem, report: &mut ValidationReport) {
    let ctx = || IssueContext::Annotation {
        id: item.id.to_string(),
    };

    if item.author.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyAuthor,
            "Empty author string",
            ctx(),
        ));
    }

    // Absent and empty are distinct states; "" should never be stored.
    if item.content.as_deref() == Some("") {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyOptionalField,
            "Content is an empty string; omit the field instead",
            ctx(),
        ));
    }
    if item.comment.as_deref() == Some("") {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyOptionalField,
            "Comment is an empty string; omit the field instead",
            ctx(),
        ));
    }

    match &item.target {
        AnnotationTarget::Pdf { page, rects } => {
            if *page == 0 {
                report.add(ValidationIssue::error(
                    IssueCode::PageOutOfRange,
                    "Page 0 is invalid; pages are 1-indexed",
                    ctx(),
                ));
            }
            for rect in rects {
                if !rect.is_finite() {
                    report.add(ValidationIssue::error(
                        IssueCode::RectNotFinite,
                        format!("Non-finite rect {:?}", rect),
                        ctx(),
                    ));
                    continue;
                }
                if !rect.is_ordered() {
                    report.add(ValidationIssue::error(
                        IssueCode::RectNotOrdered,
                        format!("Rect {:?} has min > max", rect),
                        ctx(),
                    ));
                }
                let coords = [rect.min.x, rect.min.y, rect.max.x, rect.max.y];
                if coords.iter().any(|c| !(0.0..=1.0).contains(c)) {
                    report.add(ValidationIssue::error(
                        IssueCode::NormalizedOutOfRange,
                        format!("Rect {:?} has coordinates outside [0, 1]", rect),
                        ctx(),
                    ));
                }
            }
        }
        AnnotationTarget::Image { x, y, w, h } => {
            for (name, value) in [("x", x), ("y", y), ("w", w), ("h", h)] {
                if !value.is_finite() || !(0.0..=100.0).contains(value) {
                    report.add(ValidationIssue::error(
                        IssueCode::PercentOutOfRange,
                        format!("Image region {} = {} is outside [0, 100]", name, value),
                        ctx(),
                    ));
                }
            }
        }
        AnnotationTarget::CodeLine { line } => {
            if *line == 0 {
                report.add(ValidationIssue::error(
                    IssueCode::PageOutOfRange,
                    "Line 0 is invalid; lines are 1-indexed",
                    ctx(),
                ));
            }
        }
        AnnotationTarget::TextAnchor { element_id, .. } => {
            if element_id.is_empty() {
                report.add(ValidationIssue::error(
                    IssueCode::EmptyFileId,
                    "Empty element id in text anchor",
                    ctx(),
                ));
            }
        }
    }
}

/// Returns true if the annotation has no structural errors.
///
/// Warnings (empty author, stored empty strings) do not fail this check.
pub fn is_valid_annotation_item(item: &AnnotationItem) -> bool {
    let mut report = ValidationReport::new();
    validate_item(item, &mut report);
    report.is_ok()
}

/// Returns true if a serialized (percent-space) shape is structurally valid.
///
/// Position must be finite and within [0, 100]; rotation and opacity, when
/// present, must be finite; id and type must be non-empty.
pub fn is_valid_serialized_shape(shape: &ShapeRecord) -> bool {
    if shape.id.is_empty() || shape.kind.is_empty() {
        return false;
    }
    if !shape.x.is_finite() || !shape.y.is_finite() {
        return false;
    }
    if !(0.0..=100.0).contains(&shape.x) || !(0.0..=100.0).contains(&shape.y) {
        return false;
    }
    if let Some(rotation) = shape.rotation {
        if !rotation.is_finite() {
            return false;
        }
    }
    if let Some(opacity) = shape.opacity {
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return false;
        }
    }
    is_valid_shape_props(shape)
}

/// Returns true if the opaque property bag is structurally sound: any
/// numeric `w`/`h` dimensions present must be finite and non-negative.
pub fn is_valid_shape_props(shape: &ShapeRecord) -> bool {
    for key in ["w", "h"] {
        if let Some(value) = shape.props.get(key) {
            match value.as_f64() {
                Some(v) if v.is_finite() && v >= 0.0 => {}
                // Non-numeric w/h passes through untouched; only numeric
                // dimensions participate in conversion and range checks.
                None => {}
                _ => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AnnotationFile, AnnotationItem, AnnotationStyle, AnnotationTarget, FileType, Rect,
        StyleKind,
    };

    fn item(target: AnnotationTarget) -> AnnotationItem {
        AnnotationItem::new(
            target,
            AnnotationStyle::new("yellow", StyleKind::Highlight),
            "reviewer",
        )
    }

    fn valid_file() -> AnnotationFile {
        let mut file = AnnotationFile::new("docs-paper.pdf", FileType::Pdf);
        file.annotations.push(item(AnnotationTarget::Pdf {
            page: 1,
            rects: vec![Rect::from_corners(0.1, 0.2, 0.4, 0.3)],
        }));
        file
    }

    #[test]
    fn test_valid_file_is_clean() {
        let report = validate_file(&valid_file());
        assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn test_wrong_version_is_error() {
        let mut file = valid_file();
        file.version = 3;
        let report = validate_file(&file);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::WrongVersion));
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let mut file = valid_file();
        let dup = file.annotations[0].clone();
        file.annotations.push(dup);
        let report = validate_file(&file);
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::DuplicateAnnotationId));
    }

    #[test]
    fn test_percent_out_of_range_not_clamped() {
        let bad = item(AnnotationTarget::Image {
            x: 105.0,
            y: 10.0,
            w: 5.0,
            h: 5.0,
        });
        assert!(!is_valid_annotation_item(&bad));
        let mut report = ValidationReport::new();
        validate_item(&bad, &mut report);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::PercentOutOfRange));
    }

    #[test]
    fn test_unordered_rect_is_error() {
        let bad = item(AnnotationTarget::Pdf {
            page: 1,
            rects: vec![Rect::from_corners(0.4, 0.3, 0.1, 0.2)],
        });
        assert!(!is_valid_annotation_item(&bad));
    }

    #[test]
    fn test_page_zero_is_error() {
        let bad = item(AnnotationTarget::Pdf {
            page: 0,
            rects: vec![],
        });
        assert!(!is_valid_annotation_item(&bad));
    }

    #[test]
    fn test_empty_author_is_warning_only() {
        let mut it = item(AnnotationTarget::CodeLine { line: 3 });
        it.author = String::new();
        assert!(is_valid_annotation_item(&it));
        let mut report = ValidationReport::new();
        validate_item(&it, &mut report);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_shape_validators() {
        let mut shape = ShapeRecord::new("shape:1", "rect", 10.0, 20.0);
        assert!(is_valid_serialized_shape(&shape));

        shape.x = 120.0;
        assert!(!is_valid_serialized_shape(&shape));

        shape.x = 10.0;
        shape
            .props
            .insert("w".into(), serde_json::Value::from(-5.0));
        assert!(!is_valid_shape_props(&shape));
    }
}
