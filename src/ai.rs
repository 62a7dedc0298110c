//! Renders annotation collections into location-tagged text for
//! language-model consumption.
//!
//! Stateless formatting only: `"<Location>: [<StyleKind>] '<content>' -
//! Note: '<comment>'"`, with absent segments omitted entirely rather
//! than rendered as empty quotes.

use crate::model::{AnnotationItem, AnnotationTarget};

/// Formats one annotation as a single location-tagged line.
///
/// ```
/// use marginalia::ai::format_annotation;
/// use marginalia::model::{
///     AnnotationItem, AnnotationStyle, AnnotationTarget, Rect, StyleKind,
/// };
///
/// let item = AnnotationItem::new(
///     AnnotationTarget::Pdf { page: 1, rects: vec![Rect::from_corners(0.1, 0.2, 0.4, 0.3)] },
///     AnnotationStyle::new("yellow", StyleKind::Highlight),
///     "reviewer",
/// )
/// .with_content("Quantum entanglement is fascinating")
/// .with_comment("Check this citation");
///
/// assert_eq!(
///     format_annotation(&item),
///     "Page 1: [Highlight] 'Quantum entanglement is fascinating' - Note: 'Check this citation'"
/// );
/// ```
pub fn format_annotation(item: &AnnotationItem) -> String {
    let location = match &item.target {
        AnnotationTarget::Pdf { page, .. } => format!("Page {}", page),
        AnnotationTarget::CodeLine { line } => format!("Line {}", line),
        AnnotationTarget::Image { .. } => "Image region".to_string(),
        AnnotationTarget::TextAnchor { element_id, .. } => format!("Element {}", element_id),
    };

    let mut line = format!("{}: [{}]", location, item.style.kind.label());

    // Absent segments vanish; they are never rendered as empty quotes.
    if let Some(content) = item.content.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" '{}'", content));
    }
    if let Some(comment) = item.comment.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" - Note: '{}'", comment));
    }
    line
}

/// Formats a batch: one line per item, in the input order. Empty input
/// produces an empty string.
pub fn export_annotations(items: &[AnnotationItem]) -> String {
    items
        .iter()
        .map(format_annotation)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Predicate: the annotation targets the given 1-indexed PDF page.
pub fn on_page(item: &AnnotationItem, page: u32) -> bool {
    item.target.page() == Some(page)
}

/// Predicate: the annotation targets a code line within [start, end].
pub fn in_line_range(item: &AnnotationItem, start: u32, end: u32) -> bool {
    match item.target.line() {
        Some(line) => line >= start && line <= end,
        None => false,
    }
}

/// Predicate: the annotation carries a non-empty comment.
pub fn has_comment(item: &AnnotationItem) -> bool {
    item.comment.as_deref().is_some_and(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationStyle, AnnotationTarget, Rect, StyleKind};

    fn pdf_item() -> AnnotationItem {
        AnnotationItem::new(
            AnnotationTarget::Pdf {
                page: 1,
                rects: vec![Rect::from_corners(0.1, 0.2, 0.4, 0.3)],
            },
            AnnotationStyle::new("yellow", StyleKind::Highlight),
            "reviewer",
        )
    }

    #[test]
    fn test_full_format() {
        let item = pdf_item()
            .with_content("Quantum entanglement is fascinating")
            .with_comment("Check this citation");
        assert_eq!(
            format_annotation(&item),
            "Page 1: [Highlight] 'Quantum entanglement is fascinating' - Note: 'Check this citation'"
        );
    }

    #[test]
    fn test_absent_segments_are_omitted() {
        assert_eq!(format_annotation(&pdf_item()), "Page 1: [Highlight]");

        let with_note = pdf_item().with_comment("just a note");
        assert_eq!(
            format_annotation(&with_note),
            "Page 1: [Highlight] - Note: 'just a note'"
        );
    }

    #[test]
    fn test_locations_per_variant() {
        let line = AnnotationItem::new(
            AnnotationTarget::CodeLine { line: 42 },
            AnnotationStyle::new("red", StyleKind::Underline),
            "a",
        );
        assert_eq!(format_annotation(&line), "Line 42: [Underline]");

        let image = AnnotationItem::new(
            AnnotationTarget::Image {
                x: 1.0,
                y: 2.0,
                w: 3.0,
                h: 4.0,
            },
            AnnotationStyle::new("blue", StyleKind::Area),
            "a",
        );
        assert_eq!(format_annotation(&image), "Image region: [Area]");

        let anchor = AnnotationItem::new(
            AnnotationTarget::TextAnchor {
                element_id: "para-9".into(),
                offset: 3,
            },
            AnnotationStyle::new("pink", StyleKind::Pin),
            "a",
        );
        assert_eq!(format_annotation(&anchor), "Element para-9: [Pin]");
    }

    #[test]
    fn test_batch_export_order_and_empty() {
        assert_eq!(export_annotations(&[]), "");

        let a = pdf_item().with_content("first");
        let b = pdf_item().with_content("second");
        let text = export_annotations(&[a, b]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }

    #[test]
    fn test_predicates() {
        let item = pdf_item().with_comment("note");
        assert!(on_page(&item, 1));
        assert!(!on_page(&item, 2));
        assert!(has_comment(&item));
        assert!(!has_comment(&pdf_item()));

        let line_item = AnnotationItem::new(
            AnnotationTarget::CodeLine { line: 10 },
            AnnotationStyle::new("red", StyleKind::Highlight),
            "a",
        );
        assert!(in_line_range(&line_item, 5, 15));
        assert!(!in_line_range(&line_item, 11, 15));
        assert!(!in_line_range(&item, 0, 100));
    }
}
