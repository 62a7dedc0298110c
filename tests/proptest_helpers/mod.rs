#![allow(dead_code)]

use marginalia::model::{
    AnnotationFile, AnnotationItem, AnnotationStyle, AnnotationTarget, FileType, Normalized, Rect,
    StyleKind,
};
use marginalia::shapes::ShapeRecord;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use uuid::Uuid;

/// Round-trip tolerance for a transform against dimensions (w, h).
pub fn eps_for(width: f64, height: f64) -> f64 {
    1e-4 * width.max(height)
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Positive canvas or page dimensions, wide enough to exercise rounding.
pub fn arb_dimensions() -> BoxedStrategy<(f64, f64)> {
    ((1u32..=8192, 1u32..=8192))
        .prop_map(|(w, h)| (w as f64, h as f64))
        .boxed()
}

/// An ordered rect with all coordinates inside [0, 1].
pub fn arb_normalized_rect() -> BoxedStrategy<Rect<Normalized>> {
    (0u32..=1000, 0u32..=1000, 0u32..=1000, 0u32..=1000)
        .prop_map(|(x, y, dx, dy)| {
            let x1 = x as f64 / 1000.0;
            let y1 = y as f64 / 1000.0;
            let x2 = (x1 + dx as f64 / 1000.0).min(1.0);
            let y2 = (y1 + dy as f64 / 1000.0).min(1.0);
            Rect::from_corners(x1, y1, x2, y2)
        })
        .boxed()
}

fn arb_style_kind() -> BoxedStrategy<StyleKind> {
    prop_oneof![
        Just(StyleKind::Highlight),
        Just(StyleKind::Underline),
        Just(StyleKind::Area),
        Just(StyleKind::Drawing),
        Just(StyleKind::Pin),
        "[a-z]{1,12}".prop_map(StyleKind::Other),
    ]
    .boxed()
}

fn arb_style() -> BoxedStrategy<AnnotationStyle> {
    ("[a-z]{1,10}", arb_style_kind())
        .prop_map(|(color, kind)| AnnotationStyle::new(color, kind))
        .boxed()
}

/// Any structurally valid target.
pub fn arb_target() -> BoxedStrategy<AnnotationTarget> {
    prop_oneof![
        (1u32..=500, proptest::collection::vec(arb_normalized_rect(), 0..4))
            .prop_map(|(page, rects)| AnnotationTarget::Pdf { page, rects }),
        (0u32..=900, 0u32..=900, 0u32..=100, 0u32..=100).prop_map(|(x, y, w, h)| {
            AnnotationTarget::Image {
                x: x as f64 / 10.0,
                y: y as f64 / 10.0,
                w: w as f64 / 10.0,
                h: h as f64 / 10.0,
            }
        }),
        (1u32..=100_000).prop_map(|line| AnnotationTarget::CodeLine { line }),
        ("[a-z0-9-]{1,16}", any::<u32>()).prop_map(|(element_id, offset)| {
            AnnotationTarget::TextAnchor { element_id, offset }
        }),
    ]
    .boxed()
}

/// A structurally valid annotation with a seeded (deterministic) id.
pub fn arb_item() -> BoxedStrategy<AnnotationItem> {
    (
        any::<u128>(),
        arb_target(),
        arb_style(),
        proptest::option::of("[ -~]{1,40}"),
        proptest::option::of("[ -~]{1,40}"),
        "[a-z]{1,12}",
        0i64..=4_102_444_800_000,
    )
        .prop_map(|(id, target, style, content, comment, author, created_at)| {
            let mut item = AnnotationItem::new(target, style, author);
            item.id = Uuid::from_u128(id);
            item.content = content;
            item.comment = comment;
            item.created_at = created_at;
            item
        })
        .boxed()
}

/// A valid annotation file with unique annotation ids.
pub fn arb_annotation_file(max_items: usize) -> BoxedStrategy<AnnotationFile> {
    (
        "[a-z0-9._-]{1,24}",
        prop_oneof![
            Just(FileType::Pdf),
            Just(FileType::Image),
            Just(FileType::Code),
            Just(FileType::Text),
        ],
        proptest::collection::vec(arb_item(), 0..=max_items),
        0i64..=4_102_444_800_000,
    )
        .prop_map(|(file_id, file_type, mut annotations, last_modified)| {
            // Re-key items so ids are unique within the file.
            for (idx, item) in annotations.iter_mut().enumerate() {
                item.id = Uuid::from_u128(idx as u128 + 1);
            }
            let mut file = AnnotationFile::new(file_id, file_type);
            file.annotations = annotations;
            file.last_modified = last_modified;
            file
        })
        .boxed()
}

/// A percent-space shape that passes serialized-shape validation.
pub fn arb_percent_shape() -> BoxedStrategy<ShapeRecord> {
    (
        "[a-z0-9:-]{1,16}",
        "[a-z]{1,10}",
        0u32..=1000,
        0u32..=1000,
        proptest::option::of(0u32..=1000),
        proptest::option::of(0u32..=1000),
    )
        .prop_map(|(id, kind, x, y, w, h)| {
            let mut shape = ShapeRecord::new(id, kind, x as f64 / 10.0, y as f64 / 10.0);
            if let Some(w) = w {
                shape
                    .props
                    .insert("w".into(), serde_json::Value::from(w as f64 / 10.0));
            }
            if let Some(h) = h {
                shape
                    .props
                    .insert("h".into(), serde_json::Value::from(h as f64 / 10.0));
            }
            shape
        })
        .boxed()
}
