//! Burn-in export: draws annotation geometry permanently into a paginated
//! document's bytes.
//!
//! Only PDF-targeted annotations participate. Each normalized rect is
//! converted to page-point space against the page's MediaBox and filled
//! at a fixed translucency; annotations carrying a comment additionally
//! get a small opaque marker at their first rect's top-left corner. The
//! comment prose itself is never drawn into page content.
//!
//! The input buffer is never mutated; the export returns new bytes plus a
//! [`BurnReport`] describing anything that was skipped.

mod report;

pub use report::{BurnReport, BurnWarning};

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::coords::normalized_to_page;
use crate::error::MarginaliaError;
use crate::model::{AnnotationItem, AnnotationTarget, Normalized, Rect};

/// Fill translucency for burned-in rects.
pub const HIGHLIGHT_ALPHA: f32 = 0.35;

/// Side length in points of the comment marker square.
pub const MARKER_SIZE: f64 = 8.0;

/// Marker fill color (opaque orange-red).
const MARKER_COLOR: (f32, f32, f32) = (0.9, 0.3, 0.1);

/// Fallback page size (US Letter) when no MediaBox can be resolved.
const FALLBACK_PAGE: (f64, f64) = (612.0, 792.0);

/// Graphics-state resource name installed on each touched page.
const GS_NAME: &[u8] = b"GSmrg";

/// Fallback fill color for unknown color strings: yellow.
pub const DEFAULT_COLOR: (f32, f32, f32) = (1.0, 1.0, 0.0);

/// Exact lookup table from color names and hex aliases to RGB.
///
/// Process-wide read-only static data. Unknown strings fall back to
/// [`DEFAULT_COLOR`]: a cosmetic degradation is preferable to aborting
/// an export.
const COLOR_TABLE: &[(&str, (f32, f32, f32))] = &[
    ("yellow", (1.0, 1.0, 0.0)),
    ("#ffff00", (1.0, 1.0, 0.0)),
    ("red", (1.0, 0.0, 0.0)),
    ("#ff0000", (1.0, 0.0, 0.0)),
    ("green", (0.0, 1.0, 0.0)),
    ("#00ff00", (0.0, 1.0, 0.0)),
    ("blue", (0.0, 0.0, 1.0)),
    ("#0000ff", (0.0, 0.0, 1.0)),
    ("orange", (1.0, 0.65, 0.0)),
    ("#ffa500", (1.0, 0.65, 0.0)),
    ("purple", (0.5, 0.0, 0.5)),
    ("#800080", (0.5, 0.0, 0.5)),
    ("pink", (1.0, 0.75, 0.8)),
    ("#ffc0cb", (1.0, 0.75, 0.8)),
    ("cyan", (0.0, 1.0, 1.0)),
    ("#00ffff", (0.0, 1.0, 1.0)),
];

/// Resolves a color string to an RGB triple via the exact lookup table.
pub fn resolve_color(color: &str) -> (f32, f32, f32) {
    let key = color.to_ascii_lowercase();
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(DEFAULT_COLOR)
}

/// The result of a burn-in export.
#[derive(Clone, Debug)]
pub struct BurnOutcome {
    /// The new document bytes with annotations drawn in.
    pub bytes: Vec<u8>,

    /// Skipped pages and drawing counts.
    pub report: BurnReport,
}

/// Draws PDF-targeted annotations into the document bytes.
///
/// One blocking unit of work; cost is proportional to page count times
/// annotation count. Identical inputs produce identical output, modulo
/// any non-determinism internal to the PDF writer.
pub fn burn_annotations(
    pdf_bytes: &[u8],
    items: &[AnnotationItem],
) -> Result<BurnOutcome, MarginaliaError> {
    let mut doc = Document::load_mem(pdf_bytes)?;
    let mut report = BurnReport::new();

    let pages: BTreeMap<u32, ObjectId> = doc.get_pages();
    let page_count = pages.len();

    // Filter to PDF targets and group by page, preserving input order
    // within each page so z-order stays stable.
    type Grouped<'a> = Vec<(&'a AnnotationItem, &'a [Rect<Normalized>])>;
    let mut by_page: BTreeMap<u32, Grouped> = BTreeMap::new();
    for item in items {
        let (page, rects) = match &item.target {
            AnnotationTarget::Pdf { page, rects } => (*page, rects.as_slice()),
            AnnotationTarget::Image { .. }
            | AnnotationTarget::CodeLine { .. }
            | AnnotationTarget::TextAnchor { .. } => continue,
        };
        if page == 0 || !pages.contains_key(&page) {
            report.add(BurnWarning::PageOutOfRange {
                annotation: item.id,
                page,
                page_count,
            });
            report.skipped += 1;
            continue;
        }
        by_page.entry(page).or_default().push((item, rects));
    }

    if by_page.is_empty() {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        return Ok(BurnOutcome { bytes, report });
    }

    let gs_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => Object::Real(HIGHLIGHT_ALPHA),
        "CA" => Object::Real(HIGHLIGHT_ALPHA),
    });

    for (page_no, page_items) in by_page {
        let page_id = pages[&page_no];
        let (page_w, page_h) = page_dimensions(&doc, page_id);

        let mut ops: Vec<Operation> = Vec::new();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("gs", vec![Object::Name(GS_NAME.to_vec())]));

        let mut markers: Vec<Operation> = Vec::new();

        for (item, rects) in page_items {
            let (r, g, b) = resolve_color(&item.style.color);
            ops.push(Operation::new(
                "rg",
                vec![Object::Real(r), Object::Real(g), Object::Real(b)],
            ));

            for rect in rects {
                let page_rect = normalized_to_page(*rect, page_w, page_h)?;
                let (x, y, w, h) = page_rect.to_xywh();
                ops.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(x as f32),
                        Object::Real(y as f32),
                        Object::Real(w as f32),
                        Object::Real(h as f32),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
                report.rects_drawn += 1;
            }

            if item.comment.is_some() {
                if let Some(first) = rects.first() {
                    let page_rect = normalized_to_page(*first, page_w, page_h)?;
                    // Marker centered on the rect's top-left corner, drawn
                    // opaque after the translucent highlight pass.
                    let cx = page_rect.min.x - MARKER_SIZE / 2.0;
                    let cy = page_rect.max.y - MARKER_SIZE / 2.0;
                    let (mr, mg, mb) = MARKER_COLOR;
                    markers.push(Operation::new(
                        "rg",
                        vec![Object::Real(mr), Object::Real(mg), Object::Real(mb)],
                    ));
                    markers.push(Operation::new(
                        "re",
                        vec![
                            Object::Real(cx as f32),
                            Object::Real(cy as f32),
                            Object::Real(MARKER_SIZE as f32),
                            Object::Real(MARKER_SIZE as f32),
                        ],
                    ));
                    markers.push(Operation::new("f", vec![]));
                    report.markers_drawn += 1;
                }
            }
        }

        ops.push(Operation::new("Q", vec![]));

        if !markers.is_empty() {
            ops.push(Operation::new("q", vec![]));
            ops.extend(markers);
            ops.push(Operation::new("Q", vec![]));
        }

        let content = Content { operations: ops };
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        ensure_page_gs(&mut doc, page_id, gs_id)?;
        append_page_content(&mut doc, page_id, stream_id)?;
        report.pages_touched += 1;
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(BurnOutcome { bytes, report })
}

/// Reads a numeric PDF object as f64.
fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Extracts (width, height) from a MediaBox-style array, resolving an
/// indirection if present.
fn box_dimensions(doc: &Document, obj: &Object) -> Option<(f64, f64)> {
    let obj = match obj.as_reference() {
        Ok(id) => doc.get_object(id).ok()?,
        Err(_) => obj,
    };
    let arr = obj.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let x1 = number(&arr[0])?;
    let y1 = number(&arr[1])?;
    let x2 = number(&arr[2])?;
    let y2 = number(&arr[3])?;
    let (w, h) = ((x2 - x1).abs(), (y2 - y1).abs());
    if w > 0.0 && h > 0.0 {
        Some((w, h))
    } else {
        None
    }
}

/// Resolves a page's MediaBox dimensions, following the Parent chain for
/// inherited boxes, with a US Letter fallback.
fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f64, f64) {
    let mut current = page_id;
    for _ in 0..8 {
        let Ok(dict) = doc.get_dictionary(current) else {
            break;
        };
        if let Ok(media_box) = dict.get(b"MediaBox") {
            if let Some(dims) = box_dimensions(doc, media_box) {
                return dims;
            }
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }
    FALLBACK_PAGE
}

/// Clones the nearest inherited Resources dictionary from the Parent
/// chain, so a page gaining its own Resources keeps its fonts working.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = doc
        .get_dictionary(page_id)
        .ok()?
        .get(b"Parent")
        .and_then(Object::as_reference)
        .ok()?;
    for _ in 0..8 {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(res) = dict.get(b"Resources") {
            return match res {
                Object::Reference(rid) => doc.get_dictionary(*rid).ok().cloned(),
                Object::Dictionary(d) => Some(d.clone()),
                _ => None,
            };
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// Installs the shared ExtGState under [`GS_NAME`] in the page's
/// resources, creating or inheriting the Resources dictionary as needed.
fn ensure_page_gs(
    doc: &mut Document,
    page_id: ObjectId,
    gs_id: ObjectId,
) -> Result<(), lopdf::Error> {
    enum ResLoc {
        Inline,
        Ref(ObjectId),
        Missing,
    }

    let loc = {
        let page = doc.get_dictionary(page_id)?;
        match page.get(b"Resources") {
            Ok(Object::Reference(rid)) => ResLoc::Ref(*rid),
            Ok(Object::Dictionary(_)) => ResLoc::Inline,
            _ => ResLoc::Missing,
        }
    };

    let ext_ref = match loc {
        ResLoc::Inline => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            let res = page.get_mut(b"Resources")?.as_dict_mut()?;
            set_gs_entry(res, gs_id)
        }
        ResLoc::Ref(rid) => {
            let res = doc.get_object_mut(rid)?.as_dict_mut()?;
            set_gs_entry(res, gs_id)
        }
        ResLoc::Missing => {
            let mut res = inherited_resources(doc, page_id).unwrap_or_default();
            let ext_ref = set_gs_entry(&mut res, gs_id);
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("Resources", Object::Dictionary(res));
            ext_ref
        }
    };

    // ExtGState stored behind its own indirection: mutate the target.
    if let Some(rid) = ext_ref {
        let gs = doc.get_object_mut(rid)?.as_dict_mut()?;
        gs.set(GS_NAME, Object::Reference(gs_id));
    }
    Ok(())
}

/// Adds the graphics state to an ExtGState dictionary. Returns the
/// object id to mutate instead when the entry is an indirect reference.
fn set_gs_entry(res: &mut Dictionary, gs_id: ObjectId) -> Option<ObjectId> {
    match res.get_mut(b"ExtGState") {
        Ok(Object::Dictionary(gs)) => {
            gs.set(GS_NAME, Object::Reference(gs_id));
            None
        }
        Ok(Object::Reference(rid)) => Some(*rid),
        _ => {
            let mut gs = Dictionary::new();
            gs.set(GS_NAME, Object::Reference(gs_id));
            res.set("ExtGState", Object::Dictionary(gs));
            None
        }
    }
}

/// Appends a content stream to the page's Contents entry, preserving the
/// existing stream(s).
fn append_page_content(
    doc: &mut Document,
    page_id: ObjectId,
    stream_id: ObjectId,
) -> Result<(), lopdf::Error> {
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    match page.get_mut(b"Contents") {
        Ok(Object::Array(arr)) => arr.push(Object::Reference(stream_id)),
        Ok(obj @ Object::Reference(_)) => {
            let existing = obj.clone();
            *obj = Object::Array(vec![existing, Object::Reference(stream_id)]);
        }
        _ => page.set("Contents", Object::Reference(stream_id)),
    }
    Ok(())
}
