//! Percentage-space persistence for freeform vector overlays on raster
//! images.
//!
//! Shapes live in an opaque property bag owned by the drawing tool; this
//! module only converts positions (and the numeric `w`/`h` dimension
//! props) between absolute canvas pixels and percentage space, and wraps
//! the result in a versioned sidecar container. Shape order encodes
//! paint/z-order and is preserved exactly; the batch is never resorted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MarginaliaError;
use crate::model::{Percent, Rect};
use crate::validation::is_valid_serialized_shape;

/// The exact version literal of the shape sidecar container.
pub const SHAPES_VERSION: u32 = 1;

/// Extent in percent contributed by a shape with no explicit dimensions,
/// so degenerate shapes still produce bounding-box area.
pub const DEFAULT_SHAPE_EXTENT: f64 = 1.0;

/// One freeform shape.
///
/// `x`/`y` are the shape's position; whether they are absolute pixels or
/// percentages depends on which side of [`serialize_shapes`] /
/// [`deserialize_shapes`] the record sits on — the value itself never
/// embeds its space. Everything in `props` except numeric `w`/`h` passes
/// through conversion untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub x: f64,
    pub y: f64,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ShapeRecord {
    /// Creates a shape with an empty property bag.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x,
            y,
            props: Map::new(),
            rotation: None,
            is_locked: None,
            opacity: None,
        }
    }

    /// Reads a numeric dimension prop (`w` or `h`), if present.
    pub fn dimension(&self, key: &str) -> Option<f64> {
        self.props.get(key).and_then(Value::as_f64)
    }
}

/// The shape sidecar container persisted next to an image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSidecar {
    pub version: u32,
    pub shapes: Vec<ShapeRecord>,
    pub image_width: f64,
    pub image_height: f64,
}

fn check_canvas(width: f64, height: f64) -> Result<(), MarginaliaError> {
    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(MarginaliaError::InvalidCanvas { width, height });
    }
    Ok(())
}

/// Converts one shape's position and numeric dimensions by the given
/// per-axis scale factors. All other props pass through untouched.
fn scale_shape(shape: &ShapeRecord, sx: f64, sy: f64) -> ShapeRecord {
    let mut out = shape.clone();
    out.x = shape.x * sx;
    out.y = shape.y * sy;
    for (key, scale) in [("w", sx), ("h", sy)] {
        if let Some(v) = shape.dimension(key) {
            if let Some(scaled) = serde_json::Number::from_f64(v * scale) {
                out.props.insert(key.to_string(), Value::Number(scaled));
            }
        }
    }
    out
}

/// Converts absolute-pixel shapes to percentage space.
///
/// Order and ids are preserved exactly. Errors if either canvas
/// dimension is non-positive.
pub fn serialize_shapes(
    shapes: &[ShapeRecord],
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<ShapeRecord>, MarginaliaError> {
    check_canvas(canvas_width, canvas_height)?;
    Ok(shapes
        .iter()
        .map(|s| scale_shape(s, 100.0 / canvas_width, 100.0 / canvas_height))
        .collect())
}

/// Converts percentage-space shapes back to absolute pixels.
pub fn deserialize_shapes(
    shapes: &[ShapeRecord],
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<ShapeRecord>, MarginaliaError> {
    check_canvas(canvas_width, canvas_height)?;
    Ok(shapes
        .iter()
        .map(|s| scale_shape(s, canvas_width / 100.0, canvas_height / 100.0))
        .collect())
}

/// Serializes absolute-pixel shapes into the sidecar JSON container.
pub fn shapes_to_json(
    shapes: &[ShapeRecord],
    image_width: f64,
    image_height: f64,
) -> Result<String, MarginaliaError> {
    let sidecar = ShapeSidecar {
        version: SHAPES_VERSION,
        shapes: serialize_shapes(shapes, image_width, image_height)?,
        image_width,
        image_height,
    };
    serde_json::to_string_pretty(&sidecar).map_err(MarginaliaError::Encode)
}

/// Parses a sidecar container and restores absolute-pixel shapes against
/// the image dimensions it recorded. Total: returns `None` on parse
/// failure, a wrong version literal, invalid dimensions, or any invalid
/// shape — never panics.
pub fn json_to_shapes(json: &str) -> Option<Vec<ShapeRecord>> {
    let sidecar: ShapeSidecar = serde_json::from_str(json).ok()?;
    if sidecar.version != SHAPES_VERSION {
        return None;
    }
    if !sidecar.shapes.iter().all(is_valid_serialized_shape) {
        return None;
    }
    deserialize_shapes(&sidecar.shapes, sidecar.image_width, sidecar.image_height).ok()
}

/// The minimal axis-aligned percentage rect covering every shape's
/// position plus its dimensions. `None` for empty input. Shapes without
/// explicit `w`/`h` contribute [`DEFAULT_SHAPE_EXTENT`].
pub fn shapes_bounding_box(shapes: &[ShapeRecord]) -> Option<Rect<Percent>> {
    let first = shapes.first()?;

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for shape in shapes {
        let w = shape.dimension("w").unwrap_or(DEFAULT_SHAPE_EXTENT);
        let h = shape.dimension("h").unwrap_or(DEFAULT_SHAPE_EXTENT);
        min_x = min_x.min(shape.x);
        min_y = min_y.min(shape.y);
        max_x = max_x.max(shape.x + w);
        max_y = max_y.max(shape.y + h);
    }

    Some(Rect::from_corners(min_x, min_y, max_x, max_y))
}
