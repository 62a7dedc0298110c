//! Typed points and rectangles using PhantomData for compile-time safety.
//!
//! The `TSpace` parameter is one of the markers in [`super::space`],
//! ensuring that values from different coordinate spaces cannot be
//! accidentally mixed. Serialized forms are plain `{x, y}` and
//! `{x1, y1, x2, y2}` objects; the space tag never appears on disk.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A 2D point with a type-level marker for the coordinate space.
#[derive(Clone, Copy, PartialEq)]
pub struct Point<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point<TSpace> {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<TSpace> std::fmt::Debug for Point<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Point<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Point<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Point", 2)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Point<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct PointData {
            x: f64,
            y: f64,
        }
        let data = PointData::deserialize(deserializer)?;
        Ok(Point::new(data.x, data.y))
    }
}

/// An axis-aligned rectangle stored as two corners (x1, y1, x2, y2).
///
/// Note: this type does NOT enforce that min < max in the constructor,
/// allowing malformed rects to exist in memory. Validation catches and
/// reports these rather than preventing them from being represented.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    pub min: Point<TSpace>,
    pub max: Point<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a new rectangle from min and max corners.
    #[inline]
    pub fn new(min: Point<TSpace>, max: Point<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new rectangle from explicit corner coordinates.
    #[inline]
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Point::new(x1, y1),
            max: Point::new(x2, y2),
        }
    }

    /// Creates a rectangle from XYWH form, where (x, y) is the min corner.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(x, y, x + width, y + height)
    }

    /// Returns the rectangle in XYWH form (x, y, width, height).
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.width(), self.height())
    }

    /// Returns the width. May be negative if the rect is malformed.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height. May be negative if the rect is malformed.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if all coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the rect is properly ordered (min <= max per axis).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl<TSpace> std::fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x1", &self.min.x)
            .field("y1", &self.min.y)
            .field("x2", &self.max.x)
            .field("y2", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for Rect<TSpace> {
    fn default() -> Self {
        Self::from_corners(0.0, 0.0, 0.0, 0.0)
    }
}

// Serialized as {x1, y1, x2, y2}: the file format stores corners only.
// Width/height are derivable and storing them risks drift.
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x1", &self.min.x)?;
        state.serialize_field("y1", &self.min.y)?;
        state.serialize_field("x2", &self.max.x)?;
        state.serialize_field("y2", &self.max.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::from_corners(data.x1, data.y1, data.x2, data.y2))
    }
}
