//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between the four coordinate systems at compile time. The space is a
//! compile-time tag only; serialized values never embed it.

use std::fmt;

/// Marker type for absolute canvas coordinates in pixels.
///
/// Canvas coordinates are positions within the rendered canvas, where
/// (0, 0) is the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Canvas {}

/// Marker type for percentage coordinates (0.0 to 100.0).
///
/// Percentage coordinates express positions as a fraction of the canvas
/// dimensions times 100. Used by the freeform shape overlay format.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percent {}

/// Marker type for normalized coordinates (0.0 to 1.0).
///
/// Normalized coordinates express positions as fractions of the page
/// dimensions with a top-left origin, making them resolution-independent.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

/// Marker type for PDF page-point coordinates.
///
/// Page points are in units of 1/72 inch with the origin at the
/// bottom-left corner of the page, Y increasing upward.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagePoint {}

impl fmt::Debug for Canvas {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // unreachable: Canvas has no variants
    }
}

impl fmt::Debug for Percent {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for PagePoint {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
