//! Coordinate transforms between the four spaces.
//!
//! All functions are stateless and pure. Non-positive dimensions are a
//! caller error and return `Err`; values are never clamped or defaulted,
//! since clamping would silently corrupt stored author intent.
//!
//! Spaces:
//! - canvas: absolute pixels, top-left origin
//! - percent: 0..100 of canvas width/height
//! - normalized: 0..1 of page width/height, top-left origin
//! - page points: PDF points, bottom-left origin (Y flipped)
//!
//! Round-trip guarantee: for positive dimensions,
//! `inverse(forward(v))` is within a relative tolerance of
//! `1e-4 * max(dimension)` of `v`.

use crate::error::MarginaliaError;
use crate::model::{Canvas, Normalized, PagePoint, Percent, Point, Rect};

fn check_canvas(width: f64, height: f64) -> Result<(), MarginaliaError> {
    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(MarginaliaError::InvalidCanvas { width, height });
    }
    Ok(())
}

fn check_page(width: f64, height: f64) -> Result<(), MarginaliaError> {
    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(MarginaliaError::InvalidPage { width, height });
    }
    Ok(())
}

/// Converts an absolute canvas point to percentage space.
pub fn point_to_percent(
    point: Point<Canvas>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Point<Percent>, MarginaliaError> {
    check_canvas(canvas_width, canvas_height)?;
    Ok(Point::new(
        point.x / canvas_width * 100.0,
        point.y / canvas_height * 100.0,
    ))
}

/// Converts a percentage point back to absolute canvas space.
pub fn percent_to_point(
    point: Point<Percent>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Point<Canvas>, MarginaliaError> {
    check_canvas(canvas_width, canvas_height)?;
    Ok(Point::new(
        point.x / 100.0 * canvas_width,
        point.y / 100.0 * canvas_height,
    ))
}

/// Converts an absolute canvas rect to percentage space.
///
/// Both corners are transformed independently, so width/height scale with
/// the same factors as the positions.
pub fn rect_to_percent(
    rect: Rect<Canvas>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Rect<Percent>, MarginaliaError> {
    let min = point_to_percent(rect.min, canvas_width, canvas_height)?;
    let max = point_to_percent(rect.max, canvas_width, canvas_height)?;
    Ok(Rect::new(min, max))
}

/// Converts a percentage rect back to absolute canvas space.
pub fn percent_to_rect(
    rect: Rect<Percent>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Rect<Canvas>, MarginaliaError> {
    let min = percent_to_point(rect.min, canvas_width, canvas_height)?;
    let max = percent_to_point(rect.max, canvas_width, canvas_height)?;
    Ok(Rect::new(min, max))
}

/// Converts a normalized page rect (top-left origin) to page points
/// (bottom-left origin).
///
/// The Y axis flips: the normalized max-Y edge becomes the page-point
/// min-Y edge.
pub fn normalized_to_page(
    rect: Rect<Normalized>,
    page_width: f64,
    page_height: f64,
) -> Result<Rect<PagePoint>, MarginaliaError> {
    check_page(page_width, page_height)?;
    let x1 = rect.min.x * page_width;
    let x2 = rect.max.x * page_width;
    let y1 = page_height - rect.max.y * page_height;
    let y2 = page_height - rect.min.y * page_height;
    Ok(Rect::from_corners(x1, y1, x2, y2))
}

/// Converts a page-point rect (bottom-left origin) back to normalized
/// page space (top-left origin), reversing the Y flip.
pub fn page_to_normalized(
    rect: Rect<PagePoint>,
    page_width: f64,
    page_height: f64,
) -> Result<Rect<Normalized>, MarginaliaError> {
    check_page(page_width, page_height)?;
    let x1 = rect.min.x / page_width;
    let x2 = rect.max.x / page_width;
    let y1 = (page_height - rect.max.y) / page_height;
    let y2 = (page_height - rect.min.y) / page_height;
    Ok(Rect::from_corners(x1, y1, x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_point_to_percent() {
        let p = point_to_percent(Point::new(400.0, 150.0), 800.0, 600.0).unwrap();
        assert_eq!(p.x, 50.0);
        assert_eq!(p.y, 25.0);
    }

    #[test]
    fn test_zero_canvas_is_an_error() {
        let err = point_to_percent(Point::new(1.0, 1.0), 0.0, 600.0);
        assert!(matches!(err, Err(MarginaliaError::InvalidCanvas { .. })));

        let err = rect_to_percent(Rect::from_corners(0.0, 0.0, 1.0, 1.0), 800.0, -2.0);
        assert!(matches!(err, Err(MarginaliaError::InvalidCanvas { .. })));
    }

    #[test]
    fn test_negative_page_is_an_error() {
        let rect = Rect::from_corners(0.1, 0.2, 0.4, 0.3);
        let err = normalized_to_page(rect, -612.0, 792.0);
        assert!(matches!(err, Err(MarginaliaError::InvalidPage { .. })));
    }

    #[test]
    fn test_normalized_to_page_flips_y() {
        // Page 612x792. Normalized y1=0.2 (from top) maps to the top edge
        // of the box in page points: 792 - 0.2*792 = 633.6 is the max Y.
        let rect = Rect::from_corners(0.1, 0.2, 0.4, 0.3);
        let page = normalized_to_page(rect, 612.0, 792.0).unwrap();
        assert!(approx(page.min.x, 61.2, 1e-9));
        assert!(approx(page.max.x, 244.8, 1e-9));
        assert!(approx(page.max.y, 792.0 - 0.2 * 792.0, 1e-9));
        assert!(approx(page.min.y, 792.0 - 0.3 * 792.0, 1e-9));
        assert!(page.is_ordered());

        let (_, _, w, h) = page.to_xywh();
        assert!(approx(w, 0.3 * 612.0, 1e-9));
        assert!(approx(h, 0.1 * 792.0, 1e-9));
    }

    #[test]
    fn test_page_roundtrip_within_tolerance() {
        let rect = Rect::from_corners(0.123, 0.456, 0.789, 0.654);
        let (w, h) = (612.0, 792.0);
        let back = page_to_normalized(normalized_to_page(rect, w, h).unwrap(), w, h).unwrap();
        let tol = 1e-4 * w.max(h);
        assert!(approx(back.min.x, rect.min.x, tol));
        assert!(approx(back.min.y, rect.min.y, tol));
        assert!(approx(back.max.x, rect.max.x, tol));
        assert!(approx(back.max.y, rect.max.y, tol));
    }

    #[test]
    fn test_percent_roundtrip_within_tolerance() {
        let rect = Rect::from_corners(12.5, 30.25, 640.75, 480.5);
        let (w, h) = (1024.0, 768.0);
        let back = percent_to_rect(rect_to_percent(rect, w, h).unwrap(), w, h).unwrap();
        let tol = 1e-4 * w.max(h);
        assert!(approx(back.min.x, rect.min.x, tol));
        assert!(approx(back.max.y, rect.max.y, tol));
    }
}
