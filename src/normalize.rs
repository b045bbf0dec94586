//! Projection of decoded paths into pixel space for minimap rendering.
//!
//! Both axes share one scale factor so routes are never stretched; the path is
//! centered along whichever axis has room to spare. Pixel-space `y` grows
//! downward, so latitude is inverted.

use crate::error::{Result, RouteShapeError};
use crate::geo_utils::bounds_of_coords;

/// Map `(latitude, longitude)` pairs to `(x, y)` pixels inside a
/// `width` x `height` canvas, keeping `padding` pixels clear on every edge.
///
/// An axis with zero extent (single point, perfectly vertical or horizontal
/// track) counts as spanning one degree when picking the scale, and its
/// points are centered in the canvas.
///
/// # Errors
/// `InvalidCanvas` for non-finite dimensions, negative padding, or padding
/// that leaves no drawable area; `NonFiniteCoordinate` for NaN/infinite input.
///
/// # Example
/// ```rust
/// use route_shape::normalize;
///
/// let path = vec![(51.0, 0.0), (52.0, 1.0)];
/// let pixels = normalize(&path, 100.0, 100.0, 10.0).unwrap();
/// assert_eq!(pixels, vec![(10.0, 90.0), (90.0, 10.0)]);
/// ```
pub fn normalize(
    points: &[(f64, f64)],
    width: f64,
    height: f64,
    padding: f64,
) -> Result<Vec<(f64, f64)>> {
    let invalid = || RouteShapeError::InvalidCanvas {
        width,
        height,
        padding,
    };

    if !width.is_finite() || !height.is_finite() || !padding.is_finite() || padding < 0.0 {
        return Err(invalid());
    }
    let draw_width = width - 2.0 * padding;
    let draw_height = height - 2.0 * padding;
    if draw_width <= 0.0 || draw_height <= 0.0 {
        return Err(invalid());
    }

    if points.is_empty() {
        return Ok(Vec::new());
    }

    let bbox = bounds_of_coords(points)?;
    let lng_span = bbox.width();
    let lat_span = bbox.height();

    let scale = (draw_width / scale_span(lng_span)).min(draw_height / scale_span(lat_span));

    // Unused room along each axis, split evenly on both sides.
    let offset_x = (draw_width - lng_span * scale) / 2.0;
    let offset_y = (draw_height - lat_span * scale) / 2.0;

    Ok(points
        .iter()
        .map(|&(lat, lng)| {
            (
                padding + offset_x + (lng - bbox.west) * scale,
                padding + offset_y + (bbox.north - lat) * scale,
            )
        })
        .collect())
}

/// Span used for scaling; a flat axis counts as one degree.
fn scale_span(span: f64) -> f64 {
    if span > 0.0 {
        span
    } else {
        1.0
    }
}
