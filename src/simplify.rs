//! Douglas-Peucker track simplification.
//!
//! Latitude and longitude are treated as planar axes. This is a bounded
//! approximation of geodesic distance: activity tracks span at most tens of
//! kilometers, where the error is well below GPS sensor noise.
//!
//! The divide-and-conquer recursion is driven by an explicit work stack, so
//! adversarial inputs (every point significant) cannot overflow the native
//! stack.

use crate::error::{validate_coordinates, validate_epsilon, Result};
use crate::GeoPoint;

/// Simplify a track, keeping every point that deviates more than `epsilon`
/// degrees from the chord of its enclosing segment.
///
/// Tracks of two points or fewer are returned unchanged. The first and last
/// points are always kept, and kept points are returned by value with their
/// sensor fields untouched.
///
/// # Errors
/// `InvalidEpsilon` for a negative or non-finite tolerance,
/// `NonFiniteCoordinate` for NaN/infinite coordinates.
///
/// # Example
/// ```rust
/// use route_shape::{simplify, GeoPoint};
///
/// let track = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.5, 0.00001),
///     GeoPoint::new(1.0, 0.0),
/// ];
/// let simplified = simplify(&track, 0.0001).unwrap();
/// assert_eq!(simplified.len(), 2);
/// ```
pub fn simplify(points: &[GeoPoint], epsilon: f64) -> Result<Vec<GeoPoint>> {
    Ok(simplify_indices(points, epsilon)?
        .into_iter()
        .map(|i| points[i])
        .collect())
}

/// Indices of the points [`simplify`] would keep, in ascending order.
pub fn simplify_indices(points: &[GeoPoint], epsilon: f64) -> Result<Vec<usize>> {
    validate_epsilon(epsilon)?;
    validate_coordinates(points.iter().map(GeoPoint::coord))?;

    if points.len() <= 2 {
        return Ok((0..points.len()).collect());
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    // Segments still to examine, as inclusive (start, end) index pairs.
    let mut stack = vec![(0, last)];

    while let Some((start, end)) = stack.pop() {
        if end - start < 2 {
            continue;
        }

        let (max_index, max_distance) = farthest_point(points, start, end);
        if max_distance > epsilon {
            keep[max_index] = true;
            stack.push((max_index, end));
            stack.push((start, max_index));
        }
    }

    Ok(keep
        .iter()
        .enumerate()
        .filter_map(|(i, &kept)| kept.then_some(i))
        .collect())
}

/// Interior point of `points[start..=end]` farthest from the chord.
///
/// Ties go to the lowest index.
fn farthest_point(points: &[GeoPoint], start: usize, end: usize) -> (usize, f64) {
    let first = &points[start];
    let last = &points[end];

    let mut max_index = start + 1;
    let mut max_distance = f64::NEG_INFINITY;

    for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
        let distance = perpendicular_distance(p, first, last);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }

    (max_index, max_distance)
}

/// Planar distance from `p` to the line through `first` and `last`.
///
/// When the endpoints coincide the line is degenerate and the distance to the
/// shared endpoint is used instead.
pub fn perpendicular_distance(p: &GeoPoint, first: &GeoPoint, last: &GeoPoint) -> f64 {
    let d_lat = last.latitude - first.latitude;
    let d_lng = last.longitude - first.longitude;
    let norm = d_lat.hypot(d_lng);

    if norm == 0.0 {
        return (p.latitude - first.latitude).hypot(p.longitude - first.longitude);
    }

    (d_lat * (first.longitude - p.longitude) - d_lng * (first.latitude - p.latitude)).abs() / norm
}
