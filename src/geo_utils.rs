//! Geographic utilities: bounding boxes, distances and unit conversion.

use crate::error::{validate_coordinates, OptionExt, Result};
use crate::{BoundingBox, GeoPoint};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Compute the bounding box of a track in a single pass.
///
/// Only latitude and longitude are considered. Fails with
/// [`RouteShapeError::EmptyTrack`](crate::RouteShapeError::EmptyTrack) for an
/// empty input and with `NonFiniteCoordinate` if any point is NaN/infinite.
///
/// # Example
/// ```
/// use route_shape::{bounds, GeoPoint};
///
/// let track = vec![GeoPoint::new(51.50, -0.13), GeoPoint::new(51.52, -0.10)];
/// let bbox = bounds(&track).unwrap();
/// assert_eq!(bbox.north, 51.52);
/// assert_eq!(bbox.west, -0.13);
/// ```
pub fn bounds(points: &[GeoPoint]) -> Result<BoundingBox> {
    bounds_of_coords_iter(points.iter().map(GeoPoint::coord))
}

/// Bounding box of decoded `(latitude, longitude)` pairs.
pub fn bounds_of_coords(coords: &[(f64, f64)]) -> Result<BoundingBox> {
    bounds_of_coords_iter(coords.iter().copied())
}

fn bounds_of_coords_iter<I>(coords: I) -> Result<BoundingBox>
where
    I: Iterator<Item = (f64, f64)> + Clone,
{
    validate_coordinates(coords.clone())?;

    coords
        .fold(None, |acc: Option<BoundingBox>, (lat, lng)| {
            Some(match acc {
                None => BoundingBox {
                    north: lat,
                    south: lat,
                    east: lng,
                    west: lng,
                },
                Some(b) => BoundingBox {
                    north: b.north.max(lat),
                    south: b.south.min(lat),
                    east: b.east.max(lng),
                    west: b.west.min(lng),
                },
            })
        })
        .ok_or_empty_track()
}

/// Convert a distance in meters to degrees of latitude.
///
/// Used to express meter-scale simplification tolerances in the planar
/// degree units the simplifier works in.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlng = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length of a track in meters.
pub fn track_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}
