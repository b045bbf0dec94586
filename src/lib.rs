//! # Route Shape
//!
//! GPS track processing for activity routes.
//!
//! This library provides:
//! - Douglas-Peucker simplification with an explicit work stack
//! - Adaptive downsampling towards a fixed point budget
//! - Bounding boxes for map framing
//! - Encoded polyline codec (5 decimal digits, ~1.1 m resolution)
//! - Normalization of decoded paths into pixel space for minimaps
//!
//! ## Features
//!
//! - **`parallel`** - Process batches of tracks in parallel with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use route_shape::{process_track, GeoPoint, PipelineConfig};
//!
//! let track: Vec<GeoPoint> = (0..2000)
//!     .map(|i| GeoPoint::new(51.5 + i as f64 * 1e-4, -0.12 + (i as f64 * 0.05).sin() * 1e-3))
//!     .collect();
//!
//! let route = process_track(&track, &PipelineConfig::default()).unwrap();
//! assert!(route.point_count <= 500);
//! assert!(!route.encoded_polyline.is_empty());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{
    validate_coordinates, validate_epsilon, DecodeError, OptionExt, Result, RouteShapeError,
};

// Bounding boxes and unit helpers
pub mod geo_utils;
pub use geo_utils::{bounds, bounds_of_coords, haversine_distance, meters_to_degrees, track_length};

// Douglas-Peucker simplification
pub mod simplify;
pub use simplify::simplify;

// Epsilon escalation with uniform-stride fallback
pub mod downsample;
pub use downsample::{downsample, downsample_with_config, DownsampleConfig};

// Encoded polyline codec
pub mod polyline;
pub use polyline::{decode, encode, encode_points};

// Pixel-space projection for minimaps
pub mod normalize;
pub use normalize::normalize;

// End-to-end processing of a raw track
pub mod pipeline;
pub use pipeline::{
    minimap_path, process_track, process_tracks, MinimapConfig, PipelineConfig, ProcessedRoute,
};

// Algorithm toolbox - flat access to every stage
pub mod algorithms;

/// Initialize logging for Android.
#[cfg(target_os = "android")]
pub fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RouteShapeRust"),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A recorded GPS sample.
///
/// Only `latitude`/`longitude` take part in any geometry. The sensor fields are
/// carried through unchanged on every point that survives simplification.
///
/// # Example
/// ```
/// use route_shape::GeoPoint;
/// let point = GeoPoint::new(51.5074, -0.1278).with_elevation(35.0);
/// assert_eq!(point.elevation, Some(35.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Degrees, -90..90
    pub latitude: f64,
    /// Degrees, -180..180 (no wraparound handling)
    pub longitude: f64,
    /// Meters above sea level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    /// Revolutions (or steps) per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    /// Unix timestamp (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl GeoPoint {
    /// Create a point with no sensor data.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            heart_rate: None,
            cadence: None,
            timestamp: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_heart_rate(mut self, heart_rate: u32) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn with_cadence(mut self, cadence: u32) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// (latitude, longitude) pair as consumed by the polyline codec.
    pub fn coord(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Check that the point lies within the valid latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Geographic extent of a track.
///
/// Always satisfies `north >= south` and `east >= west`. A single-point
/// track yields a degenerate box with all four edges equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Center of the box as (latitude, longitude).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(51.5074, -0.1278).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(GeoPoint::new(91.0, 0.0).is_finite());
    }

    #[test]
    fn test_geo_point_json_skips_missing_fields() {
        let point = GeoPoint::new(1.5, 2.5).with_heart_rate(142);
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("heart_rate"));
        assert!(!json.contains("elevation"));

        let parsed: GeoPoint = serde_json::from_str(r#"{"latitude":1.5,"longitude":2.5}"#).unwrap();
        assert_eq!(parsed, GeoPoint::new(1.5, 2.5));
    }

    #[test]
    fn test_bounding_box_helpers() {
        let bbox = BoundingBox {
            north: 2.0,
            south: 1.0,
            east: 14.0,
            west: 10.0,
        };
        assert_eq!(bbox.height(), 1.0);
        assert_eq!(bbox.width(), 4.0);
        assert_eq!(bbox.center(), (1.5, 12.0));
        assert!(bbox.contains(1.5, 11.0));
        assert!(!bbox.contains(2.5, 11.0));
    }
}
