//! End-to-end processing of a raw activity track.
//!
//! raw points -> downsample (storage budget) -> bounding box
//!            -> simplify at a meter-scale tolerance -> downsample (thumbnail budget)
//!            -> encoded polyline
//!
//! On the rendering side, [`minimap_path`] decodes a stored polyline and
//! projects it into pixel space.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::downsample::{downsample_with_config, DownsampleConfig};
use crate::error::{validate_coordinates, Result};
use crate::geo_utils::{bounds, meters_to_degrees, track_length};
use crate::normalize::normalize;
use crate::polyline::{decode, encode_points};
use crate::simplify::simplify;
use crate::{BoundingBox, GeoPoint};

/// Configuration for [`process_track`].
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum points kept for storage.
    /// Default: 500
    pub storage_target: usize,

    /// Maximum points in the thumbnail polyline.
    /// Default: 100
    pub thumbnail_target: usize,

    /// Simplification tolerance for the thumbnail polyline, in meters.
    /// Default: 10.0
    pub thumbnail_tolerance_meters: f64,

    /// Escalation settings shared by both downsampling passes.
    pub downsample: DownsampleConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            storage_target: 500,
            thumbnail_target: 100,
            thumbnail_tolerance_meters: 10.0,
            downsample: DownsampleConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from JSON.
    ///
    /// ```rust
    /// use route_shape::PipelineConfig;
    ///
    /// let config = PipelineConfig::from_json(r#"{"storage_target": 250}"#).unwrap();
    /// assert_eq!(config.storage_target, 250);
    /// assert_eq!(config.thumbnail_target, 100);
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Thumbnail tolerance in the degree units the simplifier works in.
    pub fn thumbnail_epsilon(&self) -> f64 {
        meters_to_degrees(self.thumbnail_tolerance_meters)
    }
}

/// Canvas used when rendering a route thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 120.0,
            padding: 8.0,
        }
    }
}

/// A processed route, ready to hand to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRoute {
    /// Downsampled points, sensor fields preserved
    pub points: Vec<GeoPoint>,
    /// Extent of the downsampled points (None for an empty track)
    pub bounds: Option<BoundingBox>,
    /// Number of retained points
    pub point_count: usize,
    /// Number of points in the raw track
    pub original_point_count: usize,
    /// Length of the downsampled track in meters
    pub distance_meters: f64,
    /// Thumbnail polyline (5 decimal digits)
    pub encoded_polyline: String,
}

impl ProcessedRoute {
    /// Serialize for the persistence layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Run the full processing pipeline on one raw track.
///
/// # Errors
/// `NonFiniteCoordinate` for NaN/infinite input, `InvalidTarget` for a zero
/// budget, `InvalidEpsilon` for a negative or non-finite tolerance.
pub fn process_track(points: &[GeoPoint], config: &PipelineConfig) -> Result<ProcessedRoute> {
    validate_coordinates(points.iter().map(GeoPoint::coord))?;

    let stored = downsample_with_config(points, config.storage_target, &config.downsample)?;
    let bbox = if stored.is_empty() {
        None
    } else {
        Some(bounds(&stored)?)
    };

    let thumbnail = simplify(&stored, config.thumbnail_epsilon())?;
    let thumbnail =
        downsample_with_config(&thumbnail, config.thumbnail_target, &config.downsample)?;
    let encoded_polyline = encode_points(&thumbnail)?;

    debug!(
        "[Pipeline] {} -> {} stored points, {} thumbnail points ({} bytes encoded)",
        points.len(),
        stored.len(),
        thumbnail.len(),
        encoded_polyline.len()
    );

    Ok(ProcessedRoute {
        point_count: stored.len(),
        original_point_count: points.len(),
        distance_meters: track_length(&stored),
        points: stored,
        bounds: bbox,
        encoded_polyline,
    })
}

/// Process many independent tracks.
///
/// Runs in parallel when the `parallel` feature is enabled. Results keep the
/// order of the input.
pub fn process_tracks(
    tracks: &[Vec<GeoPoint>],
    config: &PipelineConfig,
) -> Vec<Result<ProcessedRoute>> {
    #[cfg(feature = "parallel")]
    let results = tracks
        .par_iter()
        .map(|track| process_track(track, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = tracks
        .iter()
        .map(|track| process_track(track, config))
        .collect();

    results
}

/// Decode a stored polyline and project it onto a minimap canvas.
///
/// Returns `None` when there is nothing to draw: the polyline is malformed,
/// empty, or the canvas is unusable.
pub fn minimap_path(encoded: &str, config: &MinimapConfig) -> Option<Vec<(f64, f64)>> {
    let coords = match decode(encoded) {
        Ok(coords) => coords,
        Err(e) => {
            warn!("[Pipeline] Cannot draw route: {}", e);
            return None;
        }
    };

    if coords.is_empty() {
        return None;
    }

    match normalize(&coords, config.width, config.height, config.padding) {
        Ok(pixels) => Some(pixels),
        Err(e) => {
            warn!("[Pipeline] Cannot project route: {}", e);
            None
        }
    }
}
