//! # Algorithm Toolbox
//!
//! Direct access to every stage of the track pipeline, for callers that want
//! to compose their own flow instead of using
//! [`process_track`](crate::process_track).
//!
//! ## Stages
//!
//! - **Douglas-Peucker**: shape-preserving simplification under a tolerance
//! - **Adaptive Downsampling**: simplification driven towards a point budget
//! - **Bounds Computation**: bounding box for map framing
//! - **Polyline Codec**: compact string encoding of a path
//! - **Path Normalization**: projection into minimap pixel space
//!
//! # Example
//!
//! ```rust
//! use route_shape::algorithms::{
//!     bounds, decode, downsample, encode_points, normalize, GeoPoint,
//! };
//!
//! let track: Vec<GeoPoint> = (0..300)
//!     .map(|i| GeoPoint::new(47.0 + i as f64 * 1e-4, 8.0 + (i as f64 * 0.05).cos() * 1e-3))
//!     .collect();
//!
//! let reduced = downsample(&track, 50).unwrap();
//! let bbox = bounds(&reduced).unwrap();
//! let encoded = encode_points(&reduced).unwrap();
//! let pixels = normalize(&decode(&encoded).unwrap(), 64.0, 64.0, 4.0).unwrap();
//!
//! assert!(bbox.north > bbox.south);
//! assert_eq!(pixels.len(), reduced.len());
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{BoundingBox, GeoPoint, ProcessedRoute};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{
    bounds, bounds_of_coords, haversine_distance, meters_to_degrees, track_length,
};

// =============================================================================
// Line Simplification
// =============================================================================

/// Douglas-Peucker with planar lat/lon distance.
pub use crate::simplify::{perpendicular_distance, simplify, simplify_indices};

/// Epsilon escalation with uniform-stride fallback.
pub use crate::downsample::{downsample, downsample_with_config, DownsampleConfig};

// =============================================================================
// Polyline Codec
// =============================================================================

pub use crate::polyline::{decode, encode, encode_points};

// =============================================================================
// Rendering
// =============================================================================

pub use crate::normalize::normalize;

// =============================================================================
// Full Pipeline
// =============================================================================

pub use crate::pipeline::{minimap_path, process_track, process_tracks};
