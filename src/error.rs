//! Unified error handling for the route-shape library.
//!
//! Every public operation validates its inputs at the boundary and reports
//! problems through [`RouteShapeError`] instead of panicking or silently
//! producing degenerate output.

use thiserror::Error;

/// Error returned when an encoded polyline cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string ended mid-chunk or contained a byte the encoder never emits.
    #[error("Malformed polyline at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

/// Unified error type for route-shape operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteShapeError {
    /// The operation needs at least one point
    #[error("Track is empty")]
    EmptyTrack,

    /// Simplification tolerance is negative, NaN or infinite
    #[error("Invalid epsilon {epsilon}: must be finite and non-negative")]
    InvalidEpsilon { epsilon: f64 },

    /// A point has a NaN or infinite latitude/longitude
    #[error("Point {index} has non-finite coordinates ({latitude}, {longitude})")]
    NonFiniteCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    /// Downsampling target of zero points
    #[error("Invalid downsample target {target}: must be at least 1")]
    InvalidTarget { target: usize },

    /// Canvas dimensions leave no drawable area
    #[error("Invalid canvas {width}x{height} with padding {padding}")]
    InvalidCanvas { width: f64, height: f64, padding: f64 },

    /// Encoded polyline could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for route-shape operations.
pub type Result<T> = std::result::Result<T, RouteShapeError>;

/// Extension trait for converting Option to RouteShapeError.
pub trait OptionExt<T> {
    /// Convert Option to Result with an empty track error.
    fn ok_or_empty_track(self) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_empty_track(self) -> Result<T> {
        self.ok_or(RouteShapeError::EmptyTrack)
    }
}

/// Reject negative or non-finite tolerances.
pub fn validate_epsilon(epsilon: f64) -> Result<()> {
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(())
    } else {
        Err(RouteShapeError::InvalidEpsilon { epsilon })
    }
}

/// Reject the first coordinate pair that is not finite.
///
/// ```rust
/// use route_shape::{validate_coordinates, RouteShapeError};
///
/// assert!(validate_coordinates(vec![(47.0, 8.0), (47.1, 8.1)]).is_ok());
/// assert!(matches!(
///     validate_coordinates(vec![(47.0, 8.0), (f64::NAN, 8.1)]),
///     Err(RouteShapeError::NonFiniteCoordinate { index: 1, .. })
/// ));
/// ```
pub fn validate_coordinates<I>(coords: I) -> Result<()>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    for (index, (latitude, longitude)) in coords.into_iter().enumerate() {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(RouteShapeError::NonFiniteCoordinate {
                index,
                latitude,
                longitude,
            });
        }
    }
    Ok(())
}
