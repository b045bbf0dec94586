//! Adaptive downsampling towards a fixed point budget.
//!
//! Douglas-Peucker bounds deviation, not point count, so escalating epsilon
//! alone is not guaranteed to reach a target size. After a bounded number of
//! escalations the downsampler falls back to uniform-stride sampling, which
//! always produces exactly `target` points.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{validate_coordinates, validate_epsilon, Result, RouteShapeError};
use crate::simplify::simplify;
use crate::GeoPoint;

/// Configuration for the epsilon escalation loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownsampleConfig {
    /// Tolerance of the first simplification attempt, in degrees.
    /// Default: 1e-5 (~1.1 meters)
    pub initial_epsilon: f64,

    /// Maximum number of simplification attempts; epsilon doubles after each.
    /// Default: 20
    pub max_attempts: u32,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            initial_epsilon: 1e-5,
            max_attempts: 20,
        }
    }
}

/// Reduce a track to at most `target` points using the default configuration.
///
/// See [`downsample_with_config`].
///
/// # Example
/// ```rust
/// use route_shape::{downsample, GeoPoint};
///
/// let track: Vec<GeoPoint> = (0..1000)
///     .map(|i| GeoPoint::new(i as f64 * 1e-4, (i as f64 * 0.1).sin() * 1e-3))
///     .collect();
/// let reduced = downsample(&track, 200).unwrap();
/// assert!(reduced.len() <= 200);
/// assert_eq!(reduced.first(), track.first());
/// assert_eq!(reduced.last(), track.last());
/// ```
pub fn downsample(track: &[GeoPoint], target: usize) -> Result<Vec<GeoPoint>> {
    downsample_with_config(track, target, &DownsampleConfig::default())
}

/// Reduce a track to at most `target` points.
///
/// - Tracks already within budget are returned unchanged.
/// - `target == 1` returns just the final point.
/// - Otherwise simplification is retried with doubling epsilon, and if the
///   result still exceeds `target` after `max_attempts`, uniform-stride
///   sampling yields exactly `target` points including both endpoints.
pub fn downsample_with_config(
    track: &[GeoPoint],
    target: usize,
    config: &DownsampleConfig,
) -> Result<Vec<GeoPoint>> {
    if target == 0 {
        return Err(RouteShapeError::InvalidTarget { target });
    }
    validate_epsilon(config.initial_epsilon)?;
    validate_coordinates(track.iter().map(GeoPoint::coord))?;

    if track.len() <= target {
        return Ok(track.to_vec());
    }

    if target == 1 {
        return Ok(track.last().map(|p| vec![*p]).unwrap_or_default());
    }

    let mut epsilon = config.initial_epsilon;
    let mut simplified = track.to_vec();

    for attempt in 0..config.max_attempts {
        simplified = simplify(track, epsilon)?;
        debug!(
            "[Downsample] Attempt {}: epsilon={:.2e}, {} -> {} points (target {})",
            attempt + 1,
            epsilon,
            track.len(),
            simplified.len(),
            target
        );

        if simplified.len() <= target {
            return Ok(simplified);
        }
        epsilon *= 2.0;
    }

    info!(
        "[Downsample] Simplification plateaued at {} points after {} attempts, using stride sampling to {}",
        simplified.len(),
        config.max_attempts,
        target
    );

    Ok(stride_sample(&simplified, target))
}

/// Pick `target - 1` evenly strided points plus the final point.
///
/// Requires `2 <= target < points.len()`.
fn stride_sample(points: &[GeoPoint], target: usize) -> Vec<GeoPoint> {
    let step = points.len() as f64 / target as f64;

    let mut sampled: Vec<GeoPoint> = (0..target - 1)
        .map(|i| points[(i as f64 * step).floor() as usize])
        .collect();
    sampled.extend(points.last().copied());

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: usize) -> Vec<GeoPoint> {
        (0..n)
            .map(|i| {
                let offset = if i % 2 == 0 { 0.0 } else { 0.01 };
                GeoPoint::new(i as f64 * 0.001, offset).with_timestamp(i as i64)
            })
            .collect()
    }

    #[test]
    fn test_within_budget_unchanged() {
        let track = zigzag(10);
        assert_eq!(downsample(&track, 10).unwrap(), track);
        assert_eq!(downsample(&track, 50).unwrap(), track);
        assert!(downsample(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_target_rejected() {
        assert_eq!(
            downsample(&zigzag(10), 0),
            Err(RouteShapeError::InvalidTarget { target: 0 })
        );
    }

    #[test]
    fn test_target_one_returns_last_point() {
        let track = zigzag(10);
        assert_eq!(downsample(&track, 1).unwrap(), vec![track[9]]);
    }

    #[test]
    fn test_escalation_converges() {
        // Gentle curve: a few doublings bring it under budget without the fallback.
        let track: Vec<GeoPoint> = (0..1000)
            .map(|i| GeoPoint::new(i as f64 * 1e-4, (i as f64 * 0.01).sin() * 1e-3))
            .collect();
        let reduced = downsample(&track, 50).unwrap();
        assert!(reduced.len() <= 50);
        assert!(reduced.len() >= 2);
        assert_eq!(reduced.first(), track.first());
        assert_eq!(reduced.last(), track.last());
    }

    #[test]
    fn test_fallback_yields_exact_target() {
        let track = zigzag(101);
        let config = DownsampleConfig {
            initial_epsilon: 0.0,
            max_attempts: 1,
        };
        let reduced = downsample_with_config(&track, 10, &config).unwrap();
        assert_eq!(reduced.len(), 10);
        assert_eq!(reduced[0], track[0]);
        assert_eq!(reduced[9], track[100]);
    }

    #[test]
    fn test_stride_sample_indices() {
        let track = zigzag(20);
        let sampled = stride_sample(&track, 5);
        // step = 4.0 -> indices 0, 4, 8, 12 then the last point
        let timestamps: Vec<i64> = sampled.iter().filter_map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![0, 4, 8, 12, 19]);
    }

    #[test]
    fn test_zero_attempts_samples_raw_track() {
        let track = zigzag(30);
        let config = DownsampleConfig {
            initial_epsilon: 1e-5,
            max_attempts: 0,
        };
        let reduced = downsample_with_config(&track, 3, &config).unwrap();
        let timestamps: Vec<i64> = reduced.iter().filter_map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![0, 10, 29]);
    }

    #[test]
    fn test_invalid_initial_epsilon() {
        let config = DownsampleConfig {
            initial_epsilon: f64::NAN,
            max_attempts: 20,
        };
        assert!(matches!(
            downsample_with_config(&zigzag(10), 5, &config),
            Err(RouteShapeError::InvalidEpsilon { .. })
        ));
    }
}
