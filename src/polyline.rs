//! Encoded polyline codec.
//!
//! Coordinates are quantized to 5 decimal digits (~1.1 m), delta-encoded
//! against the previous point, zig-zag mapped to unsigned integers and
//! emitted as 5-bit chunks in printable ASCII. The format is the one consumed
//! by standard polyline-aware map widgets.
//!
//! ```rust
//! use route_shape::polyline::{decode, encode};
//!
//! let path = vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
//! let encoded = encode(&path).unwrap();
//! assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//! assert_eq!(decode(&encoded).unwrap(), path);
//! ```

use crate::error::{validate_coordinates, DecodeError, Result};
use crate::GeoPoint;

/// Quantization factor: 5 decimal digits.
const FACTOR: f64 = 1e5;

/// Offset added to every chunk to land in printable ASCII.
const CHAR_OFFSET: u8 = 63;

/// Set on every chunk except the last of a value.
const CONTINUATION: u64 = 0x20;

const CHUNK_MASK: u64 = 0x1f;

/// Largest byte the encoder can emit: a continued chunk of all ones.
const MAX_CHAR: u8 = CHAR_OFFSET + 0x3f;

/// Widest shift that still fits a chunk into a u64 accumulator.
const MAX_SHIFT: u32 = 60;

/// Encode `(latitude, longitude)` pairs into a polyline string.
///
/// An empty path encodes to an empty string.
///
/// # Errors
/// `NonFiniteCoordinate` if any coordinate is NaN or infinite.
pub fn encode(points: &[(f64, f64)]) -> Result<String> {
    validate_coordinates(points.iter().copied())?;

    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for &(lat, lng) in points {
        let lat = quantize(lat);
        let lng = quantize(lng);

        encode_value(lat.wrapping_sub(prev_lat), &mut encoded);
        encode_value(lng.wrapping_sub(prev_lng), &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(encoded)
}

/// Encode the coordinates of a track, ignoring sensor fields.
pub fn encode_points(points: &[GeoPoint]) -> Result<String> {
    let coords: Vec<(f64, f64)> = points.iter().map(GeoPoint::coord).collect();
    encode(&coords)
}

/// Decode a polyline string into `(latitude, longitude)` pairs.
///
/// # Errors
/// [`DecodeError::Malformed`] if the string contains a byte outside the
/// encoder's alphabet, ends mid-chunk, or ends after a latitude without its
/// longitude. No partial path is returned.
pub fn decode(encoded: &str) -> std::result::Result<Vec<(f64, f64)>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut pos = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while pos < bytes.len() {
        lat = lat.wrapping_add(decode_value(bytes, &mut pos)?);

        if pos >= bytes.len() {
            return Err(DecodeError::Malformed {
                position: pos,
                reason: "latitude without longitude".to_string(),
            });
        }
        lng = lng.wrapping_add(decode_value(bytes, &mut pos)?);

        points.push((lat as f64 / FACTOR, lng as f64 / FACTOR));
    }

    Ok(points)
}

fn quantize(value: f64) -> i64 {
    (value * FACTOR).round() as i64
}

/// Append one signed delta as zig-zag mapped 5-bit chunks.
fn encode_value(value: i64, out: &mut String) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;

    while v >= CONTINUATION {
        out.push(char::from(((v & CHUNK_MASK) | CONTINUATION) as u8 + CHAR_OFFSET));
        v >>= 5;
    }
    out.push(char::from(v as u8 + CHAR_OFFSET));
}

/// Read one signed delta starting at `*pos`, advancing past it.
fn decode_value(bytes: &[u8], pos: &mut usize) -> std::result::Result<i64, DecodeError> {
    let mut result = 0u64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(DecodeError::Malformed {
                position: *pos,
                reason: "string ends mid-chunk".to_string(),
            });
        };

        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            return Err(DecodeError::Malformed {
                position: *pos,
                reason: format!("byte 0x{:02x} is outside the polyline alphabet", byte),
            });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Malformed {
                position: *pos,
                reason: "value exceeds 64 bits".to_string(),
            });
        }

        let chunk = u64::from(byte - CHAR_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *pos += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(((result >> 1) as i64) ^ -((result & 1) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteShapeError;

    const CANONICAL: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn canonical_path() -> Vec<(f64, f64)> {
        vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]
    }

    #[test]
    fn test_encode_canonical() {
        assert_eq!(encode(&canonical_path()).unwrap(), CANONICAL);
    }

    #[test]
    fn test_decode_canonical() {
        let decoded = decode(CANONICAL).unwrap();
        assert_eq!(decoded.len(), 3);
        for (d, e) in decoded.iter().zip(canonical_path()) {
            assert!((d.0 - e.0).abs() < 1e-5);
            assert!((d.1 - e.1).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_values() {
        // Zig-zag: 0 -> 0, -1 -> 1, 1 -> 2
        let mut out = String::new();
        encode_value(0, &mut out);
        encode_value(-1, &mut out);
        encode_value(1, &mut out);
        assert_eq!(out, "?@A");
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]).unwrap(), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_rounded_roundtrip_is_exact() {
        let path = vec![
            (51.50740, -0.12780),
            (51.50801, -0.12903),
            (-33.86882, 151.20929),
            (0.0, 0.0),
            (89.99999, -179.99999),
        ];
        assert_eq!(decode(&encode(&path).unwrap()).unwrap(), path);
    }

    #[test]
    fn test_unrounded_within_half_step() {
        let path = vec![(51.507_412_3, -0.127_849_9), (51.508_004_6, -0.129_035_1)];
        let decoded = decode(&encode(&path).unwrap()).unwrap();
        for (d, e) in decoded.iter().zip(&path) {
            assert!((d.0 - e.0).abs() <= 5e-6 + 1e-12);
            assert!((d.1 - e.1).abs() <= 5e-6 + 1e-12);
        }
    }

    #[test]
    fn test_encode_points_ignores_sensor_fields() {
        let track = vec![
            GeoPoint::new(38.5, -120.2).with_elevation(100.0),
            GeoPoint::new(40.7, -120.95).with_heart_rate(150),
            GeoPoint::new(43.252, -126.453),
        ];
        assert_eq!(encode_points(&track).unwrap(), CANONICAL);
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(matches!(
            encode(&[(1.0, 2.0), (f64::NAN, 0.0)]),
            Err(RouteShapeError::NonFiniteCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_chunk() {
        // Drop the final character: the previous chunk still has its continuation bit.
        let truncated = &CANONICAL[..CANONICAL.len() - 1];
        assert!(matches!(
            decode(truncated),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_decode_dangling_latitude() {
        // "_p~iF" is a complete latitude with no longitude following.
        assert!(matches!(
            decode("_p~iF"),
            Err(DecodeError::Malformed { position: 5, .. })
        ));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        for bad in ["_p~iF~ps|U ", "abc\u{7f}", "_p~iF~ps|Ué", "\n"] {
            assert!(decode(bad).is_err(), "expected error for {:?}", bad);
        }
    }

    #[test]
    fn test_decode_overlong_value() {
        let overlong = "~".repeat(20);
        assert!(matches!(
            decode(&overlong),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
