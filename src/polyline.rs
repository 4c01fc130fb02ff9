//! Encoded polyline codec for route geometries.
//!
//! Routing providers return paths in the compact signed-varint delta
//! encoding; this module turns them into [`Polyline`] values at the
//! boundary so nothing else in the engine handles the encoded form.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::stop::Coordinate;

/// Precision used by the classic `polyline` format (1e-5 degrees).
pub const DEFAULT_PRECISION: u32 = 5;

/// Highest precision [`encode`] accepts; keeps scaled deltas inside `i64`.
pub const MAX_PRECISION: u32 = 15;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn factor(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

/// Decodes a 5-digit precision polyline, keeping the valid leading points
/// when the input is malformed.
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

/// Like [`decode`] with a custom precision.
pub fn decode_with_precision(encoded: &str, precision: u32) -> Vec<Coordinate> {
    let mut points = Vec::new();
    if let Err(err) = decode_into(encoded, precision, &mut points) {
        tracing::debug!(%err, kept = points.len(), "polyline decode stopped early");
    }
    points
}

/// Strict decode: any malformed byte is an error.
pub fn try_decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, DecodeError> {
    let mut points = Vec::new();
    decode_into(encoded, precision, &mut points)?;
    Ok(points)
}

/// Pushes every complete point onto `points`; a point is only pushed once
/// both of its deltas decoded cleanly.
fn decode_into(
    encoded: &str,
    precision: u32,
    points: &mut Vec<Coordinate>,
) -> Result<(), DecodeError> {
    let bytes = encoded.as_bytes();
    let factor = factor(precision);
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while offset < bytes.len() {
        let d_lat = read_value(bytes, &mut offset)?;
        let d_lng = read_value(bytes, &mut offset)?;

        lat = lat.checked_add(d_lat).ok_or(DecodeError::Overflow { offset })?;
        lng = lng.checked_add(d_lng).ok_or(DecodeError::Overflow { offset })?;

        let point = Coordinate::new(lat as f64 / factor, lng as f64 / factor);
        if !on_earth(point) {
            return Err(DecodeError::OutOfRange { offset });
        }
        points.push(point);
    }

    Ok(())
}

fn read_value(bytes: &[u8], offset: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(DecodeError::Truncated { offset: *offset });
        };
        if !(63..=126).contains(&byte) {
            return Err(DecodeError::InvalidByte {
                offset: *offset,
                byte,
            });
        }
        if shift > 55 {
            return Err(DecodeError::Overflow { offset: *offset });
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *offset += 1;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

fn on_earth(point: Coordinate) -> bool {
    point.latitude.abs() <= 90.0 && point.longitude.abs() <= 180.0
}

/// Encodes points with the given precision.
///
/// Points must be finite and on Earth, and `precision` at most
/// [`MAX_PRECISION`].
pub fn encode(points: &[Coordinate], precision: u32) -> Result<String, EncodeError> {
    if precision > MAX_PRECISION {
        return Err(EncodeError::Precision { precision });
    }

    let factor = factor(precision);
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for (index, point) in points.iter().enumerate() {
        // NaN fails both comparisons
        if !on_earth(*point) {
            return Err(EncodeError::OutOfRange { index });
        }

        let lat = (point.latitude * factor).round() as i64;
        let lng = (point.longitude * factor).round() as i64;
        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(out)
}

fn write_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}
