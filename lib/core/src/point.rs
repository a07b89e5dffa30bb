use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::RecordParseError;

/// A validated position in decimal degrees.
///
/// Both components are finite and inside their canonical ranges. There is
/// no "half valid" point: construction either succeeds for the pair or fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

/// Unchecked wire form; deserialization goes through [`GeoPoint::new`]
#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = RecordParseError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range components
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Result<Self, RecordParseError> {
        if !lat.is_finite()
            || !lon.is_finite()
            || !(-90.0..=90.0).contains(&lat)
            || !(-180.0..=180.0).contains(&lon)
        {
            return Err(RecordParseError::OutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a point from two raw cell values.
    ///
    /// With `swap_axes` the two parsed numbers are exchanged before
    /// validation, so an upstream column inversion is undone exactly once.
    pub fn from_cells(
        lat: &Value,
        lon: &Value,
        swap_axes: bool,
    ) -> Result<Self, RecordParseError> {
        let lat = parse_coordinate(lat)?;
        let lon = parse_coordinate(lon)?;
        if swap_axes {
            Self::new(lon, lat)
        } else {
            Self::new(lat, lon)
        }
    }

    #[inline]
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Convert a raw cell into a coordinate component.
///
/// Numbers are taken as-is, strings are trimmed and parsed. Null, empty
/// strings and anything else count as missing or non-numeric.
pub fn parse_coordinate(value: &Value) -> Result<f64, RecordParseError> {
    match value {
        Value::Null => Err(RecordParseError::Missing),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| RecordParseError::NotNumeric(n.to_string())),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(RecordParseError::Missing);
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(RecordParseError::NotNumeric(trimmed.to_string())),
            }
        }
        other => Err(RecordParseError::NotNumeric(other.to_string())),
    }
}
