//! Shared types, error enums, and constants for geokit-core.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of geohash characters.
pub const DEFAULT_PRECISION: usize = 10;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MIN: f64 = -180.0;
pub const LNG_MAX: f64 = 180.0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which half of a coordinate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Reason a coordinate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateFault {
    #[error("{0} must be a finite number")]
    NotFinite(Axis),
    #[error("{axis} must be within the range {min} to {max}")]
    OutOfRange { axis: Axis, min: f64, max: f64 },
}

/// Reason a geohash string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeohashFault {
    #[error("geohash cannot be the empty string")]
    Empty,
    #[error("geohash cannot contain '{0}'")]
    InvalidChar(char),
}

/// All errors produced by geokit-core.
#[derive(Debug, Error)]
pub enum GeokitError {
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateFault),
    #[error("Start coordinates: {0}")]
    InvalidStart(CoordinateFault),
    #[error("End coordinates: {0}")]
    InvalidEnd(CoordinateFault),
    #[error("Invalid geohash '{hash}': {reason}")]
    InvalidGeohash { hash: String, reason: GeohashFault },
}

pub type Result<T> = std::result::Result<T, GeokitError>;

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate. Range checks happen in [`Coordinate::validate`].
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }

    /// Check that both components are finite and within range.
    pub fn validate(&self) -> std::result::Result<(), CoordinateFault> {
        crate::validate::validate_coordinate(self)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

// ---------------------------------------------------------------------------
// Distance units
// ---------------------------------------------------------------------------

/// Unit for great-circle distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Parse a unit name.
    ///
    /// Only `"miles"` (any case) selects [`DistanceUnit::Miles`]. Every other
    /// string, including unknown names and the empty string, falls back to
    /// kilometers without an error.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("miles") {
            DistanceUnit::Miles
        } else {
            DistanceUnit::Kilometers
        }
    }

    /// Earth radius expressed in this unit.
    pub const fn radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "miles",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
