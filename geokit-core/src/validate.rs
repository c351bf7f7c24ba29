//! Coordinate validation.
//!
//! Checks run latitude first, then longitude; the first failure wins.

use crate::types::{Axis, Coordinate, CoordinateFault, LAT_MAX, LAT_MIN, LNG_MAX, LNG_MIN};

/// Validate a coordinate: both parts finite, latitude in `[-90, 90]`,
/// longitude in `[-180, 180]`.
pub fn validate_coordinate(coord: &Coordinate) -> Result<(), CoordinateFault> {
    check_axis(coord.lat, Axis::Latitude, LAT_MIN, LAT_MAX)?;
    check_axis(coord.lng, Axis::Longitude, LNG_MIN, LNG_MAX)
}

fn check_axis(value: f64, axis: Axis, min: f64, max: f64) -> Result<(), CoordinateFault> {
    if !value.is_finite() {
        return Err(CoordinateFault::NotFinite(axis));
    }
    if value < min || value > max {
        return Err(CoordinateFault::OutOfRange { axis, min, max });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
