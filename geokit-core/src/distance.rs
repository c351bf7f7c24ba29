//! Great-circle distance using the haversine formula.

use crate::types::{Coordinate, DistanceUnit, GeokitError, Result};

/// Distance between two coordinates along the Earth's surface.
///
/// Both points are validated first; failures are tagged with which
/// argument was bad.
pub fn distance(start: &Coordinate, end: &Coordinate, unit: DistanceUnit) -> Result<f64> {
    start.validate().map_err(GeokitError::InvalidStart)?;
    end.validate().map_err(GeokitError::InvalidEnd)?;

    Ok(haversine(start, end, unit.radius()))
}

/// Haversine distance for a sphere of the given radius. Inputs are not
/// validated.
pub fn haversine(start: &Coordinate, end: &Coordinate, radius: f64) -> f64 {
    let dlat = (end.lat - start.lat).to_radians();
    let dlon = (end.lng - start.lng).to_radians();
    let lat1 = start.lat.to_radians();
    let lat2 = end.lat.to_radians();
    let a = (dlat / 2.0).sin().powi(2) + (dlon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // Rounding can push `a` past 1 for near-antipodal points.
    let a = a.min(1.0);
    radius * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
