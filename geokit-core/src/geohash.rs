//! Geohash encode, decode, and validation.
//!
//! A geohash interleaves longitude and latitude bisection bits, starting
//! with longitude, and packs each group of 5 bits into one base-32 symbol.
//! The longitude/latitude alternation runs across the whole string; it is
//! not restarted at character boundaries.

use crate::geomath::{base32, decimal_chunk, get_bit, Interval, BITS_PER_CHAR, CHUNK_MASKS};
use crate::types::{
    Coordinate, GeohashFault, GeokitError, Result, LAT_MAX, LAT_MIN, LNG_MAX, LNG_MIN,
};

/// Encode a coordinate as a geohash of `precision` characters.
///
/// A precision of 0 yields the empty string.
pub fn hash(coord: &Coordinate, precision: usize) -> Result<String> {
    coord.validate()?;

    let mut lat = Interval::new(LAT_MIN, LAT_MAX);
    let mut lng = Interval::new(LNG_MIN, LNG_MAX);
    let mut out = String::with_capacity(precision);

    // Global bit index: even -> longitude, odd -> latitude.
    let mut bit = 0usize;

    while out.len() < precision {
        let mut chunk = 0u8;
        for _ in 0..BITS_PER_CHAR {
            let (value, range) = if bit % 2 == 0 {
                (coord.lng, &mut lng)
            } else {
                (coord.lat, &mut lat)
            };
            let b = get_bit(value, range);
            chunk = (chunk << 1) | b;
            range.narrow(b == 1);
            bit += 1;
        }
        out.push(base32(chunk));
    }

    Ok(out)
}

/// Decode a geohash to the centre of its bounding cell.
///
/// Lossy: the result is only as precise as the hash is long.
pub fn decode_hash(geohash: &str) -> Result<Coordinate> {
    validate_hash(geohash)?;

    let mut lat = Interval::new(LAT_MIN, LAT_MAX);
    let mut lng = Interval::new(LNG_MIN, LNG_MAX);
    // Starts on longitude and flips after every bit, across characters.
    let mut even = true;

    for symbol in geohash.chars() {
        let chunk = decimal_chunk(symbol)
            .ok_or_else(|| invalid(geohash, GeohashFault::InvalidChar(symbol)))?;
        for mask in CHUNK_MASKS {
            let range = if even { &mut lng } else { &mut lat };
            range.narrow(chunk & mask != 0);
            even = !even;
        }
    }

    Ok(Coordinate::new(lat.mid(), lng.mid()))
}

/// Strict geohash check: non-empty and every character in the alphabet.
///
/// The error names the first offending character.
pub fn validate_hash(geohash: &str) -> Result<()> {
    match find_fault(geohash) {
        Some(reason) => Err(invalid(geohash, reason)),
        None => Ok(()),
    }
}

/// Predicate form of [`validate_hash`].
pub fn is_valid_hash(geohash: &str) -> bool {
    find_fault(geohash).is_none()
}

fn find_fault(geohash: &str) -> Option<GeohashFault> {
    if geohash.is_empty() {
        return Some(GeohashFault::Empty);
    }
    geohash
        .chars()
        .find(|&c| decimal_chunk(c).is_none())
        .map(GeohashFault::InvalidChar)
}

fn invalid(geohash: &str, reason: GeohashFault) -> GeokitError {
    GeokitError::InvalidGeohash {
        hash: geohash.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geomath::BASE32;
    use crate::types::DEFAULT_PRECISION;

    const JUTLAND: Coordinate = Coordinate::new(57.64911, 10.40744);

    #[test]
    fn test_hash_reference_value() {
        assert_eq!(hash(&JUTLAND, 6).unwrap(), "u4pruy");
        assert_eq!(hash(&JUTLAND, 11).unwrap(), "u4pruydqqvj");
    }

    #[test]
    fn test_hash_prefix_stable() {
        let long = hash(&JUTLAND, 11).unwrap();
        for p in 1..=11 {
            assert_eq!(hash(&JUTLAND, p).unwrap(), long[..p]);
        }
    }

    #[test]
    fn test_hash_default_precision_length() {
        let h = hash(&JUTLAND, DEFAULT_PRECISION).unwrap();
        assert_eq!(h.len(), 10);
        assert!(h.chars().all(|c| BASE32.contains(c)));
    }

    #[test]
    fn test_hash_zero_precision() {
        assert_eq!(hash(&JUTLAND, 0).unwrap(), "");
    }

    #[test]
    fn test_hash_origin_and_corners() {
        // Exact midpoints fall to the lower half on every step.
        assert_eq!(hash(&Coordinate::new(0.0, 0.0), 5).unwrap(), "7zzzz");
        assert_eq!(hash(&Coordinate::new(-90.0, -180.0), 4).unwrap(), "0000");
        assert_eq!(hash(&Coordinate::new(90.0, 180.0), 4).unwrap(), "zzzz");
    }

    #[test]
    fn test_hash_rejects_invalid_coordinate_unprefixed() {
        let err = hash(&Coordinate::new(0.0, 200.0), 6).unwrap_err();
        assert!(matches!(err, GeokitError::InvalidCoordinate(_)));
        assert_eq!(
            err.to_string(),
            "longitude must be within the range -180 to 180"
        );
    }

    #[test]
    fn test_decode_reference_value() {
        let c = decode_hash("u4pruydqqvj").unwrap();
        assert!((c.lat - 57.64911).abs() < 1e-5, "lat was {}", c.lat);
        assert!((c.lng - 10.40744).abs() < 1e-5, "lng was {}", c.lng);
    }

    #[test]
    fn test_decode_single_char_cells() {
        // '0' is the south-west cell: lng [-180,-135], lat [-90,-45].
        let c = decode_hash("0").unwrap();
        assert!((c.lng - -157.5).abs() < 1e-12);
        assert!((c.lat - -67.5).abs() < 1e-12);

        // 'z' is the north-east cell.
        let c = decode_hash("z").unwrap();
        assert!((c.lng - 157.5).abs() < 1e-12);
        assert!((c.lat - 67.5).abs() < 1e-12);
    }

    #[test]
    fn test_decode_parity_carries_across_characters() {
        // Second char's first bit must refine latitude (bit index 5 is odd).
        // "s" + "0": lng [0,45], lat [0,45] after 's'; then '0' keeps lower
        // halves: lat gets 3 bits, lng 2 bits.
        let c = decode_hash("s0").unwrap();
        assert!((c.lat - 45.0 / 16.0).abs() < 1e-12, "lat was {}", c.lat);
        assert!((c.lng - 45.0 / 8.0).abs() < 1e-12, "lng was {}", c.lng);
    }

    #[test]
    fn test_decode_rejects_invalid() {
        let err = decode_hash("u4pa").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid geohash 'u4pa': geohash cannot contain 'a'"
        );
        assert!(decode_hash("").is_err());
    }

    #[test]
    fn test_validate_empty() {
        let err = validate_hash("").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid geohash '': geohash cannot be the empty string"
        );
        assert!(!is_valid_hash(""));
    }

    #[test]
    fn test_validate_reports_first_bad_char() {
        let err = validate_hash("abc-").unwrap_err();
        match err {
            GeokitError::InvalidGeohash { hash, reason } => {
                assert_eq!(hash, "abc-");
                assert_eq!(reason, GeohashFault::InvalidChar('a'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_valid_hash() {
        assert!(!is_valid_hash("abc"));
        assert!(!is_valid_hash("U4PRUY"));
        assert!(!is_valid_hash("u4pr uy"));
        assert!(is_valid_hash("u4pruy"));
        assert!(is_valid_hash("0123456789bcdefghjkmnpqrstuvwxyz"));
    }
}
