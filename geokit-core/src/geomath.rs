//! Low-level helpers for the geohash codec: the base-32 alphabet and
//! the bisection interval.
//!
//! The alphabet skips `a`, `i`, `l` and `o`. It must match the standard
//! geohash alphabet exactly for interoperability.

/// Geohash base-32 alphabet, indexed by 5-bit value.
pub const BASE32: &str = "0123456789bcdefghjkmnpqrstuvwxyz";

const BASE32_BYTES: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bits carried by one geohash character.
pub const BITS_PER_CHAR: usize = 5;

/// Bit masks for one character, most significant first.
pub const CHUNK_MASKS: [u8; BITS_PER_CHAR] = [16, 8, 4, 2, 1];

/// Map a 5-bit value (0-31) to its alphabet symbol.
///
/// Only the low five bits are used.
pub fn base32(value: u8) -> char {
    BASE32_BYTES[(value & 0x1f) as usize] as char
}

/// Inverse of [`base32`]: the 5-bit value of an alphabet symbol.
///
/// Returns `None` for characters outside the alphabet.
pub fn decimal_chunk(symbol: char) -> Option<u8> {
    if !symbol.is_ascii() {
        return None;
    }
    BASE32_BYTES
        .iter()
        .position(|&b| b == symbol as u8)
        .map(|i| i as u8)
}

/// Closed `[low, high]` range narrowed by repeated bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const fn new(low: f64, high: f64) -> Self {
        Interval { low, high }
    }

    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Keep the upper half when `upper` is set, else the lower half.
    pub fn narrow(&mut self, upper: bool) {
        let mid = self.mid();
        if upper {
            self.low = mid;
        } else {
            self.high = mid;
        }
    }
}

/// 1 if `value` lies strictly above the midpoint of `interval`, else 0.
///
/// A value exactly on the midpoint counts as the lower half.
pub fn get_bit(value: f64, interval: &Interval) -> u8 {
    u8::from(value > interval.mid())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
