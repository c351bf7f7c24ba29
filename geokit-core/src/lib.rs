//! geokit-core: great-circle distance and geohash encoding for
//! latitude/longitude coordinates.
//!
//! Pure functions over two floats and a base-32 alphabet. Each call owns its
//! working state, so everything here is safe to call from any thread. No
//! file, network, or environment access.

pub mod distance;
pub mod geohash;
pub mod geomath;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use distance::distance;
pub use geohash::{decode_hash, hash, is_valid_hash, validate_hash};
pub use geomath::BASE32;
pub use types::*;
pub use validate::validate_coordinate;
