//! Spatial queries over station sets.

mod distance;
mod error;
mod nearest;

pub use distance::{EARTH_RADIUS_MILES, gps_to_miles, miles_between};
pub use error::GeoError;
pub use nearest::nearest;
