//! Great-circle distance.

use crate::domain::Point;

use super::GeoError;

/// Mean Earth radius used for all distance reporting.
pub const EARTH_RADIUS_MILES: f64 = 3958.76;

/// Haversine distance in miles between two latitude/longitude pairs.
///
/// Treats the Earth as a sphere. The result is symmetric in its two points and
/// exactly zero for identical coordinates. Coordinates outside the usual
/// latitude/longitude ranges are not rejected; they are fed through the
/// formula as-is.
///
/// # Examples
///
/// ```
/// use next_train_server::geo::gps_to_miles;
///
/// // Los Angeles to Las Vegas
/// let d = gps_to_miles(34.0522, -118.2437, 36.1699, -115.1398).unwrap();
/// assert!((d - 228.4).abs() < 0.1);
///
/// assert!(gps_to_miles(f64::NAN, 0.0, 0.0, 0.0).is_err());
/// ```
pub fn gps_to_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeoError> {
    for (name, value) in [("lat1", lat1), ("lon1", lon1), ("lat2", lat2), ("lon2", lon2)] {
        if !value.is_finite() {
            return Err(GeoError::InvalidInput(name));
        }
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push near-antipodal pairs just past 1.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_MILES * c)
}

/// Haversine distance in miles between two points.
pub fn miles_between(a: &Point, b: &Point) -> Result<f64, GeoError> {
    gps_to_miles(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Distance from a point to itself is zero
        #[test]
        fn zero_for_identical(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert_eq!(gps_to_miles(lat, lon, lat, lon).unwrap(), 0.0);
        }

        /// Distance does not depend on argument order
        #[test]
        fn symmetric(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let ab = gps_to_miles(lat1, lon1, lat2, lon2).unwrap();
            let ba = gps_to_miles(lat2, lon2, lat1, lon1).unwrap();
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// Never negative, never more than half the circumference
        #[test]
        fn bounded(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let d = gps_to_miles(lat1, lon1, lat2, lon2).unwrap();
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_MILES * std::f64::consts::PI + 1e-6);
        }
    }
}
