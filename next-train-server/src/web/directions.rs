//! Walking directions links.
//!
//! Responses link to Google Maps walking directions from the caller to the
//! station, so the straight-line estimate can be checked against a real route.

use crate::domain::Point;

/// Generate a Google Maps walking-directions URL between two points.
///
/// # Example
///
/// ```
/// use next_train_server::domain::Point;
/// use next_train_server::web::walking_directions_url;
///
/// let caller = Point::new(39.9526, -75.1652).unwrap();
/// let station = Point::new(39.9541, -75.1677).unwrap();
///
/// assert_eq!(
///     walking_directions_url(&caller, &station),
///     "https://www.google.com/maps/dir/?api=1&origin=39.9526,-75.1652&destination=39.9541,-75.1677&travelmode=walking"
/// );
/// ```
pub fn walking_directions_url(from: &Point, to: &Point) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=walking",
        from.latitude(),
        from.longitude(),
        to.latitude(),
        to.longitude(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> Point {
        Point::new(lat, lon).unwrap()
    }

    #[test]
    fn basic_url() {
        let url = walking_directions_url(&p(39.9526, -75.1652), &p(39.9541, -75.1677));
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=39.9526,-75.1652&destination=39.9541,-75.1677&travelmode=walking"
        );
    }

    #[test]
    fn integral_coordinates() {
        let url = walking_directions_url(&p(40.0, -75.0), &p(41.0, -76.0));
        assert!(url.contains("origin=40,-75&destination=41,-76"));
    }
}
