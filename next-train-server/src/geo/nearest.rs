//! Nearest-station search.
//!
//! Station sets are small (tens of entries), so a linear scan replaces a
//! spatial index. The ranking metric is squared planar distance over
//! (longitude, latitude). It is only used to order candidates; reported
//! distances always come from [`super::gps_to_miles`].

use crate::domain::{Point, Station};

use super::GeoError;

/// Find the index of the station closest to `point`.
///
/// Ties resolve to the lowest index, so the result is stable for a given
/// station order.
///
/// # Errors
///
/// * [`GeoError::InvalidGeometry`] if `point` is not finite. [`Point::new`]
///   already rejects non-finite coordinates, so this only guards callers
///   that bypass it.
/// * [`GeoError::EmptyIndex`] if `stations` is empty
///
/// # Examples
///
/// ```
/// use next_train_server::domain::{Point, Station};
/// use next_train_server::geo::nearest;
///
/// let p = |lat, lon| Point::new(lat, lon).unwrap();
/// let stations = vec![
///     Station::new("a", "A", p(0.0, 0.0)),
///     Station::new("b", "B", p(1.0, 1.0)),
///     Station::new("c", "C", p(2.0, 2.0)),
/// ];
///
/// assert_eq!(nearest(&p(1.1, 1.1), &stations), Ok(1));
/// ```
pub fn nearest(point: &Point, stations: &[Station]) -> Result<usize, GeoError> {
    // Unreachable through `Point::new`
    if !point.is_finite() {
        return Err(GeoError::InvalidGeometry);
    }

    let mut best: Option<(usize, f64)> = None;

    for (idx, station) in stations.iter().enumerate() {
        let d = planar_distance_2(point, &station.location);
        let closer = match best {
            None => true,
            Some((_, best_d)) => d < best_d,
        };
        if closer {
            best = Some((idx, d));
        }
    }

    best.map(|(idx, _)| idx).ok_or(GeoError::EmptyIndex)
}

fn planar_distance_2(a: &Point, b: &Point) -> f64 {
    let dx = a.longitude() - b.longitude();
    let dy = a.latitude() - b.latitude();
    dx * dx + dy * dy
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = (f64, f64)> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
    }

    fn station_set() -> impl Strategy<Value = Vec<Station>> {
        proptest::collection::vec(coordinate(), 1..40).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| {
                    Station::new(i.to_string(), i.to_string(), Point::new(lat, lon).unwrap())
                })
                .collect()
        })
    }

    proptest! {
        /// The result is always a valid index into a non-empty set
        #[test]
        fn index_in_bounds(set in station_set(), (lat, lon) in coordinate()) {
            let idx = nearest(&Point::new(lat, lon).unwrap(), &set).unwrap();
            prop_assert!(idx < set.len());
        }

        /// No station is strictly closer than the chosen one
        #[test]
        fn result_is_minimal(set in station_set(), (lat, lon) in coordinate()) {
            let q = Point::new(lat, lon).unwrap();
            let idx = nearest(&q, &set).unwrap();
            let best = planar_distance_2(&q, &set[idx].location);
            for s in &set {
                prop_assert!(planar_distance_2(&q, &s.location) >= best);
            }
        }

        /// Appending copies of every station never moves the answer
        #[test]
        fn duplicates_keep_lowest_index(set in station_set(), (lat, lon) in coordinate()) {
            let q = Point::new(lat, lon).unwrap();
            let original = nearest(&q, &set).unwrap();

            let mut doubled = set.clone();
            doubled.extend(set.iter().cloned());
            prop_assert_eq!(nearest(&q, &doubled).unwrap(), original);
        }

        /// Empty sets fail for any valid point
        #[test]
        fn empty_always_fails((lat, lon) in coordinate()) {
            prop_assert_eq!(
                nearest(&Point::new(lat, lon).unwrap(), &[]),
                Err(GeoError::EmptyIndex)
            );
        }
    }
}
