//! Nearest-station lookup with a search radius.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Network, Point, Station, StationSet};
use crate::geo::{GeoError, miles_between, nearest};

use super::error::ServiceError;

/// Stations further than this from the caller are not offered.
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 10.0;

/// A station together with its distance from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,
    pub distance_miles: f64,
}

/// Result of a nearest-station query.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The nearest station is within the search radius.
    Found(NearbyStation),

    /// Even the nearest station is outside the search radius.
    OutOfRange { nearest_distance_miles: f64 },
}

/// Nearest-station queries over one network.
///
/// The station set is shared and never mutated, so lookups are lock-free.
#[derive(Debug, Clone)]
pub struct StationLookup {
    network: Network,
    stations: Arc<StationSet>,
    max_distance_miles: f64,
}

impl StationLookup {
    pub fn new(network: Network, stations: Arc<StationSet>, max_distance_miles: f64) -> Self {
        Self {
            network,
            stations,
            max_distance_miles,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn max_distance_miles(&self) -> f64 {
        self.max_distance_miles
    }

    /// Find the nearest station to `point`.
    ///
    /// The candidate is ranked on a planar metric, then its great-circle
    /// distance is checked against the search radius. A station exactly on
    /// the radius counts as in range.
    pub fn nearest(&self, point: &Point) -> Result<LookupOutcome, ServiceError> {
        let idx = nearest(point, self.stations.as_slice()).map_err(|e| self.geo_error(e))?;
        let station = self
            .stations
            .get(idx)
            .ok_or_else(|| self.geo_error(GeoError::EmptyIndex))?;

        let distance_miles =
            miles_between(point, &station.location).map_err(|e| self.geo_error(e))?;

        if distance_miles > self.max_distance_miles {
            debug!(
                network = %self.network,
                %point,
                distance_miles,
                "nearest station out of range"
            );
            return Ok(LookupOutcome::OutOfRange {
                nearest_distance_miles: distance_miles,
            });
        }

        debug!(
            network = %self.network,
            %point,
            station = %station.id,
            distance_miles,
            "nearest station found"
        );

        Ok(LookupOutcome::Found(NearbyStation {
            station: station.clone(),
            distance_miles,
        }))
    }

    fn geo_error(&self, err: GeoError) -> ServiceError {
        match err {
            GeoError::EmptyIndex => ServiceError::EmptyIndex(self.network.to_string()),
            other => ServiceError::InvalidGeometry(other),
        }
    }
}
