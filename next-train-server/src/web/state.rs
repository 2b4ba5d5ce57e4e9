//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::Network;
use crate::service::{NextTrain, StationLookup};

/// Shared application state.
///
/// Contains the per-network station lookups and the next-train service.
pub struct AppState<F> {
    /// SEPTA regional rail stations
    pub regional_rail: StationLookup,

    /// DC metro stations
    pub metro: StationLookup,

    /// Next-train queries over regional rail
    pub next_train: Arc<NextTrain<F>>,
}

// Derived Clone would require `F: Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            regional_rail: self.regional_rail.clone(),
            metro: self.metro.clone(),
            next_train: self.next_train.clone(),
        }
    }
}

impl<F> AppState<F> {
    /// Create a new app state.
    ///
    /// Next-train queries always run against `regional_rail`.
    pub fn new(regional_rail: StationLookup, metro: StationLookup, feed: Arc<F>) -> Self {
        let next_train = NextTrain::new(regional_rail.clone(), feed);
        Self {
            regional_rail,
            metro,
            next_train: Arc::new(next_train),
        }
    }

    /// The lookup for `network`.
    pub fn lookup(&self, network: Network) -> &StationLookup {
        match network {
            Network::RegionalRail => &self.regional_rail,
            Network::Metro => &self.metro,
        }
    }
}
