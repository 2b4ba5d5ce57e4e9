//! Service-layer error types.
//!
//! Only failures live here. "No station within range" and "no trains found"
//! are ordinary outcomes and are modelled in the outcome types instead.

use crate::domain::{InvalidPoint, TimestampError};
use crate::geo::GeoError;
use crate::septa::FeedError;

/// Errors from station lookup and next-train queries.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Caller coordinates are missing or malformed
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(#[from] InvalidPoint),

    /// A line or direction parameter is missing or malformed
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The network has no stations loaded
    #[error("station index for {0} is empty")]
    EmptyIndex(String),

    /// The query point could not be used for a spatial query
    #[error("invalid geometry: {0}")]
    InvalidGeometry(GeoError),

    /// The arrivals feed failed
    #[error("arrivals feed unavailable: {0}")]
    UpstreamUnavailable(#[source] FeedError),

    /// The arrivals feed returned a timestamp that does not parse
    #[error("malformed upstream data: {0}")]
    Timestamp(#[from] TimestampError),
}

impl ServiceError {
    /// Whether the caller is at fault (as opposed to configuration or upstream).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidCoordinates(_)
                | ServiceError::InvalidParameter(_)
                | ServiceError::InvalidGeometry(_)
        )
    }
}
