//! Geometry error types.

/// Errors from nearest-station queries and distance calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    /// The station set has no entries (a data-loading defect)
    #[error("station index is empty")]
    EmptyIndex,

    /// The query point is degenerate or not a coordinate pair
    #[error("query point is not a valid coordinate pair")]
    InvalidGeometry,

    /// A distance input was not a finite number
    #[error("invalid input: {0} must be a finite number")]
    InvalidInput(&'static str),
}
