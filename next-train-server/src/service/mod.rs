//! Request-scoped station and next-train queries.
//!
//! Each query runs strictly in sequence: validate input, find the nearest
//! station, and (for next-train) consult the arrivals feed. Nothing is kept
//! between requests beyond the shared, read-only station sets.

mod error;
mod lookup;
mod next_train;

pub use error::ServiceError;
pub use lookup::{DEFAULT_MAX_DISTANCE_MILES, LookupOutcome, NearbyStation, StationLookup};
pub use next_train::{NextTrain, NextTrainOutcome, validate_train_params};
