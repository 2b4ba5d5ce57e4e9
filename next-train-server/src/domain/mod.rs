//! Domain types for the next-train service.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod direction;
mod point;
mod station;
mod time;

pub use direction::{Direction, InvalidDirection};
pub use point::{InvalidPoint, Point};
pub use station::{Network, Station, StationSet, UnknownNetwork};
pub use time::{SCHED_TIME_FORMAT, TimestampError, parse_sched_time};
