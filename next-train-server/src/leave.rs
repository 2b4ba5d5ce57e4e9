//! Walking leave-by times.
//!
//! The walk is modelled as a straight line at a fixed pace. Actual street
//! paths, terrain and crossings are ignored, so the estimate is optimistic
//! for anything but an open field.

use chrono::{Duration, NaiveDateTime};

use crate::domain::Point;
use crate::geo::{GeoError, miles_between};

/// Assumed walking pace.
pub const WALKING_SPEED_MPH: f64 = 2.0;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Whether the caller can still reach a departure on foot.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveInstruction {
    /// Leaving by `leave_by` reaches the station in time.
    Feasible {
        leave_by: NaiveDateTime,
        distance_miles: f64,
        walk_time: Duration,
    },

    /// The leave-by time has already passed.
    TooLate {
        leave_by: NaiveDateTime,
        distance_miles: f64,
        walk_time: Duration,
    },
}

impl LeaveInstruction {
    pub fn is_feasible(&self) -> bool {
        matches!(self, LeaveInstruction::Feasible { .. })
    }

    pub fn leave_by(&self) -> NaiveDateTime {
        match self {
            LeaveInstruction::Feasible { leave_by, .. }
            | LeaveInstruction::TooLate { leave_by, .. } => *leave_by,
        }
    }

    pub fn distance_miles(&self) -> f64 {
        match self {
            LeaveInstruction::Feasible { distance_miles, .. }
            | LeaveInstruction::TooLate { distance_miles, .. } => *distance_miles,
        }
    }

    pub fn walk_time(&self) -> Duration {
        match self {
            LeaveInstruction::Feasible { walk_time, .. }
            | LeaveInstruction::TooLate { walk_time, .. } => *walk_time,
        }
    }
}

/// Time needed to walk `distance_miles` at [`WALKING_SPEED_MPH`].
///
/// Rounded to the nearest microsecond.
pub fn walking_time(distance_miles: f64) -> Duration {
    let hours = distance_miles / WALKING_SPEED_MPH;
    Duration::microseconds((hours * MICROS_PER_HOUR).round() as i64)
}

/// Work out when the caller must set off to catch `scheduled_departure`.
///
/// The walk time is subtracted from the departure. If `now` is strictly
/// before the resulting time the departure is reachable.
pub fn compute_leave_by(
    current_location: &Point,
    station_location: &Point,
    scheduled_departure: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<LeaveInstruction, GeoError> {
    let distance_miles = miles_between(current_location, station_location)?;
    let walk_time = walking_time(distance_miles);
    let leave_by = scheduled_departure - walk_time;

    if now < leave_by {
        Ok(LeaveInstruction::Feasible {
            leave_by,
            distance_miles,
            walk_time,
        })
    } else {
        Ok(LeaveInstruction::TooLate {
            leave_by,
            distance_miles,
            walk_time,
        })
    }
}
