//! SEPTA Arrivals API response DTOs.
//!
//! The endpoint wraps everything in an object with a single, station-specific
//! key (e.g. `"30th Street Station Departures: March 15, 2024, 9:41 am"`).
//! Its value is an empty array when the station has no data, otherwise a
//! one-element array holding the `Northbound` and `Southbound` lists.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::Direction;

/// Top-level response from `Arrivals/index.php`.
pub type ArrivalsBoard = HashMap<String, Vec<DirectionalArrivals>>;

/// Arrivals at one station, split by direction of travel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionalArrivals {
    #[serde(rename = "Northbound", default)]
    pub northbound: Vec<FeedArrival>,

    #[serde(rename = "Southbound", default)]
    pub southbound: Vec<FeedArrival>,
}

impl DirectionalArrivals {
    /// Take the list for one direction, discarding the other.
    pub fn into_direction(self, direction: Direction) -> Vec<FeedArrival> {
        match direction {
            Direction::North => self.northbound,
            Direction::South => self.southbound,
        }
    }
}

/// A single train on the arrivals board.
///
/// Only `line` and `sched_time` are relied upon; the rest is passed through
/// for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedArrival {
    /// Line name (e.g. "Paoli/Thorndale")
    pub line: String,

    /// Scheduled time, `YYYY-MM-DD HH:MM:SS.ffffff`, naive local time
    pub sched_time: String,

    /// Train number
    #[serde(default)]
    pub train_id: Option<String>,

    /// Terminus of the train
    #[serde(default)]
    pub destination: Option<String>,

    /// Running status (e.g. "On Time", "5 min")
    #[serde(default)]
    pub status: Option<String>,

    /// Departure track
    #[serde(default)]
    pub track: Option<String>,
}

/// Extract the arrivals for one direction from a full board.
///
/// A board with no entries yields an empty list rather than an error.
pub fn board_arrivals(board: ArrivalsBoard, direction: Direction) -> Vec<FeedArrival> {
    board
        .into_values()
        .next()
        .and_then(|lists| lists.into_iter().next())
        .map(|lists| lists.into_direction(direction))
        .unwrap_or_default()
}
