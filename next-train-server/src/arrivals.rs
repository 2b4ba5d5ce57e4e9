//! Next-train selection.
//!
//! The feed returns every train calling at a station in one direction, in no
//! particular order. Selection narrows that to one line and picks the
//! earliest scheduled departure.

use chrono::NaiveDateTime;

use crate::domain::{Direction, TimestampError, parse_sched_time};
use crate::septa::FeedArrival;

/// A train selected from the feed, with its schedule parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalRecord {
    pub line: String,
    pub direction: Direction,
    pub scheduled_time: NaiveDateTime,
    pub train_id: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub track: Option<String>,
}

impl ArrivalRecord {
    /// Parse a feed record, stamping it with the direction it was queried for.
    pub fn from_feed(arrival: &FeedArrival, direction: Direction) -> Result<Self, TimestampError> {
        Ok(Self {
            line: arrival.line.clone(),
            direction,
            scheduled_time: parse_sched_time(&arrival.sched_time)?,
            train_id: arrival.train_id.clone(),
            destination: arrival.destination.clone(),
            status: arrival.status.clone(),
            track: arrival.track.clone(),
        })
    }
}

/// Pick the earliest-scheduled train on `line_name`.
///
/// `records` must already be limited to `direction`; the feed partitions by
/// direction before this point. Line matching is exact and case-sensitive.
/// Ties on scheduled time keep the first record in input order.
///
/// Returns `Ok(None)` when no record is on the requested line. Every record on
/// the line has its timestamp parsed, and the first malformed one fails the
/// whole selection.
pub fn select_next(
    records: &[FeedArrival],
    line_name: &str,
    direction: Direction,
) -> Result<Option<ArrivalRecord>, TimestampError> {
    let mut earliest: Option<ArrivalRecord> = None;

    for record in records.iter().filter(|r| r.line == line_name) {
        let candidate = ArrivalRecord::from_feed(record, direction)?;
        let earlier = match &earliest {
            None => true,
            Some(best) => candidate.scheduled_time < best.scheduled_time,
        };
        if earlier {
            earliest = Some(candidate);
        }
    }

    Ok(earliest)
}
