//! Next-train leave-by queries.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::arrivals::{ArrivalRecord, select_next};
use crate::domain::{Direction, Point};
use crate::leave::{LeaveInstruction, compute_leave_by};
use crate::septa::ArrivalsFeed;

use super::error::ServiceError;
use super::lookup::{LookupOutcome, NearbyStation, StationLookup};

/// Result of a next-train query.
#[derive(Debug, Clone, PartialEq)]
pub enum NextTrainOutcome {
    /// A train was found; `instruction` says whether it can be caught.
    Train {
        station: NearbyStation,
        arrival: ArrivalRecord,
        instruction: LeaveInstruction,
    },

    /// The nearest station has no upcoming train on the line.
    NoTrains { station: NearbyStation },

    /// No station within the search radius.
    OutOfRange { nearest_distance_miles: f64 },
}

/// Answers "when must I leave to catch the next train on this line?".
pub struct NextTrain<F> {
    lookup: StationLookup,
    feed: Arc<F>,
}

impl<F> NextTrain<F> {
    pub fn new(lookup: StationLookup, feed: Arc<F>) -> Self {
        Self { lookup, feed }
    }

    pub fn lookup(&self) -> &StationLookup {
        &self.lookup
    }
}

impl<F: ArrivalsFeed> NextTrain<F> {
    /// Find the next train on `line_name` heading `train_dir` from the station
    /// nearest `point`, and work out when to leave.
    ///
    /// `now` is the caller's current local time.
    pub async fn next_train(
        &self,
        point: &Point,
        line_name: Option<&str>,
        train_dir: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<NextTrainOutcome, ServiceError> {
        let (line_name, direction) = validate_train_params(line_name, train_dir)?;

        let station = match self.lookup.nearest(point)? {
            LookupOutcome::Found(station) => station,
            LookupOutcome::OutOfRange {
                nearest_distance_miles,
            } => {
                return Ok(NextTrainOutcome::OutOfRange {
                    nearest_distance_miles,
                });
            }
        };

        let records = self
            .feed
            .arrivals(&station.station.id, direction)
            .await
            .map_err(|e| {
                warn!(stop_id = %station.station.id, error = %e, "arrivals feed failed");
                ServiceError::UpstreamUnavailable(e)
            })?;

        debug!(
            stop_id = %station.station.id,
            %direction,
            count = records.len(),
            "arrivals received"
        );

        let selected = select_next(&records, line_name, direction).map_err(|e| {
            warn!(
                stop_id = %station.station.id,
                sched_time = e.value(),
                "malformed scheduled time"
            );
            e
        })?;
        let Some(arrival) = selected else {
            info!(stop_id = %station.station.id, line_name, %direction, "no trains found");
            return Ok(NextTrainOutcome::NoTrains { station });
        };

        let instruction = compute_leave_by(
            point,
            &station.station.location,
            arrival.scheduled_time,
            now,
        )
        .map_err(ServiceError::InvalidGeometry)?;

        info!(
            stop_id = %station.station.id,
            line_name,
            %direction,
            scheduled = %arrival.scheduled_time,
            leave_by = %instruction.leave_by(),
            feasible = instruction.is_feasible(),
            "next train"
        );

        Ok(NextTrainOutcome::Train {
            station,
            arrival,
            instruction,
        })
    }
}

/// Check the line and direction parameters.
///
/// The line name must be non-blank; it is otherwise used verbatim. The
/// direction must be exactly `"N"` or `"S"`.
pub fn validate_train_params<'a>(
    line_name: Option<&'a str>,
    train_dir: Option<&str>,
) -> Result<(&'a str, Direction), ServiceError> {
    let line_name = line_name
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| ServiceError::InvalidParameter("line_name must not be empty".into()))?;

    let train_dir = train_dir
        .ok_or_else(|| ServiceError::InvalidParameter("missing train_dir".into()))?;
    let direction =
        Direction::parse(train_dir).map_err(|e| ServiceError::InvalidParameter(e.to_string()))?;

    Ok((line_name, direction))
}
