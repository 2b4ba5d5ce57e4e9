//! Data transfer objects for web requests and responses.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidPoint, Network, Point};
use crate::leave::LeaveInstruction;
use crate::service::{NearbyStation, NextTrainOutcome};

use super::directions::walking_directions_url;

/// Leave-by times are shown to the second.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A coordinate as sent by the client: a JSON number or numeric text.
///
/// Query strings always produce the text form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            CoordinateValue::Number(n) => Cow::Owned(n.to_string()),
            CoordinateValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// Parse optional raw coordinates into a validated point.
fn parse_point(
    latitude: Option<&CoordinateValue>,
    longitude: Option<&CoordinateValue>,
) -> Result<Point, InvalidPoint> {
    let latitude = latitude.map(CoordinateValue::as_text);
    let longitude = longitude.map(CoordinateValue::as_text);
    Point::parse(latitude.as_deref(), longitude.as_deref())
}

/// Request for the nearest station.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearestStationRequest {
    pub latitude: Option<CoordinateValue>,
    pub longitude: Option<CoordinateValue>,
}

impl NearestStationRequest {
    /// Fill fields missing here from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            latitude: self.latitude.or(fallback.latitude),
            longitude: self.longitude.or(fallback.longitude),
        }
    }

    pub fn point(&self) -> Result<Point, InvalidPoint> {
        parse_point(self.latitude.as_ref(), self.longitude.as_ref())
    }
}

/// Request for the next train from the nearest station.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextTrainRequest {
    pub latitude: Option<CoordinateValue>,
    pub longitude: Option<CoordinateValue>,

    /// Line name, matched exactly (e.g. "Paoli/Thorndale")
    pub line_name: Option<String>,

    /// Direction of travel, "N" or "S"
    pub train_dir: Option<String>,
}

impl NextTrainRequest {
    /// Fill fields missing here from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            latitude: self.latitude.or(fallback.latitude),
            longitude: self.longitude.or(fallback.longitude),
            line_name: self.line_name.or(fallback.line_name),
            train_dir: self.train_dir.or(fallback.train_dir),
        }
    }

    pub fn point(&self) -> Result<Point, InvalidPoint> {
        parse_point(self.latitude.as_ref(), self.longitude.as_ref())
    }
}

/// GeoJSON point geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn from_point(point: &Point) -> Self {
        Self {
            kind: "Point",
            coordinates: [point.longitude(), point.latitude()],
        }
    }
}

/// GeoJSON-like feature describing a station lookup result.
///
/// `geometry` is null when no station is within range.
#[derive(Debug, Clone, Serialize)]
pub struct StationFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,

    pub geometry: Option<PointGeometry>,

    pub properties: StationProperties,
}

/// Properties of a [`StationFeature`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StationProperties {
    /// Network that was searched
    pub network: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,

    /// Great-circle distance from the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,

    /// Walking directions from the caller to the station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,

    /// Human-readable summary, set when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_train: Option<NextTrainView>,
}

/// The selected train and when to leave for it.
#[derive(Debug, Clone, Serialize)]
pub struct NextTrainView {
    pub line: String,

    /// "N" or "S"
    pub direction: String,

    pub scheduled_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,

    /// Whether leaving now still catches the train
    pub feasible: bool,

    /// Latest time to set off on foot
    pub leave_by: String,

    /// Straight-line walk at 2 mph, in minutes
    pub walk_minutes: f64,

    pub message: String,
}

impl StationFeature {
    /// A station was found within range.
    pub fn found(network: Network, caller: &Point, nearby: &NearbyStation) -> Self {
        let station = &nearby.station;
        Self {
            kind: "Feature",
            geometry: Some(PointGeometry::from_point(&station.location)),
            properties: StationProperties {
                network: network.to_string(),
                station_id: Some(station.id.clone()),
                station_name: Some(station.display_name.clone()),
                distance_miles: Some(nearby.distance_miles),
                directions_url: Some(walking_directions_url(caller, &station.location)),
                ..StationProperties::default()
            },
        }
    }

    /// No station within `max_distance_miles`.
    pub fn out_of_range(network: Network, max_distance_miles: f64) -> Self {
        Self {
            kind: "Feature",
            geometry: None,
            properties: StationProperties {
                network: network.to_string(),
                message: Some(format!("No station within {max_distance_miles} miles")),
                ..StationProperties::default()
            },
        }
    }

    /// Render a next-train outcome.
    pub fn from_next_train(
        network: Network,
        caller: &Point,
        outcome: &NextTrainOutcome,
        max_distance_miles: f64,
    ) -> Self {
        match outcome {
            NextTrainOutcome::OutOfRange { .. } => Self::out_of_range(network, max_distance_miles),
            NextTrainOutcome::NoTrains { station } => {
                let mut feature = Self::found(network, caller, station);
                feature.properties.message = Some("No trains found".to_string());
                feature
            }
            NextTrainOutcome::Train {
                station,
                arrival,
                instruction,
            } => {
                let mut feature = Self::found(network, caller, station);
                let scheduled = arrival.scheduled_time.format(TIME_FORMAT).to_string();
                let leave_by = instruction.leave_by().format(TIME_FORMAT).to_string();

                let message = match instruction {
                    LeaveInstruction::Feasible { .. } => format!(
                        "Leave by {leave_by} to catch the {scheduled} {} train",
                        arrival.line
                    ),
                    LeaveInstruction::TooLate { .. } => {
                        "You cannot make the next train in time".to_string()
                    }
                };

                feature.properties.next_train = Some(NextTrainView {
                    line: arrival.line.clone(),
                    direction: arrival.direction.code().to_string(),
                    scheduled_time: scheduled,
                    train_id: arrival.train_id.clone(),
                    destination: arrival.destination.clone(),
                    status: arrival.status.clone(),
                    track: arrival.track.clone(),
                    feasible: instruction.is_feasible(),
                    leave_by,
                    walk_minutes: instruction.walk_time().num_milliseconds() as f64 / 60_000.0,
                    message,
                });
                feature
            }
        }
    }
}
