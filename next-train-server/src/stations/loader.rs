//! GeoJSON station loading.
//!
//! Each network ships as a GeoJSON FeatureCollection of points. The networks
//! name their identity and display-name attributes differently, which
//! [`NetworkSchema`] captures.

use std::path::Path;

use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::domain::{Network, Point, Station, StationSet};

use super::error::StationLoadError;
use super::table::{description_cells, get_next_after_match};

/// Where a network keeps station identity and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSchema {
    /// Property holding the station identity
    pub id_field: &'static str,
    /// Property holding the display name
    pub name_field: &'static str,
    /// Fallback for KML exports: the HTML description table
    pub description: Option<DescriptionTable>,
}

/// Table keys used when attributes live in an HTML description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTable {
    /// Property holding the HTML
    pub field: &'static str,
    /// Cell preceding the station identity
    pub id_key: &'static str,
    /// Cell preceding the display name
    pub name_key: &'static str,
}

impl NetworkSchema {
    /// SEPTA Regional Rail: `stop_id` / `station_name`, or the KML table.
    pub fn regional_rail() -> Self {
        Self {
            id_field: "stop_id",
            name_field: "station_name",
            description: Some(DescriptionTable {
                field: "Description",
                id_key: "Stop_ID",
                name_key: "Station_Na",
            }),
        }
    }

    /// DC Metro: `GIS_ID` / `NAME`.
    pub fn metro() -> Self {
        Self {
            id_field: "GIS_ID",
            name_field: "NAME",
            description: None,
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::RegionalRail => Self::regional_rail(),
            Network::Metro => Self::metro(),
        }
    }
}

/// Load a network's stations from a GeoJSON file.
///
/// Fails if the file yields no stations.
pub fn load_network(
    path: impl AsRef<Path>,
    schema: &NetworkSchema,
) -> Result<StationSet, StationLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| StationLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let stations = parse_network(&text, schema).map_err(|e| match e {
        StationLoadError::Empty(_) => StationLoadError::Empty(path.display().to_string()),
        other => other,
    })?;

    info!(path = %path.display(), count = stations.len(), "loaded stations");
    Ok(stations)
}

/// Parse a network's stations from GeoJSON text.
///
/// Stations keep the order of the features in the collection.
pub fn parse_network(text: &str, schema: &NetworkSchema) -> Result<StationSet, StationLoadError> {
    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
        return Err(StationLoadError::NotFeatureCollection);
    };

    let stations = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| parse_station(index, feature, schema))
        .collect::<Result<StationSet, _>>()?;

    if stations.is_empty() {
        return Err(StationLoadError::Empty("feature collection".to_string()));
    }

    Ok(stations)
}

fn parse_station(
    index: usize,
    feature: &Feature,
    schema: &NetworkSchema,
) -> Result<Station, StationLoadError> {
    let location = feature_point(index, feature)?;

    let mut cells: Option<Vec<String>> = None;
    let id = attribute(index, feature, schema.id_field, schema, &mut cells, |t| t.id_key)?;
    let name = attribute(index, feature, schema.name_field, schema, &mut cells, |t| {
        t.name_key
    })?;

    Ok(Station::new(id, name, location))
}

fn feature_point(index: usize, feature: &Feature) -> Result<Point, StationLoadError> {
    let bad = |reason: String| StationLoadError::BadGeometry { index, reason };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| bad("no geometry".to_string()))?;

    match &geometry.value {
        // GeoJSON positions are [longitude, latitude, (altitude)]
        geojson::Value::Point(position) if position.len() >= 2 => {
            Point::new(position[1], position[0]).map_err(|e| bad(e.to_string()))
        }
        geojson::Value::Point(_) => Err(bad("point has fewer than two coordinates".to_string())),
        _ => Err(bad("geometry is not a point".to_string())),
    }
}

/// Read an attribute directly, falling back to the description table.
fn attribute(
    index: usize,
    feature: &Feature,
    field: &str,
    schema: &NetworkSchema,
    cells: &mut Option<Vec<String>>,
    table_key: impl Fn(&DescriptionTable) -> &'static str,
) -> Result<String, StationLoadError> {
    if let Some(text) = feature.property(field).and_then(property_text) {
        return Ok(text);
    }

    let Some(table) = &schema.description else {
        return Err(StationLoadError::MissingField {
            index,
            field: field.to_string(),
        });
    };

    let Some(html) = feature.property(table.field).and_then(JsonValue::as_str) else {
        return Err(StationLoadError::MissingField {
            index,
            field: field.to_string(),
        });
    };

    if cells.is_none() {
        let parsed = description_cells(html)
            .map_err(|source| StationLoadError::Description { index, source })?;
        *cells = Some(parsed);
    }
    let cells = cells.as_deref().unwrap_or_default();
    get_next_after_match(cells, table_key(table))
        .map(str::to_string)
        .map_err(|source| StationLoadError::Table { index, source })
}

fn property_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
