//! Station loading error types.

use std::path::PathBuf;

use super::table::MatchError;

/// Errors that can occur when loading a station dataset.
///
/// All of these are startup failures; a server never runs with a partially
/// loaded or empty network.
#[derive(Debug, thiserror::Error)]
pub enum StationLoadError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid GeoJSON
    #[error("GeoJSON parse error: {0}")]
    Parse(#[from] geojson::Error),

    /// GeoJSON is valid but not a FeatureCollection
    #[error("expected a FeatureCollection")]
    NotFeatureCollection,

    /// A feature has no geometry, or a non-point one
    #[error("feature {index}: {reason}")]
    BadGeometry { index: usize, reason: String },

    /// A feature lacks the identity or name attribute
    #[error("feature {index}: missing field {field:?}")]
    MissingField { index: usize, field: String },

    /// A description table lacks a key or its value
    #[error("feature {index}: {source}")]
    Table {
        index: usize,
        #[source]
        source: MatchError,
    },

    /// A description table is not readable markup
    #[error("feature {index}: malformed description table: {source}")]
    Description {
        index: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// The dataset contains no stations
    #[error("no stations found in {0}")]
    Empty(String),
}
