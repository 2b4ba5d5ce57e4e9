//! Mock SEPTA client for running without API access.
//!
//! Loads arrivals boards from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::Direction;

use super::error::FeedError;
use super::types::{ArrivalsBoard, FeedArrival, board_arrivals};

/// Mock client that serves boards loaded from disk.
#[derive(Debug, Clone)]
pub struct MockSeptaClient {
    /// Pre-loaded boards, keyed by stop id.
    boards: Arc<HashMap<String, ArrivalsBoard>>,
}

impl MockSeptaClient {
    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{stop_id}.json` (e.g. `90004.json`) in the same
    /// format as the live endpoint.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FeedError::Mock(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| FeedError::Mock(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stop_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| FeedError::Mock(format!("invalid filename: {}", path.display())))?
                .to_string();

            let json = std::fs::read_to_string(&path)
                .map_err(|e| FeedError::Mock(format!("failed to read {}: {e}", path.display())))?;

            let board: ArrivalsBoard = serde_json::from_str(&json).map_err(|e| FeedError::Json {
                message: format!("{}: {e}", path.display()),
                body: None,
            })?;

            debug!(%stop_id, "loaded mock board");
            boards.insert(stop_id, board);
        }

        info!(count = boards.len(), dir = %data_dir.display(), "mock arrivals loaded");

        Ok(Self {
            boards: Arc::new(boards),
        })
    }

    /// Arrivals for a station in one direction.
    ///
    /// Stations without a mock file have no arrivals.
    pub fn get_arrivals(&self, stop_id: &str, direction: Direction) -> Vec<FeedArrival> {
        self.boards
            .get(stop_id)
            .cloned()
            .map(|board| board_arrivals(board, direction))
            .unwrap_or_default()
    }

    /// Stop ids with mock data.
    pub fn available_stations(&self) -> Vec<&str> {
        self.boards.keys().map(String::as_str).collect()
    }
}
