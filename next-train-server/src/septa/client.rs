//! SEPTA Arrivals HTTP client.
//!
//! A single request per call, with a bounded timeout and no retry. Callers
//! see transport and status failures directly.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Direction;

use super::error::FeedError;
use super::types::{ArrivalsBoard, FeedArrival, board_arrivals};

/// Default base URL for the SEPTA API.
const DEFAULT_BASE_URL: &str = "https://www3.septa.org/api";

/// Requests allowed in flight at once.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the SEPTA client.
#[derive(Debug, Clone)]
pub struct SeptaConfig {
    /// API root, without the `/Arrivals` path
    pub base_url: String,

    /// Upper bound on in-flight requests to SEPTA
    pub max_concurrent: usize,

    pub timeout_secs: u64,
}

impl SeptaConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point the client at another API root, e.g. a local stub.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Request timeout in seconds. No request is retried.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SeptaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SEPTA Arrivals API client.
///
/// Uses a semaphore to limit concurrent requests to the upstream API.
#[derive(Debug, Clone)]
pub struct SeptaClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl SeptaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SeptaConfig) -> Result<Self, FeedError> {
        if config.max_concurrent == 0 {
            return Err(FeedError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL of the arrivals endpoint.
    pub fn arrivals_url(&self) -> String {
        format!("{}/Arrivals/index.php", self.base_url)
    }

    /// Fetch the arrivals board for a station and keep one direction.
    ///
    /// # Arguments
    ///
    /// * `stop_id` - SEPTA stop id of the station
    /// * `direction` - Which half of the board to return
    pub async fn get_arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> Result<Vec<FeedArrival>, FeedError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FeedError::NotConfigured("semaphore closed".to_string()))?;

        let url = self.arrivals_url();
        debug!(stop_id, %direction, %url, "fetching arrivals");

        let response = self
            .http
            .get(&url)
            .query(&[("station", stop_id), ("direction", direction.code())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let board: ArrivalsBoard = serde_json::from_str(&body).map_err(|e| FeedError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let arrivals = board_arrivals(board, direction);
        debug!(stop_id, %direction, count = arrivals.len(), "arrivals fetched");
        Ok(arrivals)
    }
}
