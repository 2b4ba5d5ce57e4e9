//! The arrivals-feed seam.

use std::future::Future;

use crate::domain::Direction;

use super::client::SeptaClient;
use super::error::FeedError;
use super::mock::MockSeptaClient;
use super::types::FeedArrival;

/// A source of scheduled arrivals for a station.
///
/// Implementations return only the trains travelling in `direction`. A
/// station with no data yields an empty list, not an error.
pub trait ArrivalsFeed: Send + Sync + 'static {
    fn arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> impl Future<Output = Result<Vec<FeedArrival>, FeedError>> + Send;
}

impl ArrivalsFeed for SeptaClient {
    async fn arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> Result<Vec<FeedArrival>, FeedError> {
        self.get_arrivals(stop_id, direction).await
    }
}

impl ArrivalsFeed for MockSeptaClient {
    async fn arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> Result<Vec<FeedArrival>, FeedError> {
        Ok(self.get_arrivals(stop_id, direction))
    }
}

/// The feed selected at startup: live API or on-disk mock boards.
#[derive(Debug, Clone)]
pub enum ArrivalsSource {
    Live(SeptaClient),
    Mock(MockSeptaClient),
}

impl ArrivalsFeed for ArrivalsSource {
    async fn arrivals(
        &self,
        stop_id: &str,
        direction: Direction,
    ) -> Result<Vec<FeedArrival>, FeedError> {
        match self {
            ArrivalsSource::Live(client) => client.arrivals(stop_id, direction).await,
            ArrivalsSource::Mock(client) => client.arrivals(stop_id, direction).await,
        }
    }
}
