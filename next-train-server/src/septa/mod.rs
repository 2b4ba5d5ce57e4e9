//! SEPTA Arrivals feed.
//!
//! This module provides an HTTP client for the SEPTA Arrivals API, a mock
//! client backed by JSON files, and the [`ArrivalsFeed`] trait the services
//! are written against.
//!
//! Key characteristics of the feed:
//! - Results are already partitioned by direction (`Northbound`/`Southbound`)
//! - Trains are not ordered; callers must pick the earliest themselves
//! - Times are naive local timestamps, `YYYY-MM-DD HH:MM:SS.ffffff`

mod client;
mod error;
mod feed;
mod mock;
mod types;

pub use client::{SeptaClient, SeptaConfig};
pub use error::FeedError;
pub use feed::{ArrivalsFeed, ArrivalsSource};
pub use mock::MockSeptaClient;
pub use types::{ArrivalsBoard, DirectionalArrivals, FeedArrival, board_arrivals};
