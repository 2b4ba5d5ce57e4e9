//! Web layer for the next-train service.
//!
//! Provides HTTP endpoints for nearest-station and next-train queries.

mod directions;
mod dto;
mod routes;
mod state;

pub use directions::walking_directions_url;
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
