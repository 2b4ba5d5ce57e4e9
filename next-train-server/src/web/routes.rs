//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::Network;
use crate::service::{LookupOutcome, ServiceError};
use crate::septa::ArrivalsFeed;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<F: ArrivalsFeed>(state: AppState<F>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/stations/:network/nearest",
            get(nearest_query::<F>).post(nearest_body::<F>),
        )
        .route(
            "/stations/:network/next-train",
            get(next_train_query::<F>).post(next_train_body::<F>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Nearest station, parameters in the query string.
async fn nearest_query<F: ArrivalsFeed>(
    State(state): State<AppState<F>>,
    Path(network): Path<String>,
    Query(req): Query<NearestStationRequest>,
) -> Result<Json<StationFeature>, AppError> {
    nearest_station(&state, &network, req)
}

/// Nearest station, parameters in a JSON body.
///
/// Query-string parameters take precedence over the body.
async fn nearest_body<F: ArrivalsFeed>(
    State(state): State<AppState<F>>,
    Path(network): Path<String>,
    Query(query): Query<NearestStationRequest>,
    body: Bytes,
) -> Result<Json<StationFeature>, AppError> {
    let req = query.or(parse_body(&body)?);
    nearest_station(&state, &network, req)
}

fn nearest_station<F>(
    state: &AppState<F>,
    network: &str,
    req: NearestStationRequest,
) -> Result<Json<StationFeature>, AppError> {
    let network = parse_network(network)?;
    let point = req.point().map_err(ServiceError::from)?;
    let lookup = state.lookup(network);

    let feature = match lookup.nearest(&point)? {
        LookupOutcome::Found(nearby) => StationFeature::found(network, &point, &nearby),
        LookupOutcome::OutOfRange { .. } => {
            StationFeature::out_of_range(network, lookup.max_distance_miles())
        }
    };

    Ok(Json(feature))
}

/// Next train, parameters in the query string.
async fn next_train_query<F: ArrivalsFeed>(
    State(state): State<AppState<F>>,
    Path(network): Path<String>,
    Query(req): Query<NextTrainRequest>,
) -> Result<Json<StationFeature>, AppError> {
    next_train(&state, &network, req).await
}

/// Next train, parameters in a JSON body.
///
/// Query-string parameters take precedence over the body.
async fn next_train_body<F: ArrivalsFeed>(
    State(state): State<AppState<F>>,
    Path(network): Path<String>,
    Query(query): Query<NextTrainRequest>,
    body: Bytes,
) -> Result<Json<StationFeature>, AppError> {
    let req = query.or(parse_body(&body)?);
    next_train(&state, &network, req).await
}

async fn next_train<F: ArrivalsFeed>(
    state: &AppState<F>,
    network: &str,
    req: NextTrainRequest,
) -> Result<Json<StationFeature>, AppError> {
    let network = parse_network(network)?;
    if network != Network::RegionalRail {
        return Err(AppError::BadRequest {
            message: format!("next-train is not available for {network}"),
        });
    }

    let point = req.point().map_err(ServiceError::from)?;
    // Naive feed times are Philadelphia local; the server must run on that
    // zone (see `ServerConfig`).
    let now = Local::now().naive_local();

    let outcome = state
        .next_train
        .next_train(
            &point,
            req.line_name.as_deref(),
            req.train_dir.as_deref(),
            now,
        )
        .await?;

    let max_distance_miles = state.next_train.lookup().max_distance_miles();
    Ok(Json(StationFeature::from_next_train(
        network,
        &point,
        &outcome,
        max_distance_miles,
    )))
}

fn parse_network(network: &str) -> Result<Network, AppError> {
    network.parse().map_err(|e: crate::domain::UnknownNetwork| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Parse a JSON body. An empty body is treated as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Application error type.
///
/// Rendered as a plain-text body.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            _ if e.is_client_error() => AppError::BadRequest { message },
            ServiceError::UpstreamUnavailable(_) | ServiceError::Timestamp(_) => {
                AppError::BadGateway { message }
            }
            _ => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, message).into_response()
    }
}
