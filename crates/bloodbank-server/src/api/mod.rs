mod banks;
mod route;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bloodbank_routing::RoutingClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

/// Shared, read-only handler state. The dataset itself is not cached here;
/// every request reloads it from `dataset_path`.
#[derive(Clone)]
pub struct AppState {
    pub dataset_path: Arc<PathBuf>,
    pub routing: RoutingClient,
}

impl AppState {
    pub fn new(dataset_path: PathBuf, routing: RoutingClient) -> Self {
        Self {
            dataset_path: Arc::new(dataset_path),
            routing,
        }
    }
}

/// Error body returned for every handler failure.
///
/// `detail` carries the human-readable message; `code` is stable for clients.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
    pub code: &'static str,
    pub request_id: String,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            detail: detail.into(),
            code,
            request_id: request_id.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WelcomeData {
    message: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/all-blood-banks", get(banks::list_all_blood_banks))
        .route("/nearby", post(banks::list_nearby_blood_banks))
        .route("/route", get(route::get_route))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn welcome() -> impl IntoResponse {
    Json(WelcomeData {
        message: "Welcome to the Blood Bank API!",
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
