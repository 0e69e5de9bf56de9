use axum::{
    extract::{Query, State},
    Extension, Json,
};
use bloodbank_core::Location;
use bloodbank_routing::RoutingError;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RouteQuery {
    start_lat: f64,
    start_lon: f64,
    end_lat: f64,
    end_lon: f64,
}

impl RouteQuery {
    fn endpoints(&self) -> (Location, Location) {
        (
            Location {
                latitude: self.start_lat,
                longitude: self.start_lon,
            },
            Location {
                latitude: self.end_lat,
                longitude: self.end_lon,
            },
        )
    }
}

/// Proxies a driving route request and returns the upstream JSON byte-for-byte.
pub(super) async fn get_route(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Box<RawValue>>, ApiError> {
    tracing::info!(
        start_lat = query.start_lat,
        start_lon = query.start_lon,
        end_lat = query.end_lat,
        end_lon = query.end_lon,
        "getting route"
    );

    let (start, end) = query.endpoints();
    state
        .routing
        .route(start, end)
        .await
        .map(Json)
        .map_err(|e| map_routing_error(req_id.0, &e))
}

fn map_routing_error(request_id: String, error: &RoutingError) -> ApiError {
    let code = if error.is_config() {
        tracing::warn!(request_id = %request_id, error = %error, "routing not configured");
        "routing_not_configured"
    } else {
        tracing::error!(request_id = %request_id, error = %error, "routing API error");
        "routing_upstream"
    };
    ApiError::new(request_id, code, error.to_string())
}
