use axum::{extract::State, Extension, Json};
use bloodbank_core::{nearby, BloodBank, Location, DEFAULT_NEARBY_LIMIT};
use bloodbank_dataset::{DatasetError, LoadReport};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn list_all_blood_banks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<BloodBank>>, ApiError> {
    tracing::info!("fetching all blood banks");
    let report = load_dataset(&state, &req_id).await?;
    Ok(Json(report.banks))
}

pub(super) async fn list_nearby_blood_banks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(origin): Json<Location>,
) -> Result<Json<Vec<BloodBank>>, ApiError> {
    tracing::info!(
        latitude = origin.latitude,
        longitude = origin.longitude,
        "searching nearby blood banks"
    );
    let report = load_dataset(&state, &req_id).await?;
    Ok(Json(nearby(report.banks, origin, DEFAULT_NEARBY_LIMIT)))
}

/// Reloads the dataset from disk off the async runtime.
async fn load_dataset(state: &AppState, req_id: &RequestId) -> Result<LoadReport, ApiError> {
    let path = state.dataset_path.clone();
    let joined =
        tokio::task::spawn_blocking(move || bloodbank_dataset::load_blood_banks(&path)).await;

    match joined {
        Ok(Ok(report)) => {
            if report.skipped > 0 {
                tracing::warn!(
                    request_id = %req_id.0,
                    skipped = report.skipped,
                    "dataset rows skipped during load"
                );
            }
            Ok(report)
        }
        Ok(Err(e)) => Err(map_dataset_error(req_id.0.clone(), &e)),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "dataset load task failed");
            Err(ApiError::new(
                req_id.0.clone(),
                "internal_error",
                "dataset load task failed",
            ))
        }
    }
}

fn map_dataset_error(request_id: String, error: &DatasetError) -> ApiError {
    tracing::error!(request_id = %request_id, error = %error, "error loading blood banks");
    let code = if error.is_unavailable() {
        "dataset_unavailable"
    } else {
        "dataset_schema"
    };
    ApiError::new(request_id, code, format!("CSV Error: {error}"))
}
