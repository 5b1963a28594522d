use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::conjunction::ConjunctionResult;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CollisionRequest {
    pub norad_id_1: String,
    pub norad_id_2: String,
    /// Start of the forecast window (RFC3339); defaults to now.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

#[utoipa::path(
    post,
    path = "/predict_collision",
    tag = "conjunction",
    request_body = CollisionRequest,
    responses(
        (status = 200, description = "Closest approach over the forecast window", body = ConjunctionResult),
        (status = 400, description = "Unknown object or malformed element set", body = ErrorResponse),
        (status = 500, description = "Propagation failure", body = ErrorResponse)
    )
)]
pub async fn predict_collision(
    State(state): State<AppState>,
    Json(request): Json<CollisionRequest>,
) -> ApiResult<Json<ConjunctionResult>> {
    let tle1 = state.elements.fetch(&request.norad_id_1).await?;
    let tle2 = state.elements.fetch(&request.norad_id_2).await?;
    let reference = request.reference_time.unwrap_or_else(Utc::now);

    // The search is CPU-bound; keep it off the async workers.
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.evaluate(&tle1, &tle2, reference))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}
