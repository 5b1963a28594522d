use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ConjunctionError;

pub enum ApiError {
    Conjunction(ConjunctionError),
    Internal(String),
}

impl From<ConjunctionError> for ApiError {
    fn from(e: ConjunctionError) -> Self {
        ApiError::Conjunction(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match self {
            ApiError::Conjunction(e @ ConjunctionError::MalformedElementSet(_)) => {
                (StatusCode::BAD_REQUEST, "malformed_element_set", e.to_string())
            }
            ApiError::Conjunction(e @ ConjunctionError::ElementSourceUnavailable(_)) => {
                (StatusCode::BAD_REQUEST, "element_set_unavailable", e.to_string())
            }
            ApiError::Conjunction(e @ ConjunctionError::Propagation(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "propagation_error", e.to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        if status.is_server_error() {
            log::error!("{}: {}", code, detail);
        }
        (status, Json(ErrorResponse::with_detail(code, &detail))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn with_detail(error: &str, detail: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            detail: Some(detail.to_string()),
        }
    }
}
