use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::health::HealthResponse;
use super::api::predict::CollisionRequest;
use crate::conjunction::{ConjunctionResult, RiskLevel};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::predict::predict_collision,
        super::api::health::health,
    ),
    components(
        schemas(
            CollisionRequest,
            ConjunctionResult,
            RiskLevel,
            ErrorResponse,
            HealthResponse,
        )
    ),
    info(
        title = "OrbitGuard API",
        description = "Conjunction screening for pairs of catalogued objects",
        version = "0.1.0"
    ),
    tags(
        (name = "conjunction", description = "Closest-approach prediction"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
