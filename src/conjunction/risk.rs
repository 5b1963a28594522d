use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

pub const HIGH_RISK_BELOW_KM: f64 = 10.0;
pub const MEDIUM_RISK_BELOW_KM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Maps a miss distance to a level and a severity score in [0, 100]. The
/// score is a fixed heuristic, not a collision probability.
pub fn classify(min_distance_km: f64) -> (RiskLevel, f64) {
    let d = min_distance_km;
    if d < HIGH_RISK_BELOW_KM {
        (RiskLevel::High, (90.0 + (10.0 - d)).min(100.0))
    } else if d < MEDIUM_RISK_BELOW_KM {
        (RiskLevel::Medium, 50.0 + (40.0 - (d - 10.0)))
    } else {
        (RiskLevel::Low, (50.0 - (d - 50.0) * 0.1).max(0.0))
    }
}
