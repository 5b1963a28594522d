use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::conjunction::risk::RiskLevel;

pub const DEFAULT_HORIZON: Duration = Duration::hours(6);
pub const DEFAULT_COARSE_STEP: Duration = Duration::minutes(5);
pub const DEFAULT_FINE_STEP: Duration = Duration::minutes(1);
pub const DEFAULT_REFINE_HALF_WIDTH: Duration = Duration::minutes(20);
pub const DEFAULT_TRACK_POINTS: usize = 120;

/// Sampling settings for one conjunction assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub horizon: Duration,
    pub coarse_step: Duration,
    pub fine_step: Duration,
    pub refine_half_width: Duration,
    pub track_points: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            coarse_step: DEFAULT_COARSE_STEP,
            fine_step: DEFAULT_FINE_STEP,
            refine_half_width: DEFAULT_REFINE_HALF_WIDTH,
            track_points: DEFAULT_TRACK_POINTS,
        }
    }
}

impl SearchParams {
    /// Number of coarse samples; the horizon end itself is not sampled.
    pub fn coarse_samples(&self) -> usize {
        let step_ms = self.coarse_step.num_milliseconds();
        if step_ms <= 0 {
            return 1;
        }
        ((self.horizon.num_milliseconds() / step_ms) as usize).max(1)
    }
}

/// Closest approach between two objects over the forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConjunctionResult {
    pub min_distance_km: f64,
    pub time_of_closest_approach: DateTime<Utc>,
    pub risk_level: RiskLevel,
    pub collision_probability_score: f64,
    /// Flat `[lon_deg, lat_deg, alt_m]` triples for the first object.
    pub path1: Vec<f64>,
    /// Flat `[lon_deg, lat_deg, alt_m]` triples for the second object.
    pub path2: Vec<f64>,
    /// Subpoint of the first object at closest approach.
    #[schema(value_type = Vec<f64>)]
    pub closest_point: [f64; 3],
}
