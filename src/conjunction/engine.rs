use std::sync::Arc;

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::conjunction::risk::classify;
use crate::conjunction::search::search;
use crate::conjunction::tracks::sample_tracks;
use crate::conjunction::types::{ConjunctionResult, SearchParams};
use crate::error::ConjunctionError;
use crate::propagate::{Ephemeris, PropagatorCache};

/// Runs the full assessment for two ephemerides: search, classification and
/// ground-track sampling.
pub fn assess<A, B>(
    sat1: &A,
    sat2: &B,
    reference: DateTime<Utc>,
    params: &SearchParams,
) -> Result<ConjunctionResult, ConjunctionError>
where
    A: Ephemeris + ?Sized,
    B: Ephemeris + ?Sized,
{
    let outcome = search(sat1, sat2, reference, params)?;
    log::debug!(
        "Coarse minimum {:.3} km, refined to {:.3} km over {} samples ({} to {})",
        outcome.coarse_min_distance_km,
        outcome.min_distance_km,
        outcome.fine_grid.len(),
        outcome.fine_grid.start().to_rfc3339(),
        outcome.fine_grid.end().to_rfc3339()
    );
    let (risk_level, score) = classify(outcome.min_distance_km);
    let tracks = sample_tracks(
        sat1,
        sat2,
        &outcome.coarse_grid,
        outcome.time_of_minimum,
        params.track_points,
    )?;

    Ok(ConjunctionResult {
        min_distance_km: round2(outcome.min_distance_km),
        time_of_closest_approach: outcome.time_of_minimum,
        risk_level,
        collision_probability_score: round2(score),
        path1: tracks.path1,
        path2: tracks.path2,
        closest_point: tracks.closest_point,
    })
}

/// Turns raw element text into a conjunction result, reusing satellites
/// through the shared cache.
pub struct ConjunctionEngine {
    cache: Arc<PropagatorCache>,
    params: SearchParams,
}

impl ConjunctionEngine {
    pub fn new(cache: Arc<PropagatorCache>, params: SearchParams) -> Self {
        Self { cache, params }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn cache(&self) -> &PropagatorCache {
        &self.cache
    }

    /// `reference` is truncated to the whole minute before any sampling.
    pub fn evaluate(
        &self,
        raw1: &str,
        raw2: &str,
        reference: DateTime<Utc>,
    ) -> Result<ConjunctionResult, ConjunctionError> {
        let sat1 = self.cache.get_or_build(raw1)?;
        let sat2 = self.cache.get_or_build(raw2)?;
        let reference = reference
            .duration_trunc(Duration::minutes(1))
            .unwrap_or(reference);

        let result = assess(sat1.as_ref(), sat2.as_ref(), reference, &self.params)?;
        log::info!(
            "{} / {}: closest approach {} km at {} ({})",
            sat1.name(),
            sat2.name(),
            result.min_distance_km,
            result.time_of_closest_approach.to_rfc3339(),
            result.risk_level
        );
        Ok(result)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
