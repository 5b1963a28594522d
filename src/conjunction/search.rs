use chrono::{DateTime, Utc};

use crate::conjunction::grid::TimeGrid;
use crate::conjunction::types::SearchParams;
use crate::error::ConjunctionError;
use crate::propagate::Ephemeris;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub min_distance_km: f64,
    pub time_of_minimum: DateTime<Utc>,
    pub coarse_min_distance_km: f64,
    pub coarse_grid: TimeGrid,
    pub fine_grid: TimeGrid,
}

/// Finds the closest approach over the horizon: a coarse scan from
/// `reference`, then a fine scan around the coarse minimum. The fine window
/// is clamped to the span of the coarse grid, so nothing is propagated
/// before `reference` or after the last coarse sample.
pub fn search<A, B>(
    sat1: &A,
    sat2: &B,
    reference: DateTime<Utc>,
    params: &SearchParams,
) -> Result<SearchOutcome, ConjunctionError>
where
    A: Ephemeris + ?Sized,
    B: Ephemeris + ?Sized,
{
    let coarse_grid = TimeGrid::new(reference, params.coarse_step, params.coarse_samples());
    let coarse = separations(sat1, sat2, &coarse_grid)?;
    let (coarse_index, coarse_min_distance_km) = closest(&coarse)?;
    let coarse_time = coarse_grid.at(coarse_index);

    let fine_start = (coarse_time - params.refine_half_width).max(coarse_grid.start());
    let fine_end = (coarse_time + params.refine_half_width).min(coarse_grid.end());
    let fine_grid = TimeGrid::spanning(fine_start, fine_end, params.fine_step);
    let fine = separations(sat1, sat2, &fine_grid)?;
    let (fine_index, min_distance_km) = closest(&fine)?;

    Ok(SearchOutcome {
        min_distance_km,
        time_of_minimum: fine_grid.at(fine_index),
        coarse_min_distance_km,
        coarse_grid,
        fine_grid,
    })
}

/// Separation in km at every instant of `grid`. The first propagation
/// failure aborts the whole scan.
pub fn separations<A, B>(sat1: &A, sat2: &B, grid: &TimeGrid) -> Result<Vec<f64>, ConjunctionError>
where
    A: Ephemeris + ?Sized,
    B: Ephemeris + ?Sized,
{
    grid.instants()
        .map(|t| {
            let d = distance(sat1.position_at(t)?, sat2.position_at(t)?);
            if d.is_finite() {
                Ok(d)
            } else {
                Err(ConjunctionError::Propagation(format!(
                    "non-finite separation at {}",
                    t.to_rfc3339()
                )))
            }
        })
        .collect()
}

/// Index and value of the smallest distance; the earliest wins ties.
fn closest(distances: &[f64]) -> Result<(usize, f64), ConjunctionError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in distances.iter().enumerate() {
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.ok_or_else(|| ConjunctionError::Propagation("empty time grid".into()))
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dr = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt()
}
