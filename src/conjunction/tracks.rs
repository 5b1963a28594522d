use chrono::{DateTime, Utc};

use crate::conjunction::grid::TimeGrid;
use crate::error::ConjunctionError;
use crate::propagate::Ephemeris;

#[derive(Debug, Clone, PartialEq)]
pub struct GroundTracks {
    pub path1: Vec<f64>,
    pub path2: Vec<f64>,
    pub closest_point: [f64; 3],
}

/// `count` grid indices spread evenly from the first to the last sample,
/// truncated towards the start. Shorter grids repeat indices.
pub fn sample_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    if count <= 1 {
        return vec![0; count];
    }

    let last = len - 1;
    let spacing = count - 1;
    (0..count).map(|i| i * last / spacing).collect()
}

/// Ground tracks over the whole coarse grid, plus the first object's
/// subpoint at the refined time of closest approach.
pub fn sample_tracks<A, B>(
    sat1: &A,
    sat2: &B,
    coarse_grid: &TimeGrid,
    time_of_minimum: DateTime<Utc>,
    count: usize,
) -> Result<GroundTracks, ConjunctionError>
where
    A: Ephemeris + ?Sized,
    B: Ephemeris + ?Sized,
{
    let indices = sample_indices(coarse_grid.len(), count);
    let mut path1 = Vec::with_capacity(indices.len() * 3);
    let mut path2 = Vec::with_capacity(indices.len() * 3);

    for index in indices {
        let t = coarse_grid.at(index);
        path1.extend(sat1.subpoint_at(t)?.to_triple());
        path2.extend(sat2.subpoint_at(t)?.to_triple());
    }

    Ok(GroundTracks {
        path1,
        path2,
        closest_point: sat1.subpoint_at(time_of_minimum)?.to_triple(),
    })
}
