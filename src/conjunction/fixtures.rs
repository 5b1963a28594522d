//! Element sets and synthetic ephemerides shared by tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::elements::seal;
use crate::error::ConjunctionError;
use crate::propagate::Ephemeris;

/// Epoch of every generated element set (2023 day 286.5).
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 10, 13, 12, 0, 0).unwrap()
}

/// Near-circular, drag-free element set with valid checksums.
pub fn circular_orbit(
    catalog: u32,
    inclination_deg: f64,
    raan_deg: f64,
    mean_anomaly_deg: f64,
    mean_motion_rev_day: f64,
) -> String {
    element_set(
        catalog,
        "00000-0",
        inclination_deg,
        raan_deg,
        mean_anomaly_deg,
        mean_motion_rev_day,
    )
}

/// Low orbit with an extreme drag term. It builds fine but cannot be
/// propagated years away from its epoch.
pub fn decaying_orbit(catalog: u32) -> String {
    element_set(catalog, "50000-0", 51.6, 114.7, 0.0, 15.5)
}

fn element_set(
    catalog: u32,
    drag_term: &str,
    inclination_deg: f64,
    raan_deg: f64,
    mean_anomaly_deg: f64,
    mean_motion_rev_day: f64,
) -> String {
    let line1 = format!(
        "1 {:05}U 23001A   23286.50000000  .00000000  00000-0  {} 0  999",
        catalog, drag_term
    );
    let line2 = format!(
        "2 {:05} {:8.4} {:8.4} 0001000 {:8.4} {:8.4} {:11.8}00000",
        catalog, inclination_deg, raan_deg, 0.0, mean_anomaly_deg, mean_motion_rev_day
    );
    format!("OBJECT {}\n{}\n{}", catalog, seal(&line1), seal(&line2))
}

/// Sits at the frame origin forever.
pub struct Parked;

impl Ephemeris for Parked {
    fn position_at(&self, _timestamp: DateTime<Utc>) -> Result<[f64; 3], ConjunctionError> {
        Ok([0.0, 0.0, 0.0])
    }
}

/// Moves along x at 1 km/min, offset `miss_km` along y.
pub struct Drifting {
    closest_at: DateTime<Utc>,
    miss_km: f64,
}

impl Drifting {
    /// Passes closest to the origin `minutes` after `start`.
    pub fn passing(start: DateTime<Utc>, minutes: f64, miss_km: f64) -> Self {
        Self {
            closest_at: start + chrono::Duration::milliseconds((minutes * 60_000.0) as i64),
            miss_km,
        }
    }
}

impl Ephemeris for Drifting {
    fn position_at(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], ConjunctionError> {
        let minutes = (timestamp - self.closest_at).num_milliseconds() as f64 / 60_000.0;
        Ok([minutes, self.miss_km, 0.0])
    }
}

/// Fails to propagate from `after` onwards.
pub struct Failing {
    pub after: DateTime<Utc>,
}

impl Ephemeris for Failing {
    fn position_at(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], ConjunctionError> {
        if timestamp >= self.after {
            Err(ConjunctionError::Propagation("satellite decayed".into()))
        } else {
            Ok([7000.0, 0.0, 0.0])
        }
    }
}
