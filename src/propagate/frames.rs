use chrono::{DateTime, Utc};

// WGS-84 constants
const WGS84_A_KM: f64 = 6378.137;
const WGS84_E2: f64 = 0.00669437999014;
const MAX_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-12;

/// Point on the WGS-84 ellipsoid below an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub altitude_m: f64,
}

impl GeoPoint {
    pub fn to_triple(self) -> [f64; 3] {
        [self.longitude_deg, self.latitude_deg, self.altitude_m]
    }
}

pub fn greenwich_sidereal_time(timestamp: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()))
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Earth-fixed position (km) to geodetic coordinates, iterating on latitude
/// until it settles.
pub fn ecef_to_geodetic(pos_ecef: [f64; 3]) -> GeoPoint {
    let [x, y, z] = pos_ecef;
    let p = x.hypot(y);
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - WGS84_E2));
    let mut n = prime_vertical_radius(latitude);
    for _ in 0..MAX_ITERATIONS {
        let next = (z + WGS84_E2 * n * latitude.sin()).atan2(p);
        n = prime_vertical_radius(next);
        let settled = (next - latitude).abs() < LATITUDE_TOLERANCE_RAD;
        latitude = next;
        if settled {
            break;
        }
    }

    // Stable at both the equator and the poles.
    let altitude_km = p * latitude.cos() + z * latitude.sin()
        - WGS84_A_KM * WGS84_A_KM / n;

    GeoPoint {
        longitude_deg: longitude.to_degrees(),
        latitude_deg: latitude.to_degrees(),
        altitude_m: altitude_km * 1000.0,
    }
}

/// Subpoint of a TEME position (km) at `timestamp`.
pub fn subpoint(pos_teme: [f64; 3], timestamp: DateTime<Utc>) -> GeoPoint {
    let gmst = greenwich_sidereal_time(timestamp);
    ecef_to_geodetic(teme_to_ecef_position(pos_teme, gmst))
}

fn prime_vertical_radius(latitude: f64) -> f64 {
    let sin_lat = latitude.sin();
    WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}
