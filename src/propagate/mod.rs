mod cache;
mod frames;
mod satellite;

pub use cache::{PropagatorCache, DEFAULT_CAPACITY};
pub use frames::GeoPoint;
pub use satellite::{Ephemeris, Satellite};
