use std::fmt;

use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::elements::OrbitalElementSet;
use crate::error::ConjunctionError;
use crate::propagate::frames::{subpoint, GeoPoint};

/// Anything that can report where an object is at a given instant.
pub trait Ephemeris {
    /// Inertial position in kilometres.
    fn position_at(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], ConjunctionError>;

    fn subpoint_at(&self, timestamp: DateTime<Utc>) -> Result<GeoPoint, ConjunctionError> {
        Ok(subpoint(self.position_at(timestamp)?, timestamp))
    }
}

/// SGP4-propagatable object built from one element set.
pub struct Satellite {
    name: String,
    elements: Elements,
    constants: Constants,
}

impl Satellite {
    pub fn from_element_set(set: &OrbitalElementSet) -> Result<Self, ConjunctionError> {
        let elements = Elements::from_tle(
            Some(set.name().to_string()),
            set.line1().as_bytes(),
            set.line2().as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;

        Ok(Self {
            name: set.name().to_string(),
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }
}

impl fmt::Debug for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.elements.norad_id)
            .finish()
    }
}

impl Ephemeris for Satellite {
    fn position_at(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], ConjunctionError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| ConjunctionError::Propagation(e.to_string()))?;

        let prediction = self.constants.propagate(minutes)?;
        Ok(prediction.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conjunction::fixtures::{circular_orbit, epoch};

    #[test]
    fn builds_from_generated_elements() {
        let set = OrbitalElementSet::parse(&circular_orbit(11111, 51.6, 114.7, 0.0, 15.5)).unwrap();
        let sat = Satellite::from_element_set(&set).unwrap();
        assert_eq!(sat.norad_id(), 11111);
        assert_eq!(sat.name(), "OBJECT 11111");
    }

    #[test]
    fn low_earth_orbit_radius_and_altitude() {
        let set = OrbitalElementSet::parse(&circular_orbit(11111, 51.6, 114.7, 0.0, 15.5)).unwrap();
        let sat = Satellite::from_element_set(&set).unwrap();

        let pos = sat.position_at(epoch()).unwrap();
        let radius = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        assert!(radius > 6700.0 && radius < 6850.0, "radius {}", radius);

        let point = sat.subpoint_at(epoch()).unwrap();
        assert!(point.altitude_m > 300_000.0 && point.altitude_m < 500_000.0);
        assert!(point.latitude_deg.abs() <= 51.7);
        assert!((-180.0..=180.0).contains(&point.longitude_deg));
    }

    #[test]
    fn corrupted_checksum_is_malformed() {
        let text = circular_orbit(11111, 51.6, 114.7, 0.0, 15.5);
        let mut lines: Vec<String> = text.lines().map(String::from).collect();
        let last = lines[2].pop().unwrap();
        let wrong = (last.to_digit(10).unwrap() + 1) % 10;
        lines[2].push_str(&wrong.to_string());

        let set = OrbitalElementSet::parse(&lines.join("\n")).unwrap();
        let err = Satellite::from_element_set(&set).unwrap_err();
        assert!(matches!(err, ConjunctionError::MalformedElementSet(_)));
    }

    #[test]
    fn garbage_lines_are_malformed() {
        let set = OrbitalElementSet::parse("hello\nworld").unwrap();
        let err = Satellite::from_element_set(&set).unwrap_err();
        assert!(matches!(err, ConjunctionError::MalformedElementSet(_)));
    }
}
