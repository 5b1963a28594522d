use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::elements::OrbitalElementSet;
use crate::error::ConjunctionError;
use crate::propagate::satellite::Satellite;

pub const DEFAULT_CAPACITY: usize = 128;

struct Entry {
    satellite: Arc<Satellite>,
    last_used: u64,
}

struct Lru {
    entries: HashMap<String, Entry>,
    clock: u64,
}

impl Lru {
    fn touch(&mut self, key: &str) -> Option<Arc<Satellite>> {
        self.clock += 1;
        let clock = self.clock;
        self.entries.get_mut(key).map(|entry| {
            entry.last_used = clock;
            entry.satellite.clone()
        })
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            log::debug!("Evicting propagator for {:?}", first_line(&key));
            self.entries.remove(&key);
        }
    }
}

/// Least-recently-used cache of built satellites, keyed by the exact element
/// text they were built from. Failed builds are never stored.
pub struct PropagatorCache {
    capacity: usize,
    inner: Mutex<Lru>,
}

impl PropagatorCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Lru {
                entries: HashMap::new(),
                clock: 0,
            }),
        }
    }

    pub fn get_or_build(&self, raw: &str) -> Result<Arc<Satellite>, ConjunctionError> {
        if let Some(satellite) = self.inner.lock().unwrap().touch(raw) {
            log::debug!("Propagator cache hit for {}", satellite.name());
            return Ok(satellite);
        }

        // Build outside the lock; a concurrent build of the same text just
        // loses the race below.
        let set = OrbitalElementSet::parse(raw)?;
        let built = Satellite::from_element_set(&set).inspect_err(|e| {
            log::debug!("Propagator build failed for {}: {}", set.name(), e);
        })?;

        let mut lru = self.inner.lock().unwrap();
        if let Some(existing) = lru.touch(raw) {
            return Ok(existing);
        }
        if lru.entries.len() >= self.capacity {
            lru.evict_oldest();
        }

        let satellite = Arc::new(built);
        let last_used = lru.clock;
        lru.entries.insert(
            set.raw().to_string(),
            Entry {
                satellite: satellite.clone(),
                last_used,
            },
        );
        log::debug!(
            "Propagator cache miss for {} (NORAD {}), {} cached",
            satellite.name(),
            satellite.norad_id(),
            lru.entries.len()
        );
        Ok(satellite)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn first_line(raw: &str) -> &str {
    raw.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conjunction::fixtures::{circular_orbit, epoch};
    use crate::propagate::Ephemeris;
    use chrono::Duration;
    use std::thread;

    fn orbit(catalog: u32) -> String {
        circular_orbit(catalog, 51.6, 114.7, 0.0, 15.5)
    }

    #[test]
    fn identical_text_reuses_satellite() {
        let cache = PropagatorCache::new(4);
        let a = cache.get_or_build(&orbit(10001)).unwrap();
        let b = cache.get_or_build(&orbit(10001)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn repeated_lookups_propagate_identically() {
        let cache = PropagatorCache::new(4);
        let at = epoch() + Duration::minutes(37);
        let first = cache.get_or_build(&orbit(10001)).unwrap().position_at(at).unwrap();

        let fresh = PropagatorCache::new(4);
        let second = fresh.get_or_build(&orbit(10001)).unwrap().position_at(at).unwrap();
        let third = cache.get_or_build(&orbit(10001)).unwrap().position_at(at).unwrap();

        for i in 0..3 {
            assert_eq!(first[i].to_bits(), second[i].to_bits());
            assert_eq!(first[i].to_bits(), third[i].to_bits());
        }
    }

    #[test]
    fn whitespace_changes_are_distinct_keys() {
        let cache = PropagatorCache::new(4);
        cache.get_or_build(&orbit(10001)).unwrap();
        cache.get_or_build(&format!("{}\n", orbit(10001))).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = PropagatorCache::new(2);
        let a = cache.get_or_build(&orbit(10001)).unwrap();
        cache.get_or_build(&orbit(10002)).unwrap();
        // Refresh the first entry so the second becomes the oldest.
        cache.get_or_build(&orbit(10001)).unwrap();
        cache.get_or_build(&orbit(10003)).unwrap();

        assert_eq!(cache.len(), 2);
        let again = cache.get_or_build(&orbit(10001)).unwrap();
        assert!(Arc::ptr_eq(&a, &again));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicted_satellite_stays_usable() {
        let cache = PropagatorCache::new(1);
        let held = cache.get_or_build(&orbit(10001)).unwrap();
        cache.get_or_build(&orbit(10002)).unwrap();
        assert!(held.position_at(epoch()).is_ok());
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = PropagatorCache::new(4);
        let err = cache.get_or_build("just one line").unwrap_err();
        assert!(matches!(err, ConjunctionError::MalformedElementSet(_)));
        let err = cache.get_or_build("bad\nline one\nline two").unwrap_err();
        assert!(matches!(err, ConjunctionError::MalformedElementSet(_)));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn concurrent_lookups_share_entries() {
        let cache = Arc::new(PropagatorCache::new(8));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for j in 0..4 {
                        cache.get_or_build(&orbit(20000 + (i + j) % 4)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
