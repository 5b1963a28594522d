use std::sync::Arc;

use crate::conjunction::ConjunctionEngine;
use crate::elements::ElementSource;
use crate::propagate::PropagatorCache;

use super::config::{Config, ConfigError};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConjunctionEngine>,
    pub elements: Arc<ElementSource>,
}

impl AppState {
    /// Builds the process-wide cache and element source once.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let params = config.search.params()?;
        let cache = Arc::new(PropagatorCache::new(config.cache.capacity));
        let elements = ElementSource::new(
            &config.elements.base_url,
            config.elements.timeout,
            config.elements.retries,
            config.elements.retry_delay,
        )
        .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))?;

        Ok(Self {
            engine: Arc::new(ConjunctionEngine::new(cache, params)),
            elements: Arc::new(elements),
        })
    }
}
