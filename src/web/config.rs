use serde::{Deserialize, Deserializer};
use std::time::Duration as StdDuration;
use thiserror::Error;

use crate::conjunction::SearchParams;
use crate::elements::CELESTRAK_GP_URL;
use crate::propagate::DEFAULT_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub elements: ElementsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementsConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: StdDuration,
    pub retries: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub retry_delay: StdDuration,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            base_url: CELESTRAK_GP_URL.to_string(),
            timeout: StdDuration::from_secs(10),
            retries: 2,
            retry_delay: StdDuration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub horizon: StdDuration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub coarse_step: StdDuration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub fine_step: StdDuration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub refine_half_width: StdDuration,
    pub track_points: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            horizon: to_std(params.horizon),
            coarse_step: to_std(params.coarse_step),
            fine_step: to_std(params.fine_step),
            refine_half_width: to_std(params.refine_half_width),
            track_points: params.track_points,
        }
    }
}

impl SearchConfig {
    pub fn params(&self) -> Result<SearchParams, ConfigError> {
        let convert = |name: &str, d: StdDuration| {
            chrono::Duration::from_std(d)
                .map_err(|e| ConfigError::Invalid(format!("search.{}: {}", name, e)))
        };
        Ok(SearchParams {
            horizon: convert("horizon", self.horizon)?,
            coarse_step: convert("coarse_step", self.coarse_step)?,
            fine_step: convert("fine_step", self.fine_step)?,
            refine_half_width: convert("refine_half_width", self.refine_half_width)?,
            track_points: self.track_points,
        })
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document means all defaults.
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let search = &self.search;

        if search.horizon.is_zero() || search.coarse_step.is_zero() || search.fine_step.is_zero() {
            return invalid("search durations must be positive");
        }
        if search.horizon < search.coarse_step {
            return invalid("search.horizon must be at least one coarse_step");
        }
        // The fine grid has to land on the coarse minimum's instant.
        if search.coarse_step.as_millis() % search.fine_step.as_millis() != 0 {
            return invalid("search.coarse_step must be a multiple of search.fine_step");
        }
        if search.refine_half_width.as_millis() % search.fine_step.as_millis() != 0 {
            return invalid("search.refine_half_width must be a multiple of search.fine_step");
        }
        if search.track_points == 0 {
            return invalid("search.track_points must be at least 1");
        }
        if self.cache.capacity == 0 {
            return invalid("cache.capacity must be at least 1");
        }
        if self.elements.retries == 0 {
            return invalid("elements.retries must be at least 1");
        }
        search.params().map(|_| ())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<StdDuration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

fn to_std(d: chrono::Duration) -> StdDuration {
    d.to_std().unwrap_or_default()
}
