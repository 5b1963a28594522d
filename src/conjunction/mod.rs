mod engine;
#[cfg(test)]
pub(crate) mod fixtures;
mod grid;
mod risk;
mod search;
mod tracks;
mod types;

pub use engine::ConjunctionEngine;
pub use risk::RiskLevel;
pub use types::{ConjunctionResult, SearchParams};
