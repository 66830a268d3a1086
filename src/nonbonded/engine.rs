//! High-level runtime engine settings
//!
//! Selects the evaluation backend and the tile-list rebuild cadence
//! used when building and running a `Scenario`

use crate::configuration::config::BackendConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub backend: BackendConfig, // direct, tiled, or tiled-parallel
    pub rebuild_interval: u32, // evaluations between tile-list rebuilds
}
