//! Configuration types for loading evaluation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of an
//! evaluation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – backend selection and tile-list rebuild cadence
//! - [`ParametersConfig`] – cutoff, dielectric, block size, combining rule
//! - [`ParticleConfig`]   – position and nonbonded parameters per particle
//! - [`ExceptionConfig`]  – per-pair overrides (exclusions, scaled 1-4 pairs)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example periodic scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   backend: "tiled"          # "direct", "tiled", or "tiled-parallel"
//!   rebuild_interval: 1       # rebuild the tile list every evaluation
//!
//! parameters:
//!   cutoff: 1.0               # interaction cutoff distance
//!   rf_dielectric: 78.3       # reaction-field dielectric
//!   block_size: 32            # particles per block (max 32)
//!   combining: "lorentz-berthelot"
//!
//! box_vectors:                # omit for a non-periodic system
//!   - [4.0, 0.0, 0.0]
//!   - [0.0, 4.0, 0.0]
//!   - [0.0, 0.0, 4.0]
//!
//! particles:
//!   - x: [0.0, 0.0, 0.0]
//!     q: 1.0
//!     sigma: 0.2
//!     eps: 0.1
//!   - x: [0.5, 0.0, 0.0]
//!     q: -1.0
//!     sigma: 0.2
//!     eps: 0.1
//!
//! exceptions:
//!   - i: 0                    # zero charge_prod + zero eps = full exclusion
//!     j: 1
//!     charge_prod: 0.0
//!     sigma: 0.2
//!     eps: 0.0
//! ```
//!
//! The engine then maps this configuration into its internal runtime
//! scenario representation.

use serde::Deserialize;

use crate::nonbonded::params::CombiningRule;

/// Which evaluation backend the engine runs
/// `backend: "direct"`, `"tiled"`, or `"tiled-parallel"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendConfig {
    #[serde(rename = "direct")] // reference all-pairs N² evaluation, no culling
    Direct,

    #[serde(rename = "tiled")] // block/tile culled evaluation, sequential over tiles
    Tiled,

    #[serde(rename = "tiled-parallel")] // block/tile culled evaluation, tiles fanned over a thread pool
    TiledParallel,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub backend: BackendConfig, // evaluation backend, fixed for the scenario's lifetime
    pub rebuild_interval: Option<u32>, // evaluations between tile-list rebuilds; default 1 (always)
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub cutoff: f64,           // interaction cutoff distance
    pub rf_dielectric: f64,    // reaction-field dielectric constant
    pub block_size: Option<usize>, // particles per block; default 32
    pub combining: Option<CombiningRule>, // default lorentz-berthelot
}

/// Configuration for a single particle
#[derive(Deserialize, Debug)]
pub struct ParticleConfig {
    pub x: Vec<f64>, // position in simulation units
    pub q: f64,      // partial charge
    pub sigma: f64,  // Lennard-Jones sigma
    pub eps: f64,    // Lennard-Jones epsilon
}

/// Per-pair override of the combined nonbonded parameters
#[derive(Deserialize, Debug)]
pub struct ExceptionConfig {
    pub i: usize,
    pub j: usize,
    pub charge_prod: f64, // replaces q_i * q_j
    pub sigma: f64,
    pub eps: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // backend selection and rebuild cadence
    pub parameters: ParametersConfig, // global numerical and physical parameters
    pub box_vectors: Option<[[f64; 3]; 3]>, // periodic cell; omit for non-periodic
    pub particles: Vec<ParticleConfig>, // particle list defining the system
    #[serde(default)]
    pub exceptions: Vec<ExceptionConfig>, // exclusions and scaled pairs
}
