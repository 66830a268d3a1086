//! Build fully-initialized evaluation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with particles, cell, and exceptions)
//! - the active force set (`ForceSet`)

use crate::configuration::config::{BackendConfig, ParticleConfig, ScenarioConfig};
use crate::error::NbError;
use crate::nonbonded::engine::Engine;
use crate::nonbonded::exceptions::{ExceptionParams, ExceptionTable};
use crate::nonbonded::forces::{
    DirectNonbonded, ForceSet, ParallelTiledNonbonded, TiledNonbonded,
};
use crate::nonbonded::params::{CombiningRule, Parameters};
use crate::nonbonded::states::{NVec3, Particle, PeriodicBox, System};

/// A fully-initialized evaluation scenario.
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, system state, and the
/// force set with the selected backend registered. Callers drive it by
/// handing `forces.accumulate_forces` the system and parameters plus an
/// output buffer.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, NbError> {
        // Particles: map `ParticleConfig` -> runtime `Particle` using nalgebra vectors
        let particles: Vec<Particle> = cfg
            .particles
            .iter()
            .map(|pc: &ParticleConfig| Particle {
                x: NVec3::new(pc.x[0], pc.x[1], pc.x[2]),
                q: pc.q,
                sigma: pc.sigma,
                eps: pc.eps,
            })
            .collect();

        // Periodic cell, validated as rectangular
        let cell = match cfg.box_vectors {
            Some(vectors) => Some(PeriodicBox::from_vectors(vectors)?),
            None => None,
        };

        // Exceptions: exclusions and scaled pairs
        let mut exceptions = ExceptionTable::new();
        for e in &cfg.exceptions {
            exceptions.add(
                e.i,
                e.j,
                ExceptionParams {
                    charge_prod: e.charge_prod,
                    sigma: e.sigma,
                    eps: e.eps,
                },
            );
        }

        let system = System {
            particles,
            cell,
            exceptions,
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            cutoff: p_cfg.cutoff,
            rf_dielectric: p_cfg.rf_dielectric,
            block_size: p_cfg.block_size.unwrap_or(32),
            combining: p_cfg.combining.unwrap_or(CombiningRule::LorentzBerthelot),
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            backend: cfg.engine.backend,
            rebuild_interval: cfg.engine.rebuild_interval.unwrap_or(1),
        };

        // Forces: construct a ForceSet and register the selected backend
        let forces = match engine.backend {
            BackendConfig::Direct => ForceSet::new().with(DirectNonbonded),
            BackendConfig::Tiled => {
                ForceSet::new().with(TiledNonbonded::new(engine.rebuild_interval))
            }
            BackendConfig::TiledParallel => {
                ForceSet::new().with(ParallelTiledNonbonded::new(engine.rebuild_interval))
            }
        };

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }
}
