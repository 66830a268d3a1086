pub mod nonbonded;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use nonbonded::states::{Particle, System, PeriodicBox, NVec3};
pub use nonbonded::params::{Parameters, CombiningRule};
pub use nonbonded::exceptions::{ExceptionParams, ExceptionTable};
pub use nonbonded::blocks::{BlockBounds, BlockPartition};
pub use nonbonded::tiles::{Tile, InteractionFlags, find_interacting_tiles, compute_interaction_flags};
pub use nonbonded::kernel::COULOMB_CONSTANT;
pub use nonbonded::forces::{ForceTerm, ForceSet, DirectNonbonded, TiledNonbonded, ParallelTiledNonbonded};
pub use nonbonded::scenario::Scenario;

pub use configuration::config::{BackendConfig, EngineConfig, ParametersConfig, ParticleConfig, ExceptionConfig, ScenarioConfig};

pub use error::NbError;

pub use benchmark::benchmark::{bench_nonbonded, bench_nonbonded_curve};
