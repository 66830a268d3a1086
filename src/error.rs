//! Error types for nbsim.
//!
//! Every variant is fatal for the evaluation call that raised it: the call
//! returns the error and no partial force or energy accumulation is exposed
//! to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbError {
    #[error("force buffer holds {buffer} entries but the system has {particles} particles")]
    CountMismatch { buffer: usize, particles: usize },

    #[error("periodic box vectors are not rectangular")]
    NonRectangularBox,

    #[error("periodic box edge lengths must be positive")]
    DegenerateBox,

    #[error("cutoff {cutoff} must not exceed half the shortest box edge ({limit})")]
    CutoffTooLarge { cutoff: f64, limit: f64 },

    #[error("block size {0} outside the supported range 1..=32")]
    BlockSizeOutOfRange(usize),

    #[error("particles {i} and {j} are coincident and not excluded")]
    CoincidentAtoms { i: usize, j: usize },

    #[error("evaluation produced a non-finite {0}")]
    NonFinite(&'static str),
}

pub type Result<T> = std::result::Result<T, NbError>;
