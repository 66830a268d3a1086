//! Numerical and physical parameters for nonbonded evaluation
//!
//! `Parameters` holds runtime settings:
//! - interaction cutoff distance and reaction-field dielectric,
//! - block size for spatial partitioning,
//! - the Lennard-Jones combining rule

use serde::Deserialize;

use crate::error::NbError;
use crate::nonbonded::states::{Particle, System};

#[derive(Debug, Clone)]
pub struct Parameters {
    pub cutoff: f64, // interaction cutoff distance
    pub rf_dielectric: f64, // reaction-field (solvent) dielectric constant
    pub block_size: usize, // particles per block, at most 32
    pub combining: CombiningRule, // default LJ parameter combination
}

impl Parameters {
    /// Check this parameter set against a system before evaluation.
    ///
    /// Under periodic boundary conditions the cutoff must not exceed half
    /// the shortest box edge, otherwise a particle could interact with two
    /// images of the same partner. Equality is allowed: the distance test
    /// is strict, so a pair at exactly half an edge is already outside the
    /// cutoff.
    pub fn validate(&self, sys: &System) -> Result<(), NbError> {
        if self.block_size == 0 || self.block_size > 32 {
            return Err(NbError::BlockSizeOutOfRange(self.block_size));
        }
        if let Some(cell) = &sys.cell {
            let limit = 0.5 * cell.extent.x.min(cell.extent.y).min(cell.extent.z);
            if self.cutoff > limit {
                return Err(NbError::CutoffTooLarge {
                    cutoff: self.cutoff,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Default combination of per-particle LJ parameters for a pair without an
/// exception entry. The rule is injected configuration, set by whoever owns
/// the parameter tables.
/// `combining: "lorentz-berthelot"` or `combining: "geometric"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombiningRule {
    #[serde(rename = "lorentz-berthelot")] // arithmetic mean sigma, geometric mean epsilon
    LorentzBerthelot,

    #[serde(rename = "geometric")] // geometric mean for both sigma and epsilon
    Geometric,
}

impl CombiningRule {
    /// Combined (chargeProduct, sigma, epsilon) for a default pair.
    /// The charge product is always `q_i * q_j`.
    pub fn combine(&self, a: &Particle, b: &Particle) -> (f64, f64, f64) {
        let q_prod = a.q * b.q;
        match self {
            Self::LorentzBerthelot => {
                (q_prod, 0.5 * (a.sigma + b.sigma), (a.eps * b.eps).sqrt())
            }
            Self::Geometric => (q_prod, (a.sigma * b.sigma).sqrt(), (a.eps * b.eps).sqrt()),
        }
    }
}
