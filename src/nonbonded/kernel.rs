//! Pairwise reaction-field Coulomb + Lennard-Jones kernel
//!
//! Evaluates the energy and force of a single atom pair inside the cutoff,
//! and drives that per-pair math over a tile (block pair) with flag
//! pruning. Interactions truncated at the cutoff get the reaction-field
//! correction: a quadratic term approximating the dielectric response of
//! the medium beyond the cutoff sphere, plus a constant shift so the
//! energy goes to zero at the cutoff.

use crate::error::NbError;
use crate::nonbonded::blocks::BlockPartition;
use crate::nonbonded::params::Parameters;
use crate::nonbonded::states::{NVec3, System};
use crate::nonbonded::tiles::{InteractionFlags, Tile};

/// Coulomb constant ke in kJ mol⁻¹ nm e⁻²
pub const COULOMB_CONSTANT: f64 = 138.935485;

// Squared distance below which a non-excluded pair counts as coincident.
// Such a pair is a topology error, not something to clamp.
const COINCIDENT_DIST_SQ: f64 = 1e-12;

/// Reaction-field constants derived from the cutoff `rc` and the solvent
/// dielectric `eps_s`:
/// - `krf = (1/rc³) (eps_s - 1) / (2 eps_s + 1)`
/// - `crf = (1/rc) · 3 eps_s / (2 eps_s + 1)`
#[derive(Debug, Clone, Copy)]
pub struct ReactionField {
    pub krf: f64,
    pub crf: f64,
}

impl ReactionField {
    pub fn new(cutoff: f64, dielectric: f64) -> Self {
        let rc3 = cutoff * cutoff * cutoff;
        Self {
            krf: (1.0 / rc3) * (dielectric - 1.0) / (2.0 * dielectric + 1.0),
            crf: (1.0 / cutoff) * 3.0 * dielectric / (2.0 * dielectric + 1.0),
        }
    }
}

/// Energy and force magnitude of one pair at squared distance `r_sq`.
///
/// Coulomb (reaction field):
///   E = ke qq (1/r + krf r² - crf)
///   F = ke qq (1/r² - 2 krf r)
/// Lennard-Jones:
///   E = 4 eps [(sigma/r)¹² - (sigma/r)⁶]
///   F = 4 eps [12 (sigma/r)¹² - 6 (sigma/r)⁶] / r
///
/// The returned force magnitude is along the pair displacement: positive
/// pushes the two particles apart.
fn pair_energy_force(
    r_sq: f64,
    q_prod: f64,
    sigma: f64,
    eps: f64,
    rf: &ReactionField,
) -> (f64, f64) {
    let r = r_sq.sqrt();
    let inv_r = 1.0 / r;

    let coul_e = COULOMB_CONSTANT * q_prod * (inv_r + rf.krf * r_sq - rf.crf);
    let coul_f = COULOMB_CONSTANT * q_prod * (inv_r * inv_r - 2.0 * rf.krf * r);

    let (lj_e, lj_f) = if eps != 0.0 {
        let sr2 = (sigma * inv_r) * (sigma * inv_r);
        let sr6 = sr2 * sr2 * sr2;
        let sr12 = sr6 * sr6;
        (
            4.0 * eps * (sr12 - sr6),
            4.0 * eps * (12.0 * sr12 - 6.0 * sr6) * inv_r,
        )
    } else {
        (0.0, 0.0)
    };

    (coul_e + lj_e, coul_f + lj_f)
}

/// Evaluate one (i, j) pair and accumulate equal-and-opposite forces.
///
/// Order of operations, per the evaluation contract:
/// 1. wrapped displacement and squared distance; at or beyond the cutoff
///    the pair contributes nothing,
/// 2. exception lookup: a full exclusion contributes nothing, an override
///    replaces the combined defaults,
/// 3. pairs whose resolved parameters are all zero (inert padding-style
///    members) contribute nothing,
/// 4. a coincident pair that got this far is a fatal topology error.
///
/// Returns the pair's potential energy contribution.
pub(crate) fn accumulate_pair(
    i: usize,
    j: usize,
    sys: &System,
    params: &Parameters,
    rf: &ReactionField,
    cutoff_sq: f64,
    out: &mut [NVec3],
) -> Result<f64, NbError> {
    let pi = &sys.particles[i];
    let pj = &sys.particles[j];

    let d = sys.min_image(pj.x - pi.x);
    let r_sq = d.norm_squared();
    if r_sq >= cutoff_sq {
        return Ok(0.0);
    }

    let (q_prod, sigma, eps) = match sys.exceptions.get(i, j) {
        Some(e) => {
            if e.is_exclusion() {
                return Ok(0.0);
            }
            (e.charge_prod, e.sigma, e.eps)
        }
        None => params.combining.combine(pi, pj),
    };

    if q_prod == 0.0 && eps == 0.0 {
        return Ok(0.0);
    }

    if r_sq < COINCIDENT_DIST_SQ {
        return Err(NbError::CoincidentAtoms { i, j });
    }

    let (energy, f_mag) = pair_energy_force(r_sq, q_prod, sigma, eps, rf);

    // Newton's third law: push j along +d, i along -d
    let f = d * (f_mag / r_sq.sqrt());
    out[j] += f;
    out[i] -= f;

    Ok(energy)
}

/// Evaluate every surviving pair of one tile.
///
/// Atoms of the y block whose flag bit is set are skipped outright; every
/// other pair gets the full distance test. On the diagonal tile each
/// unordered pair (i < j within the block) is visited exactly once and no
/// atom is paired with itself.
pub(crate) fn evaluate_tile(
    tile: &Tile,
    flags: &InteractionFlags,
    partition: &BlockPartition,
    sys: &System,
    params: &Parameters,
    rf: &ReactionField,
    out: &mut [NVec3],
) -> Result<f64, NbError> {
    let cutoff_sq = params.cutoff * params.cutoff;
    let x_range = partition.block_range(tile.x as usize);
    let y_range = partition.block_range(tile.y as usize);
    let diagonal = tile.x == tile.y;

    let mut energy = 0.0;

    for (slot, j) in y_range.enumerate() {
        if flags.is_skip(slot) {
            continue;
        }

        // Diagonal tiles pair each i < j once; off-diagonal tiles pair the
        // full x block against atom j (the blocks are disjoint)
        let i_end = if diagonal { j } else { x_range.end };

        for i in x_range.start..i_end {
            energy += accumulate_pair(i, j, sys, params, rf, cutoff_sq, out)?;
        }
    }

    Ok(energy)
}
