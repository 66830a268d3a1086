//! Core state types for the nonbonded evaluation core.
//!
//! Defines the particle/system structs and the rectangular periodic cell:
//! - `Particle` / `System` using `NVec3`
//! - `PeriodicBox` implementing the minimum-image convention
//!
//! The system holds the particle list, the optional periodic cell, and the
//! per-pair exception table.

use nalgebra::Vector3;

use crate::error::NbError;
use crate::nonbonded::exceptions::ExceptionTable;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec3, // position
    pub q: f64, // partial charge
    pub sigma: f64, // Lennard-Jones sigma
    pub eps: f64, // Lennard-Jones epsilon
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>, // collection of particles
    pub cell: Option<PeriodicBox>, // None = non-periodic
    pub exceptions: ExceptionTable, // per-pair parameter overrides
}

impl System {
    /// Minimum-image displacement for this system.
    /// Identity when no periodic cell is present.
    pub fn min_image(&self, d: NVec3) -> NVec3 {
        match &self.cell {
            Some(cell) => cell.min_image(d),
            None => d,
        }
    }
}

/// Rectangular periodic cell described by its edge lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicBox {
    pub extent: NVec3, // edge lengths along x/y/z
}

impl PeriodicBox {
    pub fn new(extent: NVec3) -> Self {
        Self { extent }
    }

    /// Build a cell from three box vectors.
    ///
    /// Only rectangular cells are supported: every off-diagonal component
    /// must be zero and every diagonal component positive.
    pub fn from_vectors(vectors: [[f64; 3]; 3]) -> Result<Self, NbError> {
        for (row, v) in vectors.iter().enumerate() {
            for (col, &c) in v.iter().enumerate() {
                if row != col && c != 0.0 {
                    return Err(NbError::NonRectangularBox);
                }
            }
        }
        let extent = NVec3::new(vectors[0][0], vectors[1][1], vectors[2][2]);
        if extent.x <= 0.0 || extent.y <= 0.0 || extent.z <= 0.0 {
            return Err(NbError::DegenerateBox);
        }
        Ok(Self { extent })
    }

    /// Minimum-image displacement: per axis, subtract `round(d/edge) * edge`.
    ///
    /// `f64::round` resolves a tie at exactly half an edge away from zero;
    /// the same rule is used by every stage (partitioning, culling, flags,
    /// kernel) so behavior at the boundary is consistent throughout.
    pub fn min_image(&self, d: NVec3) -> NVec3 {
        NVec3::new(
            d.x - self.extent.x * (d.x / self.extent.x).round(),
            d.y - self.extent.y * (d.y / self.extent.y).round(),
            d.z - self.extent.z * (d.z / self.extent.z).round(),
        )
    }
}
