//! Per-pair overrides of the combined nonbonded parameters
//!
//! Chemically bonded (1-2, 1-3) neighbor pairs are removed from the
//! interaction entirely; 1-4 neighbor pairs keep scaled-down parameters.
//! Both cases are expressed as an exception: an explicit
//! (chargeProduct, sigma, epsilon) triple replacing the combined defaults
//! for that pair. A zero charge product together with zero epsilon is a
//! full exclusion.

use std::collections::HashMap;

/// Override values for a single particle pair
#[derive(Debug, Clone, Copy)]
pub struct ExceptionParams {
    pub charge_prod: f64, // replaces q_i * q_j
    pub sigma: f64,
    pub eps: f64,
}

impl ExceptionParams {
    /// True when this entry removes the pair entirely
    pub fn is_exclusion(&self) -> bool {
        self.charge_prod == 0.0 && self.eps == 0.0
    }
}

/// Lookup table keyed by unordered particle-index pair.
/// Registering the same pair twice replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct ExceptionTable {
    entries: HashMap<(usize, usize), ExceptionParams>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, i: usize, j: usize, params: ExceptionParams) {
        self.entries.insert(Self::key(i, j), params);
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&ExceptionParams> {
        self.entries.get(&Self::key(i, j))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // (i, j) and (j, i) name the same pair
    fn key(i: usize, j: usize) -> (usize, usize) {
        if i <= j { (i, j) } else { (j, i) }
    }
}
