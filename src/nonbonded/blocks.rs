//! Fixed-size block partition of the particle list
//!
//! Block membership is a pure function of particle index
//! (`index / block_size`), so it never changes between evaluations unless
//! the particle count does. Per block we store the tightest axis-aligned
//! bounding box of the members' wrapped displacements from the block's
//! first member, as a center plus half-extent pair. Tile culling relies on
//! these boxes being tight: a loose box only costs speed, but a box that
//! fails to contain a member would make culling unsound.

use std::ops::Range;

use crate::nonbonded::states::{NVec3, System};

/// Axis-aligned bounds of one block, in the wrapped frame of its members
#[derive(Debug, Clone)]
pub struct BlockBounds {
    pub center: NVec3,
    pub half_extent: NVec3, // componentwise non-negative
}

/// Partition of a system into contiguous fixed-size blocks with per-block
/// bounding volumes. Rebuilt whenever positions change.
#[derive(Debug, Clone)]
pub struct BlockPartition {
    pub block_size: usize,
    pub n_particles: usize,
    pub bounds: Vec<BlockBounds>,
}

impl BlockPartition {
    /// Compute bounds for every block of the system.
    ///
    /// Each member's displacement from the block's first member is wrapped
    /// through the minimum-image convention, so all members land in one
    /// consistent frame even when the block straddles a periodic boundary.
    /// The center is the midpoint of the componentwise min/max of those
    /// displacements; the half-extent is half their spread.
    pub fn build(sys: &System, block_size: usize) -> Self {
        let n = sys.particles.len();
        let n_blocks = n.div_ceil(block_size);
        let mut bounds = Vec::with_capacity(n_blocks);

        for b in 0..n_blocks {
            let start = b * block_size;
            let end = (start + block_size).min(n);

            // Reference frame: the first member. Its own displacement is
            // zero, so min/max can start from zero.
            let reference = sys.particles[start].x;
            let mut min = NVec3::zeros();
            let mut max = NVec3::zeros();

            for p in &sys.particles[start..end] {
                let d = sys.min_image(p.x - reference);

                min.x = min.x.min(d.x);
                min.y = min.y.min(d.y);
                min.z = min.z.min(d.z);

                max.x = max.x.max(d.x);
                max.y = max.y.max(d.y);
                max.z = max.z.max(d.z);
            }

            bounds.push(BlockBounds {
                center: reference + 0.5 * (min + max),
                half_extent: 0.5 * (max - min),
            });
        }

        Self {
            block_size,
            n_particles: n,
            bounds,
        }
    }

    pub fn n_blocks(&self) -> usize {
        self.bounds.len()
    }

    /// Particle index range of block `b`. The final block may hold fewer
    /// than `block_size` members; vacant trailing slots are not iterated.
    pub fn block_range(&self, b: usize) -> Range<usize> {
        let start = b * self.block_size;
        let end = (start + self.block_size).min(self.n_particles);
        start..end
    }
}
