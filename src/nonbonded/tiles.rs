//! # Tile culling and interaction flags
//!
//! This module implements the **bounding-volume culling** stage that keeps
//! the pairwise kernel away from block pairs which cannot possibly hold an
//! interaction. The goal is to replace the naive `O(N²)` pair sweep with a
//! much smaller set of candidate tiles while never losing a true pair.
//!
//! ## Core concepts
//!
//! A *tile* is an unordered pair of blocks (x, y) with x >= y. For every
//! tile we ask a cheap question first: can the bounding boxes of the two
//! blocks come within the cutoff of each other?
//!
//! - If not, no atom pair inside the tile can interact and the whole tile
//!   is dropped before any per-atom work happens.
//! - If yes, the tile becomes a candidate and a second, finer filter runs:
//!   for each atom of the y block, test its distance to the x block's
//!   bounding box and flag the atom when even the box (which contains every
//!   x atom) is beyond the cutoff.
//!
//! Both tests are conservative by construction. A false positive only costs
//! the kernel a few wasted distance tests; a false negative would silently
//! drop interactions, so tightness of the block bounds (see `blocks`) is
//! what keeps the scheme sound. The kernel never trusts a clear flag as
//! proof of interaction: it still runs the true per-pair distance test.

use crate::nonbonded::blocks::BlockPartition;
use crate::nonbonded::params::Parameters;
use crate::nonbonded::states::{NVec3, System};

/// A candidate pair of blocks, x >= y.
/// The diagonal tile (x == y) covers intra-block pairs and is always a
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
}

impl Tile {
    /// Packed ordering key for this tile. The packing is a convenience for
    /// sorting and identity checks only; nothing decodes it back.
    pub fn key(&self) -> u64 {
        (u64::from(self.x) << 32) | u64::from(self.y)
    }
}

/// Per-tile skip mask over the y block's slots, one bit per slot.
///
/// A set bit is a sound guarantee: that y atom is beyond the cutoff from
/// the whole of block x (or the slot is vacant) and the kernel may skip it
/// outright. A clear bit promises nothing; every pair still gets a real
/// distance test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags(u32);

impl InteractionFlags {
    pub fn mark_skip(&mut self, slot: usize) {
        self.0 |= 1 << slot;
    }

    pub fn is_skip(&self, slot: usize) -> bool {
        (self.0 >> slot) & 1 == 1
    }
}

/// Squared separation between two boxes after shrinking the center
/// displacement by both half-extents, clamped at zero per axis. Boxes that
/// already overlap on an axis contribute nothing on that axis.
fn box_separation_sq(d: NVec3, half_a: &NVec3, half_b: &NVec3) -> f64 {
    let sx = (d.x.abs() - half_a.x - half_b.x).max(0.0);
    let sy = (d.y.abs() - half_a.y - half_b.y).max(0.0);
    let sz = (d.z.abs() - half_a.z - half_b.z).max(0.0);
    sx * sx + sy * sy + sz * sz
}

/// Squared separation between a point and a single box, same clamping.
fn point_box_separation_sq(d: NVec3, half: &NVec3) -> f64 {
    let sx = (d.x.abs() - half.x).max(0.0);
    let sy = (d.y.abs() - half.y).max(0.0);
    let sz = (d.z.abs() - half.z).max(0.0);
    sx * sx + sy * sy + sz * sz
}

/// Scan every unordered block pair and keep the candidates.
///
/// A tile survives when the clamped box-to-box separation is below the
/// cutoff. The scan order (outer x ascending, inner y ascending) makes the
/// resulting list deterministic for a given partition.
///
/// # Parameters
/// - `partition`: block bounds computed from current positions.
/// - `sys`      : system providing the wrap convention.
/// - `cutoff`   : interaction cutoff distance.
///
/// # Returns
/// The compacted candidate tile list, diagonal tiles included.
pub fn find_interacting_tiles(
    partition: &BlockPartition,
    sys: &System,
    cutoff: f64,
) -> Vec<Tile> {
    let cutoff_sq = cutoff * cutoff;
    let m = partition.n_blocks();
    let mut tiles = Vec::new();

    for x in 0..m {
        for y in 0..=x {
            if x == y {
                // A block always interacts with itself
                tiles.push(Tile {
                    x: x as u32,
                    y: y as u32,
                });
                continue;
            }

            let bx = &partition.bounds[x];
            let by = &partition.bounds[y];
            let d = sys.min_image(bx.center - by.center);

            if box_separation_sq(d, &bx.half_extent, &by.half_extent) < cutoff_sq {
                tiles.push(Tile {
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
    }

    tiles
}

/// Compute the skip mask for every candidate tile.
///
/// For each atom j of the y block: wrap its displacement from block x's
/// center, shrink by block x's half-extent, and compare against the
/// cutoff. Failing that test proves j cannot reach any atom of block x, so
/// its bit is set. Vacant slots of a partial final block are always set.
pub fn compute_interaction_flags(
    tiles: &[Tile],
    partition: &BlockPartition,
    sys: &System,
    cutoff: f64,
) -> Vec<InteractionFlags> {
    let cutoff_sq = cutoff * cutoff;

    tiles
        .iter()
        .map(|tile| {
            let bx = &partition.bounds[tile.x as usize];
            let y_range = partition.block_range(tile.y as usize);
            let n_members = y_range.len();
            let mut flags = InteractionFlags::default();

            for (slot, j) in y_range.enumerate() {
                let d = sys.min_image(sys.particles[j].x - bx.center);
                if point_box_separation_sq(d, &bx.half_extent) >= cutoff_sq {
                    flags.mark_skip(slot);
                }
            }

            for slot in n_members..partition.block_size {
                flags.mark_skip(slot);
            }

            flags
        })
        .collect()
}

/// Cached candidate tile list together with the inputs it was built from.
///
/// The list stays valid while particle count, cutoff, block size, and cell
/// are unchanged, and is force-rebuilt after serving `rebuild_interval`
/// evaluations. Block bounds and flags are always recomputed per
/// evaluation; only the candidate list itself is reused, so the interval
/// bounds how far particle motion can outrun the cached culling decisions.
#[derive(Debug, Clone)]
pub struct TileCache {
    pub tiles: Vec<Tile>,
    n_particles: usize,
    block_size: usize,
    cutoff: f64,
    extent: Option<NVec3>,
    evals_served: u32,
}

impl TileCache {
    pub fn build(partition: &BlockPartition, sys: &System, params: &Parameters) -> Self {
        Self {
            tiles: find_interacting_tiles(partition, sys, params.cutoff),
            n_particles: sys.particles.len(),
            block_size: params.block_size,
            cutoff: params.cutoff,
            extent: sys.cell.as_ref().map(|c| c.extent),
            evals_served: 1,
        }
    }

    /// True while no invalidating change has happened since the build
    pub fn is_valid_for(&self, sys: &System, params: &Parameters) -> bool {
        self.n_particles == sys.particles.len()
            && self.block_size == params.block_size
            && self.cutoff == params.cutoff
            && self.extent == sys.cell.as_ref().map(|c| c.extent)
    }

    pub fn evals_served(&self) -> u32 {
        self.evals_served
    }

    pub fn serve(&mut self) {
        self.evals_served += 1;
    }
}

/// Reuse `cache` when allowed by the rebuild policy, otherwise rebuild it.
/// An interval of 1 rebuilds on every evaluation (the conservative
/// default); larger intervals trade staleness risk for rebuild cost.
pub fn refresh_tile_cache<'a>(
    cache: &'a mut Option<TileCache>,
    rebuild_interval: u32,
    partition: &BlockPartition,
    sys: &System,
    params: &Parameters,
) -> &'a TileCache {
    let reusable = matches!(
        &*cache,
        Some(c) if c.is_valid_for(sys, params) && c.evals_served() < rebuild_interval
    );

    if reusable {
        let c = cache.as_mut().unwrap();
        c.serve();
        c
    } else {
        cache.insert(TileCache::build(partition, sys, params))
    }
}
