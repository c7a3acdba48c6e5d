pub mod graph;
pub mod grower;
pub mod orphan;
pub mod png;

use std::collections::BTreeSet;
use std::fmt;

use crate::config::DecompositionParams;
use crate::error::RegionResult;
use crate::grid::Grid;
use crate::profile::profile_obstacles;
use crate::seed::{Seed, SeedOrigin, Stronghold, select_seeds};
use serde::{Deserialize, Serialize};

pub use graph::{RegionGraph, RegionSummary};
pub use grower::RegionGrower;

/// Dense region identifier, the position of the region in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl RegionId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Traversal state of a tile, kept apart from the region id itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileClaimState {
    /// Impassable, never part of a region
    #[default]
    Blocked,
    /// Passable and not yet claimed
    Open,
    Claimed(RegionId),
}

impl TileClaimState {
    #[must_use]
    pub fn region(self) -> Option<RegionId> {
        match self {
            TileClaimState::Claimed(id) => Some(id),
            _ => None,
        }
    }
}

/// Growth phase of a region. `Settled` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    Growing,
    Settled,
}

/// Region tile touching at least one foreign region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderNode {
    pub index: usize,
    pub neighbors: BTreeSet<RegionId>,
    /// One of the touched regions is of the other water/land type
    pub is_coast: bool,
}

/// Contiguous set of tiles of one water/land type grown from a single seed
#[derive(Debug, Clone)]
pub struct Region {
    pub(crate) id: RegionId,
    pub(crate) is_water: bool,
    pub(crate) origin: SeedOrigin,
    /// Claim order, never reordered
    pub(crate) tiles: Vec<usize>,
    /// Tiles before the cursor had their neighbours examined
    pub(crate) frontier: usize,
    pub(crate) borders: Vec<BorderNode>,
    pub(crate) neighbors: BTreeSet<RegionId>,
    pub(crate) objects: Vec<(usize, u16)>,
}

impl Region {
    pub(crate) fn new(id: RegionId, seed: &Seed) -> Self {
        Self {
            id,
            is_water: seed.is_water,
            origin: seed.origin,
            tiles: vec![seed.index],
            frontier: 0,
            borders: Vec::new(),
            neighbors: BTreeSet::new(),
            objects: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> RegionId {
        self.id
    }

    #[must_use]
    pub fn is_water(&self) -> bool {
        self.is_water
    }

    #[must_use]
    pub fn origin(&self) -> SeedOrigin {
        self.origin
    }

    /// Seed tile, always the first claimed
    #[must_use]
    pub fn seed(&self) -> usize {
        self.tiles[0]
    }

    #[must_use]
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn borders(&self) -> &[BorderNode] {
        &self.borders
    }

    /// Adjacent regions, symmetric across the graph
    #[must_use]
    pub fn neighbors(&self) -> &BTreeSet<RegionId> {
        &self.neighbors
    }

    /// `(tile, object)` pairs for tiles carrying an action object
    #[must_use]
    pub fn objects(&self) -> &[(usize, u16)] {
        &self.objects
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn state(&self) -> GrowthState {
        if self.frontier < self.tiles.len() {
            GrowthState::Growing
        } else {
            GrowthState::Settled
        }
    }

    /// Share of owned tiles matching `predicate`, e.g. tiles under fog for
    /// some player.
    pub fn coverage(&self, predicate: impl Fn(usize) -> bool) -> f64 {
        let matching = self.tiles.iter().filter(|&&index| predicate(index)).count();
        matching as f64 / self.tiles.len() as f64
    }
}

/// Decomposes `grid` into regions seeded from `strongholds` plus fill seeds
pub fn decompose(
    grid: &Grid,
    strongholds: &[Stronghold],
    params: &DecompositionParams,
) -> RegionResult<RegionGraph> {
    let profile = profile_obstacles(grid);
    let seeds = select_seeds(grid, &profile, strongholds, params)?;
    decompose_from_seeds(grid, &seeds)
}

/// Decomposes `grid` from an explicit ordered seed list.
///
/// Seed order breaks ties between regions reaching the same tile in the
/// same ply.
pub fn decompose_from_seeds(grid: &Grid, seeds: &[Seed]) -> RegionResult<RegionGraph> {
    let mut grower = RegionGrower::new(grid);
    for seed in seeds {
        grower.plant(seed)?;
    }
    grower.grow();
    grower.fill_orphans();
    Ok(grower.finish())
}
