// src/region/grower.rs
//! Competitive region growth
//!
//! Every region grows breadth-first from its seed, but all regions advance
//! together: one ply processes, for each region still growing, exactly the
//! tiles that were on its frontier when the ply started. Tiles claimed during
//! the ply wait for the next one, so no region races ahead of the others and
//! contested ground splits evenly between nearby seeds. Ties inside a ply go
//! to the region planted first.
//!
//! Border nodes are recorded during the same neighbour scan: when an examined
//! tile touches a tile claimed by another region and a step between the two
//! is allowed in either direction, the examined tile is stored as a border
//! node of its own region. Claiming still needs the forward step.

use std::collections::BTreeSet;

use super::graph::RegionGraph;
use super::{BorderNode, GrowthState, Region, RegionId, TileClaimState};
use crate::error::{RegionError, RegionResult};
use crate::grid::{Direction, Grid};
use crate::seed::Seed;
use tracing::{info, trace};

/// Mutable decomposition state: tile claims plus the regions being grown
#[derive(Debug)]
pub struct RegionGrower<'a> {
    pub(super) grid: &'a Grid,
    pub(super) claims: Vec<TileClaimState>,
    pub(super) regions: Vec<Region>,
    plies: usize,
}

impl<'a> RegionGrower<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid) -> Self {
        let claims = grid
            .tiles()
            .iter()
            .map(|tile| {
                if tile.is_passable() {
                    TileClaimState::Open
                } else {
                    TileClaimState::Blocked
                }
            })
            .collect();
        Self {
            grid,
            claims,
            regions: Vec::new(),
            plies: 0,
        }
    }

    /// Starts a new region on `seed`. The seed tile must be open and of the
    /// seed's water/land type.
    pub fn plant(&mut self, seed: &Seed) -> RegionResult<RegionId> {
        let invalid = |reason| RegionError::InvalidSeed {
            index: seed.index,
            reason,
        };
        match self.claims.get(seed.index).copied() {
            None => Err(invalid("outside the grid")),
            Some(TileClaimState::Blocked) => Err(invalid("tile is impassable")),
            Some(TileClaimState::Claimed(_)) => Err(invalid("tile is already claimed")),
            Some(TileClaimState::Open) => {
                if self.grid.tile(seed.index).is_water != seed.is_water {
                    return Err(invalid("water flag does not match the tile"));
                }
                Ok(self.start_region(seed))
            }
        }
    }

    pub(super) fn start_region(&mut self, seed: &Seed) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        debug_assert_eq!(self.claims[seed.index], TileClaimState::Open);
        self.claims[seed.index] = TileClaimState::Claimed(id);
        self.regions.push(Region::new(id, seed));
        id
    }

    #[must_use]
    pub fn claims(&self) -> &[TileClaimState] {
        &self.claims
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Plies run so far
    #[must_use]
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Runs one ply over every growing region, in planting order. Returns
    /// whether any region is still growing afterwards.
    pub fn ply(&mut self) -> bool {
        let mut growing = false;
        for slot in 0..self.regions.len() {
            if self.regions[slot].state() == GrowthState::Settled {
                continue;
            }
            let end = self.regions[slot].tiles.len();
            self.expand(slot, end);
            if self.regions[slot].state() == GrowthState::Growing {
                growing = true;
            }
        }
        self.plies += 1;
        growing
    }

    /// Runs plies until every region is settled and returns how many ran
    pub fn grow(&mut self) -> usize {
        let start = self.plies;
        while self.ply() {
            trace!(ply = self.plies, "ply complete");
        }
        let plies = self.plies - start;
        info!(regions = self.regions.len(), plies, "region growth settled");
        plies
    }

    /// Examines the frontier of region `slot` up to tile position `end`
    pub(super) fn expand(&mut self, slot: usize, end: usize) {
        while self.regions[slot].frontier < end {
            let index = self.regions[slot].tiles[self.regions[slot].frontier];
            self.examine(slot, index);
            self.regions[slot].frontier += 1;
        }
        debug_assert!(self.regions[slot].frontier <= self.regions[slot].tiles.len());
    }

    /// Grows region `slot` alone until it settles
    pub(super) fn settle(&mut self, slot: usize) {
        while self.regions[slot].state() == GrowthState::Growing {
            let end = self.regions[slot].tiles.len();
            self.expand(slot, end);
        }
    }

    fn examine(&mut self, slot: usize, index: usize) {
        let id = self.regions[slot].id;
        let is_water = self.regions[slot].is_water;
        let mut foreign = BTreeSet::new();

        for direction in Direction::ALL {
            let Some(next) = self.grid.neighbor(index, direction) else {
                continue;
            };
            let forward = self.grid.can_enter(next, direction);
            match self.claims[next] {
                TileClaimState::Open if forward && self.grid.tile(next).is_water == is_water => {
                    self.claims[next] = TileClaimState::Claimed(id);
                    self.regions[slot].tiles.push(next);
                }
                // One-way edges still join the two regions
                TileClaimState::Claimed(other)
                    if other != id
                        && (forward || self.grid.can_enter(index, direction.reflect())) =>
                {
                    foreign.insert(other);
                }
                _ => {}
            }
        }

        if !foreign.is_empty() {
            let is_coast = foreign
                .iter()
                .any(|other| self.regions[other.index()].is_water != is_water);
            self.regions[slot].borders.push(BorderNode {
                index,
                neighbors: foreign,
                is_coast,
            });
        }
    }

    /// Freezes the decomposition
    #[must_use]
    pub fn finish(self) -> RegionGraph {
        RegionGraph::assemble(self.grid, self.claims, self.regions)
    }
}
