//! Seed selection
//!
//! Seeds come from two sources, in this order:
//! 1. Strongholds, sorted by owner (neutral last) and then by tile index. Each
//!    one is snapped to the tile right below its anchor and kept only if it is
//!    at least `castle_spacing` away from every seed accepted so far, so tight
//!    stronghold clusters collapse onto one region.
//! 2. Fill seeds at the crossings of the most open rows and columns, water
//!    tables first and then land. They cover oceans and wide empty stretches
//!    with no stronghold and must be `fill_spacing` away from every seed.

use crate::config::DecompositionParams;
use crate::error::{RegionError, RegionResult};
use crate::grid::{Direction, Grid};
use crate::profile::ObstacleProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Stronghold owner. Players sort before `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player(u8),
    Neutral,
}

/// Stronghold anchor tile with its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stronghold {
    pub index: usize,
    pub owner: Owner,
}

/// Where a seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedOrigin {
    Stronghold(Owner),
    Fill,
    /// Supplied directly by the caller
    Manual,
    /// Planted on a pocket no other region reached
    Orphan,
}

/// Starting tile of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub index: usize,
    pub is_water: bool,
    pub origin: SeedOrigin,
}

impl Seed {
    /// Manual seed on `index`, taking its water flag from the grid
    pub fn on(grid: &Grid, index: usize) -> RegionResult<Self> {
        let tile = grid.get(index).ok_or(RegionError::InvalidSeed {
            index,
            reason: "outside the grid",
        })?;
        Ok(Self {
            index,
            is_water: tile.is_water,
            origin: SeedOrigin::Manual,
        })
    }
}

fn push_if_far_enough(grid: &Grid, seeds: &mut Vec<Seed>, seed: Seed, spacing: u32) -> bool {
    let far_enough = seeds
        .iter()
        .all(|other| grid.approximate_distance(other.index, seed.index) >= spacing);
    if far_enough {
        seeds.push(seed);
    }
    far_enough
}

/// Tile below the anchor when it exists and is passable, else the anchor
/// itself when passable.
fn snap_stronghold(grid: &Grid, anchor: usize) -> Option<usize> {
    let below = anchor + grid.width() as usize;
    [below, anchor]
        .into_iter()
        .filter(|&index| index < grid.tile_count())
        .find(|&index| grid.tile(index).is_passable())
}

/// The crossing tile itself when usable, otherwise its first usable
/// neighbour in [`Direction::ALL`] order.
fn fill_candidate(grid: &Grid, index: usize, water: bool) -> Option<usize> {
    let usable = |i: usize| {
        let tile = grid.tile(i);
        tile.is_passable() && tile.is_water == water
    };
    if usable(index) {
        return Some(index);
    }
    Direction::ALL
        .iter()
        .filter_map(|&direction| grid.neighbor(index, direction))
        .find(|&i| usable(i))
}

/// Picks the ordered seed list for `grid`
pub fn select_seeds(
    grid: &Grid,
    profile: &ObstacleProfile,
    strongholds: &[Stronghold],
    params: &DecompositionParams,
) -> RegionResult<Vec<Seed>> {
    params.validate()?;
    let total = grid.tile_count();
    if let Some(stronghold) = strongholds.iter().find(|s| s.index >= total) {
        return Err(RegionError::StrongholdOutOfBounds {
            index: stronghold.index,
            total,
        });
    }

    let mut ordered = strongholds.to_vec();
    ordered.sort_by_key(|s| (s.owner, s.index));

    let mut seeds = Vec::new();
    for stronghold in &ordered {
        let Some(index) = snap_stronghold(grid, stronghold.index) else {
            debug!(anchor = stronghold.index, "stronghold has no passable tile nearby");
            continue;
        };
        let seed = Seed {
            index,
            is_water: grid.tile(index).is_water,
            origin: SeedOrigin::Stronghold(stronghold.owner),
        };
        if !push_if_far_enough(grid, &mut seeds, seed, params.castle_spacing) {
            debug!(
                anchor = stronghold.index,
                "stronghold too close to an existing seed"
            );
        }
    }
    let stronghold_seeds = seeds.len();

    for water in [true, false] {
        let (rows, columns) = profile.open_lines(water, params.line_spacing);
        for &row in &rows {
            for &column in &columns {
                let crossing = grid.index_of(column, row);
                if let Some(index) = fill_candidate(grid, crossing, water) {
                    let seed = Seed {
                        index,
                        is_water: water,
                        origin: SeedOrigin::Fill,
                    };
                    push_if_far_enough(grid, &mut seeds, seed, params.fill_spacing);
                }
            }
        }
    }

    info!(
        strongholds = strongholds.len(),
        stronghold_seeds,
        fill_seeds = seeds.len() - stronghold_seeds,
        "seeds selected"
    );
    Ok(seeds)
}
