//! Regions for pockets that competitive growth never reached

use super::grower::RegionGrower;
use super::TileClaimState;
use crate::seed::{Seed, SeedOrigin};
use tracing::{debug, info};

impl RegionGrower<'_> {
    /// Raster-scans the grid for tiles still open after growth and grows a
    /// dedicated region from each one. Returns the number of regions created.
    ///
    /// Afterwards every passable tile belongs to a region.
    pub fn fill_orphans(&mut self) -> usize {
        let mut created = 0;
        for index in 0..self.claims.len() {
            if self.claims[index] != TileClaimState::Open {
                continue;
            }
            let seed = Seed {
                index,
                is_water: self.grid.tile(index).is_water,
                origin: SeedOrigin::Orphan,
            };
            let id = self.start_region(&seed);
            self.settle(id.index());
            debug!(
                region = id.0,
                seed = index,
                tiles = self.regions[id.index()].tile_count(),
                "orphan region"
            );
            created += 1;
        }
        if created > 0 {
            info!(created, "filled unreachable pockets");
        }
        debug_assert!(!self.claims.contains(&TileClaimState::Open));
        created
    }
}
