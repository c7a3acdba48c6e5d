use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Region, RegionId, TileClaimState};
use crate::error::{RegionError, RegionResult};
use crate::grid::Grid;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

/// Value carried by impassable tiles in [`RegionGraph::id_map`]
pub const BLOCKED_ID: u32 = u32::MAX;

/// Row of the region table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub id: u32,
    pub is_water: bool,
    pub tile_count: usize,
    pub seed: usize,
    pub neighbors: Vec<u32>,
}

/// Frozen result of a decomposition: the regions plus the owner of every tile
#[derive(Debug, Clone)]
pub struct RegionGraph {
    width: u32,
    height: u32,
    claims: Vec<TileClaimState>,
    regions: Vec<Region>,
}

impl RegionGraph {
    pub(super) fn assemble(
        grid: &Grid,
        claims: Vec<TileClaimState>,
        mut regions: Vec<Region>,
    ) -> Self {
        let mut links = Vec::new();
        for region in &regions {
            for border in &region.borders {
                links.extend(border.neighbors.iter().map(|&other| (region.id, other)));
            }
        }
        // Teleports join regions that do not touch
        for link in grid.links() {
            if let (Some(a), Some(b)) = (claims[link.from].region(), claims[link.to].region())
                && a != b
            {
                links.push((a, b));
            }
        }
        for (a, b) in links {
            regions[a.index()].neighbors.insert(b);
            regions[b.index()].neighbors.insert(a);
        }

        for region in &mut regions {
            region.objects = region
                .tiles
                .iter()
                .filter_map(|&index| grid.tile(index).object.map(|object| (index, object)))
                .collect();
        }

        debug_assert!(!claims.contains(&TileClaimState::Open));
        debug_assert_eq!(
            regions.iter().map(Region::tile_count).sum::<usize>(),
            claims.iter().filter(|c| c.region().is_some()).count()
        );

        Self {
            width: grid.width(),
            height: grid.height(),
            claims,
            regions,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> RegionResult<&Region> {
        self.regions
            .get(id.index())
            .ok_or(RegionError::UnknownRegion(id))
    }

    pub fn neighbors(&self, id: RegionId) -> RegionResult<&BTreeSet<RegionId>> {
        self.region(id).map(Region::neighbors)
    }

    #[must_use]
    pub fn claims(&self) -> &[TileClaimState] {
        &self.claims
    }

    pub fn claim(&self, index: usize) -> RegionResult<TileClaimState> {
        self.claims
            .get(index)
            .copied()
            .ok_or(RegionError::TileOutOfBounds {
                index,
                total: self.claims.len(),
            })
    }

    /// Owning region of a tile, `None` for impassable tiles
    pub fn region_at(&self, index: usize) -> RegionResult<Option<RegionId>> {
        self.claim(index).map(TileClaimState::region)
    }

    /// Per-tile region ids with [`BLOCKED_ID`] on impassable tiles
    #[must_use]
    pub fn id_map(&self) -> Vec<u32> {
        self.claims
            .iter()
            .map(|claim| claim.region().map_or(BLOCKED_ID, |id| id.0))
            .collect()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<RegionSummary> {
        self.regions
            .iter()
            .map(|region| RegionSummary {
                id: region.id.0,
                is_water: region.is_water,
                tile_count: region.tile_count(),
                seed: region.seed(),
                neighbors: region.neighbors.iter().map(|id| id.0).collect(),
            })
            .collect()
    }

    /// Every border tile with the foreign regions it touches
    #[must_use]
    pub fn border_detail(&self) -> BTreeMap<usize, BTreeSet<RegionId>> {
        let mut detail: BTreeMap<usize, BTreeSet<RegionId>> = BTreeMap::new();
        for border in self.regions.iter().flat_map(|region| &region.borders) {
            detail
                .entry(border.index)
                .or_default()
                .extend(border.neighbors.iter().copied());
        }
        detail
    }

    /// Region adjacency as an undirected petgraph graph, one node per region
    /// in id order.
    #[must_use]
    pub fn to_petgraph(&self) -> UnGraph<RegionId, ()> {
        let mut graph = UnGraph::with_capacity(self.regions.len(), 0);
        let nodes: HashMap<RegionId, NodeIndex> = self
            .regions
            .iter()
            .map(|region| (region.id, graph.add_node(region.id)))
            .collect();

        for region in &self.regions {
            for &other in region.neighbors.iter().filter(|&&other| other > region.id) {
                graph.add_edge(nodes[&region.id], nodes[&other], ());
            }
        }
        graph
    }
}
