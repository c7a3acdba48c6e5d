use std::collections::{BTreeSet, VecDeque};

use mapregions::map_file::MapData;
use mapregions::region::{GrowthState, RegionGrower};
use mapregions::{
    DecompositionParams, DemoSettings, Direction, Grid, Owner, Passability, RegionGraph, RegionId,
    Seed, Stronghold, Tile, TileClaimState, decompose, decompose_from_seeds, synth,
};
use rand::{Rng, SeedableRng};

fn synthetic(seed: u64) -> MapData {
    synth::generate_map(&DemoSettings {
        seed,
        width: 48,
        height: 40,
        strongholds: 5,
        ..DemoSettings::default()
    })
    .unwrap()
}

fn decompose_synthetic(seed: u64) -> (MapData, RegionGraph) {
    let map = synthetic(seed);
    let graph = decompose(&map.grid, &map.strongholds, &DecompositionParams::default()).unwrap();
    (map, graph)
}

/// Synthetic map whose coast tiles each lose one random entry direction
fn one_way_coasts(seed: u64) -> MapData {
    let map = synthetic(seed);
    let grid = &map.grid;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut tiles = grid.tiles().to_vec();
    for (index, tile) in tiles.iter_mut().enumerate() {
        if !tile.is_passable() {
            continue;
        }
        let coast = Direction::ALL.iter().any(|&direction| {
            grid.neighbor(index, direction).is_some_and(|next| {
                let other = grid.tile(next);
                other.is_passable() && other.is_water != tile.is_water
            })
        });
        if coast {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            tile.passable.remove(direction.bit());
        }
    }
    MapData {
        grid: Grid::new(grid.width(), grid.height(), tiles).unwrap(),
        strongholds: map.strongholds,
    }
}

fn assert_fully_covered(grid: &Grid, graph: &RegionGraph) {
    for (index, tile) in grid.tiles().iter().enumerate() {
        let claim = graph.claim(index).unwrap();
        if tile.is_passable() {
            let id = claim.region().expect("passable tile without region");
            assert_eq!(graph.region(id).unwrap().is_water(), tile.is_water);
        } else {
            assert_eq!(claim, TileClaimState::Blocked);
        }
    }
    let claimed: usize = graph.regions().iter().map(|r| r.tile_count()).sum();
    let passable = grid.tiles().iter().filter(|t| t.is_passable()).count();
    assert_eq!(claimed, passable);
}

/// Regions touching through a step allowed either way are neighbours of each other
fn assert_adjacency_symmetric(grid: &Grid, graph: &RegionGraph) {
    for index in 0..grid.tile_count() {
        let Some(here) = graph.region_at(index).unwrap() else {
            continue;
        };
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(index, direction) else {
                continue;
            };
            let Some(there) = graph.region_at(next).unwrap() else {
                continue;
            };
            let joined =
                grid.can_enter(next, direction) || grid.can_enter(index, direction.reflect());
            if here != there && joined {
                assert!(
                    graph.neighbors(here).unwrap().contains(&there),
                    "{here} misses {there} at tile {index}"
                );
                assert!(graph.neighbors(there).unwrap().contains(&here));
            }
        }
    }
}

fn assert_connected(grid: &Grid, graph: &RegionGraph) {
    for region in graph.regions() {
        let owned: BTreeSet<usize> = region.tiles().iter().copied().collect();
        let mut reached = BTreeSet::from([region.seed()]);
        let mut queue = VecDeque::from([region.seed()]);
        while let Some(index) = queue.pop_front() {
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(index, direction) else {
                    continue;
                };
                if owned.contains(&next) && grid.can_enter(next, direction) && reached.insert(next)
                {
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(reached, owned, "region {} is not connected", region.id());
    }
}

#[test]
fn single_seed_claims_open_square() {
    let grid = Grid::filled(3, 3, Tile::land()).unwrap();
    let graph = decompose_from_seeds(&grid, &[Seed::on(&grid, 4).unwrap()]).unwrap();

    assert_eq!(graph.len(), 1);
    let region = graph.region(RegionId(0)).unwrap();
    assert_eq!(region.tile_count(), 9);
    assert!(region.borders().is_empty());
    assert!(region.neighbors().is_empty());
}

#[test]
fn strip_splits_between_two_seeds() {
    let grid = Grid::filled(5, 1, Tile::land()).unwrap();
    let seeds = [Seed::on(&grid, 0).unwrap(), Seed::on(&grid, 4).unwrap()];
    let graph = decompose_from_seeds(&grid, &seeds).unwrap();

    let left = graph.region(RegionId(0)).unwrap();
    let right = graph.region(RegionId(1)).unwrap();
    assert_eq!(left.tiles(), &[0, 1, 2]);
    assert_eq!(right.tiles(), &[4, 3]);

    assert_eq!(left.borders().len(), 1);
    assert_eq!(left.borders()[0].index, 2);
    assert_eq!(left.borders()[0].neighbors, BTreeSet::from([RegionId(1)]));
    assert_eq!(right.borders().len(), 1);
    assert_eq!(right.borders()[0].index, 3);
    assert_eq!(right.borders()[0].neighbors, BTreeSet::from([RegionId(0)]));
    assert!(!left.borders()[0].is_coast);
}

#[test]
fn walled_pocket_gets_its_own_region() {
    let map = MapData::from_ascii(
        "..#..\n\
         ..#..\n\
         ..#..\n",
    )
    .unwrap();
    let graph = decompose_from_seeds(&map.grid, &[Seed::on(&map.grid, 0).unwrap()]).unwrap();

    assert_eq!(graph.len(), 2);
    assert!(!graph.claims().contains(&TileClaimState::Open));
    assert_eq!(graph.region(RegionId(0)).unwrap().tile_count(), 6);
    assert_eq!(graph.region(RegionId(1)).unwrap().tile_count(), 6);
    assert_eq!(graph.region_at(2).unwrap(), None);
    assert_eq!(graph.region_at(3).unwrap(), Some(RegionId(1)));
}

#[test]
fn land_region_never_enters_water() {
    let map = MapData::from_ascii(
        "...~~\n\
         ...~~\n",
    )
    .unwrap();
    let graph = decompose_from_seeds(&map.grid, &[Seed::on(&map.grid, 1).unwrap()]).unwrap();

    let land = graph.region(RegionId(0)).unwrap();
    assert!(!land.is_water());
    assert_eq!(land.tile_count(), 6);
    assert!(land.tiles().iter().all(|&i| !map.grid.tile(i).is_water));

    let water = graph.region_at(3).unwrap().unwrap();
    let water_region = graph.region(water).unwrap();
    assert!(water_region.is_water());
    assert!(land.neighbors().contains(&water));
    // The water pocket is grown last, so it records the shared border
    assert!(!water_region.borders().is_empty());
    assert!(water_region.borders().iter().all(|border| border.is_coast));
}

#[test]
fn all_blocked_grid_has_no_regions() {
    let grid = Grid::filled(4, 4, Tile::blocked()).unwrap();
    let graph = decompose(&grid, &[], &DecompositionParams::default()).unwrap();
    assert!(graph.is_empty());
    assert!(graph.claims().iter().all(|c| *c == TileClaimState::Blocked));
}

#[test]
fn stronghold_outside_grid_fails() {
    let grid = Grid::filled(4, 4, Tile::land()).unwrap();
    let strongholds = [Stronghold {
        index: 99,
        owner: Owner::Player(0),
    }];
    assert!(decompose(&grid, &strongholds, &DecompositionParams::default()).is_err());
}

#[test]
fn strongholds_seed_the_first_regions() {
    let map = MapData::from_ascii(&format!(
        "{}\n{}\n{}\n",
        ".".repeat(40),
        format!("0{}1", ".".repeat(38)),
        ".".repeat(40)
    ))
    .unwrap();
    let graph = decompose(&map.grid, &map.strongholds, &DecompositionParams::default()).unwrap();

    assert_eq!(graph.region(RegionId(0)).unwrap().seed(), map.grid.index_of(0, 2));
    assert_eq!(graph.region(RegionId(1)).unwrap().seed(), map.grid.index_of(39, 2));
}

#[test]
fn synthetic_maps_are_fully_covered() {
    for seed in 0..6 {
        let (map, graph) = decompose_synthetic(seed);
        assert_fully_covered(&map.grid, &graph);
    }
}

#[test]
fn synthetic_regions_are_connected() {
    for seed in 0..6 {
        let (map, graph) = decompose_synthetic(seed);
        assert_connected(&map.grid, &graph);
    }
}

#[test]
fn decomposition_is_deterministic() {
    for seed in [3, 17] {
        let (_, first) = decompose_synthetic(seed);
        let (_, second) = decompose_synthetic(seed);
        assert_eq!(first.id_map(), second.id_map());
        assert_eq!(first.summaries(), second.summaries());
        assert_eq!(first.border_detail(), second.border_detail());
    }
}

#[test]
fn adjacency_is_symmetric() {
    for seed in 0..6 {
        let (map, graph) = decompose_synthetic(seed);
        assert_adjacency_symmetric(&map.grid, &graph);
    }
}

#[test]
fn one_way_step_into_water_joins_regions() {
    let mut tiles = vec![Tile::land(), Tile::water()];
    tiles[0].passable = Passability::OPEN - Passability::RIGHT;
    tiles[1].passable = Passability::LEFT;
    let grid = Grid::new(2, 1, tiles).unwrap();
    let graph = decompose_from_seeds(&grid, &[Seed::on(&grid, 0).unwrap()]).unwrap();

    assert_eq!(graph.len(), 2);
    let land = graph.region_at(0).unwrap().unwrap();
    let water = graph.region_at(1).unwrap().unwrap();
    assert_eq!(graph.neighbors(land).unwrap(), &BTreeSet::from([water]));
    assert_eq!(graph.neighbors(water).unwrap(), &BTreeSet::from([land]));
}

#[test]
fn one_way_ridge_splits_land() {
    // Column 2 is entered from the left only and column 3 never from the
    // left, so growth from the right stops at column 3 and an orphan region
    // takes the rest.
    let mut tiles = vec![Tile::land(); 15];
    for y in 0..3 {
        tiles[y * 5 + 2].passable = Passability::LEFT;
        tiles[y * 5 + 3].passable = Passability::OPEN - Passability::LEFT;
    }
    let grid = Grid::new(5, 3, tiles).unwrap();
    let graph = decompose_from_seeds(&grid, &[Seed::on(&grid, 14).unwrap()]).unwrap();

    assert_fully_covered(&grid, &graph);
    assert_connected(&grid, &graph);
    assert_adjacency_symmetric(&grid, &graph);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.region(RegionId(0)).unwrap().tile_count(), 6);
    assert_eq!(graph.region_at(2).unwrap(), Some(RegionId(1)));
}

#[test]
fn one_way_coasts_keep_properties() {
    for seed in 0..6 {
        let map = one_way_coasts(seed);
        let graph =
            decompose(&map.grid, &map.strongholds, &DecompositionParams::default()).unwrap();
        assert_fully_covered(&map.grid, &graph);
        assert_connected(&map.grid, &graph);
        assert_adjacency_symmetric(&map.grid, &graph);
    }
}

#[test]
fn claims_are_never_rewritten() {
    let map = synthetic(9);
    let mut grower = RegionGrower::new(&map.grid);
    for stronghold in &map.strongholds {
        grower
            .plant(&Seed::on(&map.grid, stronghold.index).unwrap())
            .unwrap();
    }

    let mut previous = grower.claims().to_vec();
    while grower.ply() {
        for (before, after) in previous.iter().zip(grower.claims()) {
            if let TileClaimState::Claimed(id) = before {
                assert_eq!(after, &TileClaimState::Claimed(*id));
            }
        }
        previous = grower.claims().to_vec();
    }
    assert!(
        grower
            .regions()
            .iter()
            .all(|r| r.state() == GrowthState::Settled)
    );
}
