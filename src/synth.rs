//! Synthetic maps for demos and tests
//!
//! Terrain comes from fractal OpenSimplex noise: water below `sea_level`,
//! impassable rock above `mountain_level`, open land in between. Strongholds
//! are scattered over open land with a seeded generator, so a given
//! [`DemoSettings`] always yields the same map.

use crate::config::DemoSettings;
use crate::error::{RegionError, RegionResult};
use crate::grid::{Grid, Tile};
use crate::map_file::MapData;
use crate::seed::{Owner, Stronghold};
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Players owning the scattered strongholds; the rest are neutral
const PLAYER_COUNT: u8 = 6;

pub fn generate_map(settings: &DemoSettings) -> RegionResult<MapData> {
    if settings.sea_level >= settings.mountain_level {
        return Err(RegionError::InvalidParameters(format!(
            "sea level {} must lie below mountain level {}",
            settings.sea_level, settings.mountain_level
        )));
    }

    let mut noise = FastNoiseLite::new();
    noise.set_seed(Some(settings.seed as i32));
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(4));
    noise.set_frequency(Some(0.04));

    let mut tiles = Vec::with_capacity(settings.width as usize * settings.height as usize);
    for y in 0..settings.height {
        for x in 0..settings.width {
            let value = noise.get_noise_2d(x as f32, y as f32);
            let tile = if value < settings.sea_level {
                Tile::water()
            } else if value > settings.mountain_level {
                Tile::blocked()
            } else {
                Tile::land()
            };
            tiles.push(tile);
        }
    }
    let grid = Grid::new(settings.width, settings.height, tiles)?;

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(settings.seed);
    let land: Vec<usize> = grid
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.is_passable() && !tile.is_water)
        .map(|(index, _)| index)
        .collect();
    let strongholds: Vec<Stronghold> = land
        .choose_multiple(&mut rng, settings.strongholds)
        .enumerate()
        .map(|(n, &index)| Stronghold {
            index,
            owner: match u8::try_from(n) {
                Ok(player) if player < PLAYER_COUNT && rng.gen_bool(0.8) => Owner::Player(player),
                _ => Owner::Neutral,
            },
        })
        .collect();

    debug!(
        width = settings.width,
        height = settings.height,
        land = land.len(),
        strongholds = strongholds.len(),
        "synthetic map generated"
    );
    Ok(MapData { grid, strongholds })
}
