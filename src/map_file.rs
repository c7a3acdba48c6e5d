//! Map input for the analysis
//!
//! Two formats are accepted:
//! - JSON documents (`.json`) mirroring [`MapDocument`]
//! - ASCII maps (any other extension), one character per tile:
//!
//! | char      | tile                                               |
//! |-----------|----------------------------------------------------|
//! | `.`       | open land                                          |
//! | `~`       | open water                                         |
//! | `#`       | impassable                                         |
//! | `0`-`9`   | open land with a stronghold of that player         |
//! | `N`       | open land with a neutral stronghold                |
//! | `@`       | open land teleporter, paired in reading order      |
//!
//! Lines starting with `;` are comments.

use std::fs;
use std::path::Path;

use crate::error::{RegionError, RegionResult};
use crate::grid::{Grid, Passability, Tile, TileLink};
use crate::seed::{Owner, Stronghold};
use serde::{Deserialize, Serialize};

/// One tile of a JSON map
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TileRecord {
    /// Raw passability mask, 0 = impassable
    #[serde(default)]
    pub passable: u8,
    #[serde(default)]
    pub water: bool,
    #[serde(default)]
    pub object: Option<u16>,
}

/// JSON map layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDocument {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileRecord>,
    #[serde(default)]
    pub strongholds: Vec<Stronghold>,
    #[serde(default)]
    pub links: Vec<TileLink>,
}

/// Everything the decomposition consumes
#[derive(Debug, Clone)]
pub struct MapData {
    pub grid: Grid,
    pub strongholds: Vec<Stronghold>,
}

impl MapData {
    /// Loads a map, picking the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> RegionResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_str(&contents)
        } else {
            Self::from_ascii(&contents)
        }
    }

    pub fn from_json_str(contents: &str) -> RegionResult<Self> {
        let document: MapDocument = serde_json::from_str(contents)?;
        Self::from_document(document)
    }

    pub fn from_document(document: MapDocument) -> RegionResult<Self> {
        let tiles = document
            .tiles
            .iter()
            .map(|record| Tile {
                passable: Passability::from_bits_retain(record.passable),
                is_water: record.water,
                object: record.object,
            })
            .collect();
        let grid = Grid::new(document.width, document.height, tiles)?.with_links(document.links)?;
        Ok(Self {
            grid,
            strongholds: document.strongholds,
        })
    }

    pub fn from_ascii(contents: &str) -> RegionResult<Self> {
        let rows: Vec<(usize, &str)> = contents
            .lines()
            .enumerate()
            .map(|(number, line)| (number + 1, line.trim_end()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with(';'))
            .collect();

        let width = rows.first().map_or(0, |(_, line)| line.chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut strongholds = Vec::new();
        let mut teleports = Vec::new();

        for &(number, line) in &rows {
            if line.chars().count() != width {
                return Err(RegionError::MapFormat {
                    line: number,
                    message: format!("expected {width} tiles per row"),
                });
            }
            for symbol in line.chars() {
                let index = tiles.len();
                let tile = match symbol {
                    '.' => Tile::land(),
                    '~' => Tile::water(),
                    '#' => Tile::blocked(),
                    '@' => {
                        teleports.push(index);
                        Tile::land()
                    }
                    'N' => {
                        strongholds.push(Stronghold {
                            index,
                            owner: Owner::Neutral,
                        });
                        Tile::land()
                    }
                    digit @ '0'..='9' => {
                        strongholds.push(Stronghold {
                            index,
                            owner: Owner::Player(digit as u8 - b'0'),
                        });
                        Tile::land()
                    }
                    other => {
                        return Err(RegionError::MapFormat {
                            line: number,
                            message: format!("unknown tile symbol {other:?}"),
                        });
                    }
                };
                tiles.push(tile);
            }
        }

        if teleports.len() % 2 != 0 {
            return Err(RegionError::MapFormat {
                line: rows.last().map_or(0, |(number, _)| *number),
                message: "teleporters must come in pairs".to_string(),
            });
        }
        let links = teleports
            .chunks_exact(2)
            .map(|pair| TileLink {
                from: pair[0],
                to: pair[1],
            })
            .collect();

        let grid = Grid::new(width as u32, rows.len() as u32, tiles)?.with_links(links)?;
        Ok(Self { grid, strongholds })
    }
}
