//! Read-only tile grid consumed by the region analysis
//!
//! Each tile carries an 8-direction passability mask, a water/land flag and an
//! optional action-object tag. Tiles are addressed by linear index
//! `y * width + x`.
//!
//! A mask bit `d` on tile `B` means that `B` can be entered from its neighbour
//! lying in direction `d`. Moving from `A` to `B` in direction `d` therefore
//! checks `B.passable & d.reflect()`. A tile with an empty mask is impassable.

use crate::error::{RegionError, RegionResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Directional passability mask, bit order follows [`Direction::ALL`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Passability: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP = 1 << 1;
        const TOP_RIGHT = 1 << 2;
        const RIGHT = 1 << 3;
        const BOTTOM_RIGHT = 1 << 4;
        const BOTTOM = 1 << 5;
        const BOTTOM_LEFT = 1 << 6;
        const LEFT = 1 << 7;
    }
}

impl Passability {
    /// Enterable from every side
    pub const OPEN: Self = Self::all();

    /// Same mask turned by 180°
    #[must_use]
    pub fn reflect(self) -> Self {
        Self::from_bits_retain(self.bits().rotate_left(4))
    }

    #[must_use]
    pub fn is_blocked(self) -> bool {
        self.is_empty()
    }
}

/// The eight grid directions in fixed scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Direction {
    /// Scan order used everywhere a tile's neighbours are visited
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
    ];

    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::Left => (-1, 0),
        }
    }

    #[must_use]
    pub fn bit(self) -> Passability {
        Passability::from_bits_retain(1 << (self as u8))
    }

    #[must_use]
    pub fn reflect(self) -> Direction {
        Self::ALL[(self as usize + 4) % 8]
    }
}

/// Attributes of a single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub passable: Passability,
    pub is_water: bool,
    /// Action object standing on the tile (mine, shrine, teleporter...)
    pub object: Option<u16>,
}

impl Tile {
    #[must_use]
    pub fn land() -> Self {
        Self {
            passable: Passability::OPEN,
            is_water: false,
            object: None,
        }
    }

    #[must_use]
    pub fn water() -> Self {
        Self {
            passable: Passability::OPEN,
            is_water: true,
            object: None,
        }
    }

    #[must_use]
    pub fn blocked() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_object(mut self, object: u16) -> Self {
        self.object = Some(object);
        self
    }

    #[must_use]
    pub fn is_passable(&self) -> bool {
        !self.passable.is_blocked()
    }
}

/// Two tiles joined by a teleport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLink {
    pub from: usize,
    pub to: usize,
}

/// Rectangular tile grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    links: Vec<TileLink>,
}

impl Grid {
    /// Builds a grid, rejecting zero dimensions and a tile count that does not
    /// match `width * height`.
    pub fn new(width: u32, height: u32, tiles: Vec<Tile>) -> RegionResult<Self> {
        if width == 0 || height == 0 {
            return Err(RegionError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(RegionError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            links: Vec::new(),
        })
    }

    /// Grid of identical tiles
    pub fn filled(width: u32, height: u32, tile: Tile) -> RegionResult<Self> {
        Self::new(width, height, vec![tile; width as usize * height as usize])
    }

    /// Attaches teleport links; both ends must be inside the grid.
    pub fn with_links(mut self, links: Vec<TileLink>) -> RegionResult<Self> {
        let total = self.tile_count();
        for link in &links {
            for index in [link.from, link.to] {
                if index >= total {
                    return Err(RegionError::TileOutOfBounds { index, total });
                }
            }
        }
        self.links = links;
        Ok(self)
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
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`. Panics when out of range, like slice indexing.
    #[must_use]
    pub fn tile(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    #[must_use]
    pub fn links(&self) -> &[TileLink] {
        &self.links
    }

    #[must_use]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[must_use]
    pub fn position(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Index of the neighbour in `direction`, `None` past the grid edge.
    #[must_use]
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.position(index);
        let (dx, dy) = direction.offset();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
            return None;
        }
        Some(self.index_of(nx as u32, ny as u32))
    }

    /// Whether the tile at `to` accepts a move arriving in `direction`.
    #[must_use]
    pub fn can_enter(&self, to: usize, direction: Direction) -> bool {
        self.tiles[to].passable.contains(direction.reflect().bit())
    }

    #[must_use]
    pub fn approximate_distance(&self, a: usize, b: usize) -> u32 {
        approximate_distance(self.position(a), self.position(b))
    }
}

/// Distance in tiles where a diagonal step costs one and a half straight steps
#[must_use]
pub fn approximate_distance(a: (u32, u32), b: (u32, u32)) -> u32 {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    dx.max(dy) + dx.min(dy) / 2
}
