//! Row and column obstacle tables
//!
//! For land navigation a tile is an obstacle when it is impassable or water,
//! for water navigation when it is impassable or land. Each table is sorted
//! by ascending obstacle count so the most open lines come first. Ties keep
//! line order.

use crate::grid::{Grid, Tile};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Obstacle count of one row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCost {
    pub line: u32,
    pub obstacles: u32,
}

/// The four sorted line-cost tables of a grid
#[derive(Debug, Clone)]
pub struct ObstacleProfile {
    pub land_columns: Vec<LineCost>,
    pub land_rows: Vec<LineCost>,
    pub water_columns: Vec<LineCost>,
    pub water_rows: Vec<LineCost>,
}

impl ObstacleProfile {
    /// Most open `(rows, columns)` for water or land navigation, each line
    /// at least `spacing` away from the lines picked before it.
    #[must_use]
    pub fn open_lines(&self, water: bool, spacing: u32) -> (Vec<u32>, Vec<u32>) {
        let (rows, columns) = if water {
            (&self.water_rows, &self.water_columns)
        } else {
            (&self.land_rows, &self.land_columns)
        };
        (spread_lines(rows, spacing), spread_lines(columns, spacing))
    }
}

fn spread_lines(table: &[LineCost], spacing: u32) -> Vec<u32> {
    let mut picked: Vec<u32> = Vec::new();
    for cost in table {
        if picked.iter().all(|&line| line.abs_diff(cost.line) >= spacing) {
            picked.push(cost.line);
        }
    }
    picked
}

/// `(land, water)` obstacle counts along a line of tiles
fn count_line<'a>(tiles: impl Iterator<Item = &'a Tile>) -> (u32, u32) {
    tiles.fold((0, 0), |(land, water), tile| {
        if !tile.is_passable() {
            (land + 1, water + 1)
        } else if tile.is_water {
            (land + 1, water)
        } else {
            (land, water + 1)
        }
    })
}

fn row_counts(grid: &Grid) -> Vec<(u32, u32)> {
    let width = grid.width() as usize;
    let count_row = |y: u32| {
        let start = y as usize * width;
        count_line(grid.tiles()[start..start + width].iter())
    };
    #[cfg(feature = "parallel")]
    let counts: Vec<_> = (0..grid.height()).into_par_iter().map(count_row).collect();
    #[cfg(not(feature = "parallel"))]
    let counts: Vec<_> = (0..grid.height()).map(count_row).collect();
    counts
}

fn column_counts(grid: &Grid) -> Vec<(u32, u32)> {
    let width = grid.width() as usize;
    let count_column = |x: u32| count_line(grid.tiles().iter().skip(x as usize).step_by(width));
    #[cfg(feature = "parallel")]
    let counts: Vec<_> = (0..grid.width()).into_par_iter().map(count_column).collect();
    #[cfg(not(feature = "parallel"))]
    let counts: Vec<_> = (0..grid.width()).map(count_column).collect();
    counts
}

fn sorted_table(counts: &[(u32, u32)], water: bool) -> Vec<LineCost> {
    let mut table: Vec<LineCost> = counts
        .iter()
        .enumerate()
        .map(|(line, &(land, sea))| LineCost {
            line: line as u32,
            obstacles: if water { sea } else { land },
        })
        .collect();
    table.sort_by_key(|cost| cost.obstacles);
    table
}

/// Builds the land and water obstacle tables for `grid`
#[must_use]
pub fn profile_obstacles(grid: &Grid) -> ObstacleProfile {
    let rows = row_counts(grid);
    let columns = column_counts(grid);

    ObstacleProfile {
        land_columns: sorted_table(&columns, false),
        land_rows: sorted_table(&rows, false),
        water_columns: sorted_table(&columns, true),
        water_rows: sorted_table(&rows, true),
    }
}
