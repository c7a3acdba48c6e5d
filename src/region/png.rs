// src/region/png.rs
//! Region map rendering
//!
//! Every tile becomes a `scale × scale` block coloured by its region. Land
//! regions get green-ish colours, water regions blue ones, impassable tiles
//! stay dark. Colours come from a generator seeded with the region id, so the
//! same decomposition always renders the same image. Border nodes can be
//! shaded and seed tiles marked with a dot.

use std::collections::HashMap;

use super::RegionId;
use super::graph::{BLOCKED_ID, RegionGraph};
use crate::config::RenderSettings;
use crate::error::{RegionError, RegionResult};
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use rand::{Rng, SeedableRng};
use std::path::Path;

const BLOCKED_COLOR: [u8; 4] = [24, 22, 20, 255];
const SEED_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub struct RegionMap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>, // region id, BLOCKED_ID when impassable
}

impl RegionMap {
    #[must_use]
    pub fn from_graph(graph: &RegionGraph) -> Self {
        Self {
            width: graph.width(),
            height: graph.height(),
            data: graph.id_map(),
        }
    }

    fn region_colors(graph: &RegionGraph) -> HashMap<u32, [u8; 4]> {
        graph
            .regions()
            .iter()
            .map(|region| {
                let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(u64::from(region.id().0));
                let color = if region.is_water() {
                    [30, 60, rng.gen_range(120..220), 255]
                } else {
                    [
                        rng.gen_range(100..220),
                        rng.gen_range(120..255),
                        rng.gen_range(50..100),
                        255,
                    ]
                };
                (region.id().0, color)
            })
            .collect()
    }

    pub fn to_rgba_image(
        &self,
        graph: &RegionGraph,
        settings: &RenderSettings,
    ) -> RegionResult<RgbaImage> {
        let scale = settings.scale.max(1);
        let colors = Self::region_colors(graph);
        let borders = if settings.draw_borders {
            graph.border_detail()
        } else {
            Default::default()
        };

        let mut img: RgbaImage =
            ImageBuffer::from_pixel(self.width * scale, self.height * scale, Rgba(BLOCKED_COLOR));
        for (index, &rid) in self.data.iter().enumerate() {
            if rid == BLOCKED_ID {
                continue;
            }
            let mut color = colors
                .get(&rid)
                .copied()
                .ok_or(RegionError::UnknownRegion(RegionId(rid)))?;
            if borders.contains_key(&index) {
                // Shade border tiles to outline the regions
                for channel in &mut color[..3] {
                    *channel = (u16::from(*channel) * 3 / 5) as u8;
                }
            }
            let x = (index % self.width as usize) as u32 * scale;
            let y = (index / self.width as usize) as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x + dx, y + dy, Rgba(color));
                }
            }
        }

        if settings.draw_seeds {
            let radius = (scale / 3).max(1) as i32;
            for region in graph.regions() {
                let seed = region.seed();
                let cx = (seed % self.width as usize) as u32 * scale + scale / 2;
                let cy = (seed / self.width as usize) as u32 * scale + scale / 2;
                draw_filled_circle_mut(&mut img, (cx as i32, cy as i32), radius, SEED_COLOR);
            }
        }
        Ok(img)
    }

    pub fn save_as_png(
        &self,
        graph: &RegionGraph,
        settings: &RenderSettings,
        path: impl AsRef<Path>,
    ) -> RegionResult<()> {
        let img = self.to_rgba_image(graph, settings)?;
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Tile};
    use crate::region::decompose_from_seeds;
    use crate::seed::Seed;

    #[test]
    fn test_render_dimensions_and_colors() {
        let tiles = vec![Tile::land(), Tile::land(), Tile::blocked(), Tile::water()];
        let grid = Grid::new(4, 1, tiles).unwrap();
        let graph = decompose_from_seeds(&grid, &[Seed::on(&grid, 0).unwrap()]).unwrap();
        let map = RegionMap::from_graph(&graph);

        let settings = RenderSettings {
            scale: 3,
            draw_borders: false,
            draw_seeds: false,
        };
        let img = map.to_rgba_image(&graph, &settings).unwrap();
        assert_eq!(img.dimensions(), (12, 3));
        assert_eq!(img.get_pixel(7, 1), &Rgba(BLOCKED_COLOR));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(5, 2));
        // Water region is drawn in blue
        let water = img.get_pixel(10, 1);
        assert!(water[2] > water[0]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let grid = Grid::filled(6, 6, Tile::land()).unwrap();
        let seeds = [Seed::on(&grid, 0).unwrap(), Seed::on(&grid, 35).unwrap()];
        let graph = decompose_from_seeds(&grid, &seeds).unwrap();
        let map = RegionMap::from_graph(&graph);
        let settings = RenderSettings::default();
        let first = map.to_rgba_image(&graph, &settings).unwrap();
        let second = map.to_rgba_image(&graph, &settings).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
