pub mod config;
pub mod error;
pub mod grid;
pub mod map_file;
pub mod profile;
pub mod region;
pub mod seed;
pub mod synth;

pub use config::{AnalysisConfig, DecompositionParams, DemoSettings, RenderSettings};
pub use error::{RegionError, RegionResult};
pub use grid::{Direction, Grid, Passability, Tile, TileLink};
pub use region::{Region, RegionGraph, RegionId, TileClaimState, decompose, decompose_from_seeds};
pub use seed::{Owner, Seed, SeedOrigin, Stronghold};
