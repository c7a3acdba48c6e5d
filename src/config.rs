// src/config.rs
//! Region analysis configuration
//!
//! This module holds every parameter that steers the decomposition and its
//! tooling:
//! - Seed spacing for stronghold and fill seeds
//! - Rendering of the region map
//! - Synthetic demo maps for the CLI
//!
//! All structures deserialize from TOML, every field has a default.

use crate::error::{RegionError, RegionResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Spacing constants used by seed selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecompositionParams {
    /// Minimum approximate distance between two stronghold seeds.
    /// Strongholds closer than this collapse onto one region.
    #[serde(default = "default_castle_spacing")]
    pub castle_spacing: u32,

    /// Minimum distance between a fill seed and any accepted seed
    #[serde(default = "default_fill_spacing")]
    pub fill_spacing: u32,

    /// Minimum distance between two open lines picked from an obstacle table
    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,
}

fn default_castle_spacing() -> u32 {
    17
}
fn default_fill_spacing() -> u32 {
    18
}
fn default_line_spacing() -> u32 {
    7
}

impl Default for DecompositionParams {
    fn default() -> Self {
        Self {
            castle_spacing: 17,
            fill_spacing: 18,
            line_spacing: 7,
        }
    }
}

impl DecompositionParams {
    /// Rejects zero spacings, which would let two seeds share a tile.
    pub fn validate(&self) -> RegionResult<()> {
        for (name, value) in [
            ("castle_spacing", self.castle_spacing),
            ("fill_spacing", self.fill_spacing),
            ("line_spacing", self.line_spacing),
        ] {
            if value == 0 {
                return Err(RegionError::InvalidParameters(format!(
                    "{name} must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Region map rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Pixels per tile side
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Darken border nodes
    #[serde(default = "default_true")]
    pub draw_borders: bool,

    /// Mark each region's seed tile
    #[serde(default = "default_true")]
    pub draw_seeds: bool,
}

fn default_scale() -> u32 {
    8
}
fn default_true() -> bool {
    true
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 8,
            draw_borders: true,
            draw_seeds: true,
        }
    }
}

/// Synthetic map used by `--demo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Noise and placement seed
    #[serde(default)]
    pub seed: u64,

    #[serde(default = "default_demo_size")]
    pub width: u32,

    #[serde(default = "default_demo_size")]
    pub height: u32,

    /// Noise value below which a tile is water (noise is in -1.0..1.0)
    #[serde(default = "default_sea_level")]
    pub sea_level: f32,

    /// Noise value above which a tile is impassable
    #[serde(default = "default_mountain_level")]
    pub mountain_level: f32,

    /// Number of strongholds scattered over land
    #[serde(default = "default_strongholds")]
    pub strongholds: usize,
}

fn default_demo_size() -> u32 {
    72
}
fn default_sea_level() -> f32 {
    -0.15
}
fn default_mountain_level() -> f32 {
    0.55
}
fn default_strongholds() -> usize {
    6
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 72,
            height: 72,
            sea_level: -0.15,
            mountain_level: 0.55,
            strongholds: 6,
        }
    }
}

/// Full configuration file
///
/// # Example
/// ```toml
/// [regions]
/// castle_spacing = 12
///
/// [render]
/// scale = 4
///
/// [demo]
/// seed = 7
/// width = 108
/// height = 108
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub regions: DecompositionParams,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub demo: DemoSettings,
}

impl AnalysisConfig {
    /// Loads and validates a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> RegionResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> RegionResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.regions.validate()?;
        Ok(config)
    }
}
