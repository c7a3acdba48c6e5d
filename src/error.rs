//! Error types for region analysis

use crate::region::RegionId;
use thiserror::Error;

/// Errors that can occur while decomposing a map into regions
#[derive(Debug, Error)]
pub enum RegionError {
    /// The grid has a zero dimension
    #[error("empty grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// The tile vector does not match the grid dimensions
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    /// A stronghold anchor lies outside the grid
    #[error("stronghold anchor {index} is outside a grid of {total} tiles")]
    StrongholdOutOfBounds { index: usize, total: usize },

    /// A seed cannot start a region on the requested tile
    #[error("invalid seed at tile {index}: {reason}")]
    InvalidSeed { index: usize, reason: &'static str },

    /// The region id does not belong to this graph
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    /// A tile index outside the grid was queried
    #[error("tile {index} is outside a grid of {total} tiles")]
    TileOutOfBounds { index: usize, total: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A map file could not be interpreted
    #[error("map format error at line {line}: {message}")]
    MapFormat { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
