//! # Errors
//!
//! Error types for the fallible startup work of the engine: loading configuration
//! and populating the block registry. Per-frame operations never fail; missing data
//! there degrades to defined substitute values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine_state::voxels::block::block_type::BlockType;

/// Failure to load or validate a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Failure to build the block registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No atlas entry registered for {0:?}")]
    MissingBlock(BlockType),
    #[error("Atlas {width}x{height} holds no {tile_size}px tile")]
    DegenerateAtlas {
        width: u32,
        height: u32,
        tile_size: u32,
    },
    #[error("Tile {tile} is outside the atlas ({tiles} tiles)")]
    TileOutOfRange { tile: u32, tiles: u32 },
}

/// Failure to create a [`World`](crate::engine_state::voxels::world::World).
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
