#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A streamed, procedurally generated voxel terrain engine.
//!
//! The world is split into 16x16x16 chunks laid out on an infinite horizontal
//! grid. Chunks are generated from 2D simplex noise on demand as the camera
//! moves, meshed into textured quads with per-vertex ambient occlusion, and
//! culled against the camera's distance and view frustum every frame.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration with validated defaults
//! * `error` - Error types for configuration and block registration
//! * `engine_state` - The frame driver together with its camera, meshing and voxel modules
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::{EngineState, WorldConfig};
//!
//! let config = WorldConfig { initial_radius: 0, view_distance: 1, ..WorldConfig::default() };
//! let mut engine = EngineState::new(&config).unwrap();
//! let report = engine.frame();
//! assert_eq!(report.frame, 1);
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunks are stored in a hash map keyed by their grid coordinate
//! * Only faces bordering transparent blocks are emitted
//! * Generation is rate limited by a pluggable [`GenerationPolicy`]

use log::info;

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::{CameraConfig, GenerationConfig, WorldConfig};
pub use engine_state::camera_state::camera::{Camera, Projection};
pub use engine_state::camera_state::frustum::{Aabb, Frustum, Plane};
pub use engine_state::camera_state::{CameraState, CameraView};
pub use engine_state::rendering::meshing::{ChunkMeshes, Mesh, MeshBuilder};
pub use engine_state::rendering::Vertex;
pub use engine_state::voxels::block::block_side::BlockSide;
pub use engine_state::voxels::block::block_type::BlockType;
pub use engine_state::voxels::block::{AtlasLayout, BlockRegistry, UvRect};
pub use engine_state::voxels::chunk::{
    BlockSource, Chunk, ChunkCoord, TerrainGenerator, CHUNK_HEIGHT, CHUNK_SIZE,
};
pub use engine_state::voxels::scheduling::{
    GenerationPolicy, PerTickBudget, TimeSliceBudget, Unthrottled,
};
pub use engine_state::voxels::world::{DrawItem, RenderPass, Visibility, World};
pub use engine_state::{EngineState, FrameReport};
pub use error::{ConfigError, RegistryError, WorldError};

/// Installs the stdout logger, filtered by `RUST_LOG`.
///
/// Calling it more than once is harmless; later calls leave the first logger in place.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if installed {
        info!("Logger initialized");
    }
}
