//! # Terrain Generation
//!
//! Heightmap terrain driven by 2D coherent noise.
//!
//! Each world column `(x, z)` samples the noise at `(x, z) / smoothness`, maps the
//! result from `[-1, 1]` to `[0, 1]` and scales it by the chunk height to get the
//! column height `h`. Layers `0 .. h - 1` become dirt and layer `h - 1` grass.
//! Afterwards the water layer is filled wherever the column left it empty.
//!
//! The generator only ever reads absolute world coordinates, so regenerating a
//! chunk at the same lattice position reproduces identical voxels.

use std::fmt;

use noise::{NoiseFn, Simplex};

use super::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::config::WorldConfig;
use crate::engine_state::voxels::block::block_type::BlockType;

/// Fills chunks with terrain. Shared read-only by every chunk of a world.
pub struct TerrainGenerator {
    noise: Box<dyn NoiseFn<f64, 2> + Send + Sync>,
    smoothness: f64,
    water_height: i32,
}

impl fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("smoothness", &self.smoothness)
            .field("water_height", &self.water_height)
            .finish_non_exhaustive()
    }
}

impl TerrainGenerator {
    /// Creates a generator over seeded simplex noise.
    pub fn new(seed: u32, smoothness: f64, water_height: i32) -> Self {
        Self::with_noise(Simplex::new(seed), smoothness, water_height)
    }

    /// Creates the generator described by a world config.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.seed, config.noise_smoothness, config.water_height)
    }

    /// Creates a generator over any 2D noise function.
    ///
    /// # Arguments
    /// * `noise` - Sampled at scaled world coordinates, expected to return values in `[-1, 1]`
    /// * `smoothness` - World coordinates are divided by this before sampling
    /// * `water_height` - Layer back-filled with water
    pub fn with_noise<N>(noise: N, smoothness: f64, water_height: i32) -> Self
    where
        N: NoiseFn<f64, 2> + Send + Sync + 'static,
    {
        TerrainGenerator {
            noise: Box::new(noise),
            smoothness,
            water_height,
        }
    }

    pub fn water_height(&self) -> i32 {
        self.water_height
    }

    /// Height of the terrain column at a world position, in `0..=CHUNK_HEIGHT`.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let sample = self.noise.get([
            world_x as f64 / self.smoothness,
            world_z as f64 / self.smoothness,
        ]);
        let normalized = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
        ((normalized * CHUNK_HEIGHT as f64).floor() as i32).clamp(0, CHUNK_HEIGHT)
    }

    /// Whether the water layer lies inside a chunk's height.
    pub fn has_water_layer(&self) -> bool {
        (0..CHUNK_HEIGHT).contains(&self.water_height)
    }

    /// Writes terrain into every column of a chunk.
    ///
    /// A water layer outside the chunk's height is skipped.
    pub(super) fn fill(&self, chunk: &mut Chunk) {
        let (offset_x, offset_z) = chunk.position.origin();
        let fill_water = self.has_water_layer();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let height =
                    self.column_height(offset_x.saturating_add(x), offset_z.saturating_add(z));

                for y in 0..height {
                    let block_type = if y == height - 1 {
                        BlockType::Grass
                    } else {
                        BlockType::Dirt
                    };
                    chunk.set_block(x, y, z, block_type);
                }

                if fill_water && chunk.local_block(x, self.water_height, z) == BlockType::Empty {
                    chunk.set_block(x, self.water_height, z, BlockType::Water);
                }
            }
        }
    }
}
