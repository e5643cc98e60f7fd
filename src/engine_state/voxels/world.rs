//! # World Module
//!
//! This module provides the `World` struct, the sole owner of every loaded chunk.
//!
//! ## Responsibilities
//!
//! - Resolving block queries in world coordinates across chunk borders
//! - Generating chunks on demand and keeping the meshes along their borders
//!   consistent with their neighbors
//! - Selecting the chunks a camera can see and ordering them for drawing
//!
//! ## Chunk Generation
//!
//! Generating a chunk changes which faces its four horizontal neighbors must
//! show along the shared borders, so every generation re-meshes those neighbors
//! as well. Reads never generate anything; generation is always an explicit
//! call, throttled during streaming by the world's [`GenerationPolicy`].
//!
//! ## Storage
//!
//! Chunks are kept in a hash map keyed by their lattice coordinate. Every
//! generated chunk stays resident.

use std::collections::HashMap;

use log::{debug, info};

use super::block::{block_type::BlockType, BlockRegistry};
use super::chunk::{BlockSource, Chunk, ChunkCoord, TerrainGenerator, CHUNK_HEIGHT, CHUNK_SIZE};
use super::scheduling::{policy_from_config, GenerationPolicy};
use crate::config::WorldConfig;
use crate::engine_state::camera_state::CameraView;
use crate::engine_state::rendering::meshing::{Mesh, MeshBuilder};
use crate::error::{ConfigError, WorldError};

/// Which pass of a frame a draw item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Opaque terrain, drawn first
    Opaque,
    /// Translucent water, drawn after all opaque geometry
    Water,
}

/// One mesh to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub pass: RenderPass,
    pub coord: ChunkCoord,
    /// Translation from chunk-local vertex positions to world space
    pub model_offset: [f32; 3],
    pub mesh: &'a Mesh,
    /// Changes whenever the chunk's meshes were rebuilt
    pub mesh_version: u64,
}

/// Outcome of one visibility pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Chunks to draw, in scan order
    pub visible: Vec<ChunkCoord>,
    /// Lattice cells inspected
    pub scanned: usize,
    /// Chunks generated during the pass
    pub generated: usize,
}

/// Represents a voxel world composed of chunks.
///
/// # Examples
///
/// ```
/// use voxel_world::{BlockType, ChunkCoord, World, WorldConfig};
///
/// let mut world = World::new(&WorldConfig::default()).unwrap();
/// world.generate_chunk(ChunkCoord::new(5, 5));
///
/// // Nothing is ever built below the world floor.
/// assert_eq!(world.get_block_at(80, -1, 80), BlockType::Empty);
/// ```
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    registry: BlockRegistry,
    policy: Box<dyn GenerationPolicy>,
    view_distance: i32,
    render_distance_squared: f32,
}

impl World {
    /// Creates a world as described by a config and generates its spawn area.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let registry = BlockRegistry::with_defaults(config.atlas)?;
        Self::with_parts(
            config,
            TerrainGenerator::from_config(config),
            registry,
            policy_from_config(&config.generation),
        )
    }

    /// Creates a world from explicitly provided collaborators.
    ///
    /// # Arguments
    /// * `config` - Supplies the view window, render distance and spawn radius
    /// * `generator` - Terrain source shared by every chunk
    /// * `registry` - Must hold an entry for every block type terrain can contain
    /// * `policy` - Throttles generation while streaming
    pub fn with_parts(
        config: &WorldConfig,
        generator: TerrainGenerator,
        registry: BlockRegistry,
        policy: Box<dyn GenerationPolicy>,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        if !generator.has_water_layer() {
            return Err(ConfigError::Invalid(format!(
                "generator water_height {} must lie in 0..{}",
                generator.water_height(),
                CHUNK_HEIGHT
            ))
            .into());
        }
        registry.ensure_registered(BlockType::ALL.into_iter().filter(|b| b.is_meshed()))?;

        let mut world = World {
            chunks: HashMap::new(),
            generator,
            registry,
            policy,
            view_distance: config.view_distance,
            render_distance_squared: config.render_distance_squared(),
        };
        world.spawn_area(config.initial_radius);

        info!(
            "World created with {} chunks (view distance {})",
            world.chunks.len(),
            world.view_distance
        );
        Ok(world)
    }

    /// Generates every chunk within `radius` of the origin, then meshes them.
    ///
    /// Meshing after all terrain exists builds each mesh once instead of
    /// re-meshing neighbors after every insertion.
    fn spawn_area(&mut self, radius: i32) {
        let mut spawned = Vec::new();
        for x in -radius..=radius {
            for z in -radius..=radius {
                let coord = ChunkCoord::new(x, z);
                if self.chunks.contains_key(&coord) {
                    continue;
                }
                let mut chunk = Chunk::new(coord);
                chunk.generate_terrain(&self.generator);
                self.chunks.insert(coord, chunk);
                spawned.push(coord);
            }
        }

        for coord in spawned {
            self.remesh(coord);
        }
    }

    /// Gets the block at world coordinates.
    ///
    /// Returns `Empty` where no chunk is loaded. Never generates a chunk.
    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        let coord = ChunkCoord::containing(x, z);
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.get_block(
                x.rem_euclid(CHUNK_SIZE),
                y,
                z.rem_euclid(CHUNK_SIZE),
                self,
            ),
            None => BlockType::Empty,
        }
    }

    /// Generates the chunk at a lattice position if it does not exist yet.
    ///
    /// The new chunk is meshed, and so is every loaded horizontal neighbor,
    /// since their border faces may now be hidden.
    ///
    /// # Returns
    /// `true` if a chunk was generated, `false` if one already existed.
    pub fn generate_chunk(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }

        let mut chunk = Chunk::new(coord);
        chunk.generate_terrain(&self.generator);
        self.chunks.insert(coord, chunk);

        self.remesh(coord);
        for neighbor in coord.neighbors() {
            self.remesh(neighbor);
        }

        debug!("Generated chunk {:?} ({} loaded)", coord, self.chunks.len());
        true
    }

    /// Rebuilds the meshes of a loaded chunk. Does nothing if it is not loaded.
    pub fn remesh(&mut self, coord: ChunkCoord) {
        let world: &World = self;
        let Some(chunk) = world.chunks.get(&coord) else {
            return;
        };
        let meshes = MeshBuilder::new(&world.registry).build(chunk, world);

        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.set_meshes(meshes);
        }
    }

    /// Selects the chunks visible from a camera, generating missing ones as the
    /// generation policy allows.
    ///
    /// Scans the square window of `view_distance` chunks around the camera's
    /// lattice cell. A loaded chunk is visible when its footprint center lies
    /// within the render distance of the camera and its bounds intersect the
    /// view frustum. A chunk generated during the pass is tested the same way.
    pub fn visible_chunks(&mut self, view: &CameraView) -> Visibility {
        let frustum = view.frustum();
        let center = ChunkCoord::containing_point(view.position);
        let radius = self.view_distance;

        self.policy.begin_tick();
        let mut visibility = Visibility::default();

        for x in center.x.saturating_sub(radius)..=center.x.saturating_add(radius) {
            for z in center.z.saturating_sub(radius)..=center.z.saturating_add(radius) {
                let coord = ChunkCoord::new(x, z);
                visibility.scanned += 1;

                if !self.chunks.contains_key(&coord) {
                    if !self.policy.try_acquire() {
                        continue;
                    }
                    self.generate_chunk(coord);
                    visibility.generated += 1;
                }

                let Some(chunk) = self.chunks.get(&coord) else {
                    continue;
                };

                let chunk_center = chunk.center();
                let dx = chunk_center.x - view.position.x;
                let dz = chunk_center.z - view.position.z;
                if dx * dx + dz * dz > self.render_distance_squared {
                    continue;
                }

                if frustum.is_aabb_inside(&chunk.aabb()) {
                    visibility.visible.push(coord);
                }
            }
        }

        debug!(
            "Visible chunks: {}/{} ({} generated)",
            visibility.visible.len(),
            visibility.scanned,
            visibility.generated
        );
        visibility
    }

    /// Orders the meshes of the given chunks for drawing.
    ///
    /// All opaque meshes come first, then all water meshes, so translucent
    /// geometry blends over finished terrain. Empty meshes and unloaded chunks
    /// are skipped.
    pub fn draw_list(&self, chunks: &[ChunkCoord]) -> Vec<DrawItem<'_>> {
        let loaded: Vec<&Chunk> = chunks.iter().filter_map(|c| self.chunks.get(c)).collect();
        let mut items = Vec::with_capacity(loaded.len() * 2);

        for pass in [RenderPass::Opaque, RenderPass::Water] {
            for chunk in &loaded {
                let mesh = match pass {
                    RenderPass::Opaque => chunk.ground_mesh(),
                    RenderPass::Water => chunk.water_mesh(),
                };
                if mesh.is_empty() {
                    continue;
                }
                items.push(DrawItem {
                    pass,
                    coord: chunk.position,
                    model_offset: chunk.model_offset(),
                    mesh,
                    mesh_version: chunk.mesh_version(),
                });
            }
        }

        items
    }

    /// Runs a visibility pass and returns this frame's ordered draw list.
    pub fn render(&mut self, view: &CameraView) -> Vec<DrawItem<'_>> {
        let visibility = self.visible_chunks(view);
        self.draw_list(&visibility.visible)
    }

    /// Gets a loaded chunk.
    pub fn get_chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates the loaded chunks in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }
}

impl BlockSource for World {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_block_at(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use noise::Constant;

    use super::*;
    use crate::engine_state::voxels::block::AtlasLayout;
    use crate::engine_state::voxels::scheduling::{PerTickBudget, Unthrottled};

    fn flat_world(initial_radius: i32, policy: Box<dyn GenerationPolicy>) -> World {
        let config = WorldConfig {
            initial_radius,
            ..WorldConfig::default()
        };
        World::with_parts(
            &config,
            TerrainGenerator::with_noise(Constant::new(0.0), 20.0, 4),
            BlockRegistry::with_defaults(AtlasLayout::default()).unwrap(),
            policy,
        )
        .unwrap()
    }

    #[test]
    fn spawn_area_is_square_around_origin() {
        let world = flat_world(1, Box::new(Unthrottled));
        assert_eq!(world.chunk_count(), 9);
        for x in -1..=1 {
            for z in -1..=1 {
                let chunk = world.get_chunk_at(ChunkCoord::new(x, z)).unwrap();
                assert_eq!(chunk.mesh_version(), 1);
            }
        }
    }

    #[test]
    fn reads_never_generate() {
        let world = flat_world(0, Box::new(Unthrottled));
        assert_eq!(world.get_block_at(100, 3, 100), BlockType::Empty);
        assert_eq!(world.get_block_at(-1, 3, -1), BlockType::Empty);
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn world_queries_use_floor_division() {
        let mut world = flat_world(0, Box::new(Unthrottled));
        world.generate_chunk(ChunkCoord::new(-1, -1));

        // Flat terrain: grass at y = 7 everywhere.
        assert_eq!(world.get_block_at(-1, 7, -1), BlockType::Grass);
        assert_eq!(world.get_block_at(-16, 6, -16), BlockType::Dirt);
        assert_eq!(world.get_block_at(-17, 7, -1), BlockType::Empty);
        assert_eq!(world.get_block_at(0, 7, 0), BlockType::Grass);
        assert_eq!(world.get_block_at(0, 8, 0), BlockType::Empty);
    }

    #[test]
    fn generation_is_idempotent() {
        let mut world = flat_world(0, Box::new(Unthrottled));
        let coord = ChunkCoord::new(2, -3);

        assert!(world.generate_chunk(coord));
        let count = world.chunk_count();
        let bytes = world.get_chunk_at(coord).unwrap().as_bytes().to_vec();
        let version = world.get_chunk_at(coord).unwrap().mesh_version();

        assert!(!world.generate_chunk(coord));
        let chunk = world.get_chunk_at(coord).unwrap();
        assert_eq!(world.chunk_count(), count);
        assert_eq!(chunk.as_bytes(), bytes.as_slice());
        assert_eq!(chunk.mesh_version(), version);
    }

    #[test]
    fn generation_remeshes_loaded_neighbors() {
        let mut world = flat_world(0, Box::new(Unthrottled));
        let origin = ChunkCoord::new(0, 0);
        let before = world.get_chunk_at(origin).unwrap().ground_mesh().face_count();

        world.generate_chunk(ChunkCoord::new(1, 0));
        let origin_chunk = world.get_chunk_at(origin).unwrap();
        assert_eq!(origin_chunk.mesh_version(), 2);

        // The eastern column of 8 layers times 16 rows is now hidden.
        let after = origin_chunk.ground_mesh().face_count();
        assert_eq!(before - after, 8 * 16);
    }

    #[test]
    fn generator_without_water_layer_is_rejected() {
        for water in [-1, CHUNK_HEIGHT] {
            let result = World::with_parts(
                &WorldConfig::default(),
                TerrainGenerator::with_noise(Constant::new(0.0), 20.0, water),
                BlockRegistry::with_defaults(AtlasLayout::default()).unwrap(),
                Box::new(Unthrottled),
            );
            assert!(matches!(
                result,
                Err(WorldError::Config(ConfigError::Invalid(_)))
            ));
        }
    }

    #[test]
    fn policy_throttles_streaming() {
        let mut world = flat_world(0, Box::new(PerTickBudget::new(1)));
        let view = CameraView::new(
            cgmath::Point3::new(8.0, 30.0, 8.0),
            cgmath::Matrix4::from_scale(1.0),
        );

        let first = world.visible_chunks(&view);
        assert_eq!(first.generated, 1);
        assert_eq!(world.chunk_count(), 2);

        let second = world.visible_chunks(&view);
        assert_eq!(second.generated, 1);
        assert_eq!(second.scanned, 49);
        assert_eq!(world.chunk_count(), 3);
    }
}
