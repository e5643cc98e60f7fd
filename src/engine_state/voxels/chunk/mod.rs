//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a `CHUNK_SIZE × CHUNK_HEIGHT × CHUNK_SIZE`
//! column of voxels together with the two meshes derived from it.
//!
//! ## Storage
//!
//! Voxels are stored densely, one [`Block`] byte each, flattened as
//! `x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE`. A whole horizontal layer is
//! therefore contiguous, which is the order terrain generation and meshing walk in.
//!
//! ## Neighbor Queries
//!
//! A chunk never stores a reference to the world that owns it. Queries that step
//! outside its horizontal bounds are answered by a [`BlockSource`] passed in by the
//! caller, normally the [`World`](super::world::World) itself.

use cgmath::Point3;
use log::trace;

use super::block::{block_type::BlockType, Block};
use crate::engine_state::camera_state::frustum::Aabb;
use crate::engine_state::rendering::meshing::{ChunkMeshes, Mesh};

mod chunk_iteration;
pub mod terrain;

pub use chunk_iteration::ChunkBlockIterator;
pub use terrain::TerrainGenerator;

/// Width and depth of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Height of a chunk (and of the world) in blocks.
pub const CHUNK_HEIGHT: i32 = 16;
/// The number of blocks in one horizontal layer.
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_SIZE * CHUNK_SIZE;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_PLANE_SIZE * CHUNK_HEIGHT) as usize;
/// Largest lattice coordinate, in either direction, whose blocks have `i32` world coordinates.
pub const CHUNK_COORD_LIMIT: i32 = i32::MAX / CHUNK_SIZE;

/// Integer position of a chunk in the world's chunk lattice.
///
/// Chunk `(x, z)` covers world columns `x * CHUNK_SIZE ..< (x + 1) * CHUNK_SIZE`
/// and likewise along Z.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The lattice cell containing a world column. Rounds toward negative infinity.
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        ChunkCoord {
            x: world_x.div_euclid(CHUNK_SIZE),
            z: world_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// The lattice cell containing a world-space point, clamped to [`CHUNK_COORD_LIMIT`].
    pub fn containing_point(point: Point3<f32>) -> Self {
        let cell = |v: f32| {
            ((v / CHUNK_SIZE as f32).floor() as i32).clamp(-CHUNK_COORD_LIMIT, CHUNK_COORD_LIMIT)
        };
        ChunkCoord {
            x: cell(point.x),
            z: cell(point.z),
        }
    }

    /// World coordinates of the chunk's `(0, 0)` column.
    ///
    /// Only cells within [`CHUNK_COORD_LIMIT`] have an addressable origin; beyond
    /// it the result saturates at the `i32` range.
    pub fn origin(&self) -> (i32, i32) {
        (
            self.x.saturating_mul(CHUNK_SIZE),
            self.z.saturating_mul(CHUNK_SIZE),
        )
    }

    /// The four lattice cells sharing an edge with this one.
    pub fn neighbors(&self) -> [ChunkCoord; 4] {
        [
            ChunkCoord::new(self.x.saturating_sub(1), self.z),
            ChunkCoord::new(self.x.saturating_add(1), self.z),
            ChunkCoord::new(self.x, self.z.saturating_sub(1)),
            ChunkCoord::new(self.x, self.z.saturating_add(1)),
        ]
    }
}

/// Resolves block queries in world coordinates.
///
/// Chunks use this to look across their own borders while meshing.
pub trait BlockSource {
    /// The block at a world position, `Empty` where nothing is loaded.
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType;
}

/// A block source with nothing loaded, for meshing a chunk in isolation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNeighbors;

impl BlockSource for NoNeighbors {
    fn block_at(&self, _x: i32, _y: i32, _z: i32) -> BlockType {
        BlockType::Empty
    }
}

/// Represents a `CHUNK_SIZE × CHUNK_HEIGHT × CHUNK_SIZE` collection of voxel blocks.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkCoord,

    /// Dense voxel array, see the module docs for the layout.
    blocks: Vec<Block>,

    /// Set once terrain generation has filled `blocks`.
    generated: bool,

    /// Every visible opaque face.
    ground_mesh: Mesh,

    /// Top faces of the water table.
    water_mesh: Mesh,

    /// Incremented every time the meshes are replaced, so an uploader can tell
    /// whether its GPU copy is stale.
    mesh_version: u64,
}

impl Chunk {
    /// Creates a new chunk filled with `Empty` blocks and without meshes.
    pub fn new(position: ChunkCoord) -> Self {
        Chunk {
            position,
            blocks: vec![Block::EMPTY; CHUNK_VOLUME],
            generated: false,
            ground_mesh: Mesh::new(),
            water_mesh: Mesh::new(),
            mesh_version: 0,
        }
    }

    /// Flattens local coordinates into an index of the voxel array.
    ///
    /// The coordinates must already be within the chunk.
    #[inline]
    pub(crate) fn index(x: i32, y: i32, z: i32) -> usize {
        debug_assert!(Self::in_bounds(x, y, z), "({x}, {y}, {z}) is outside the chunk");
        (x + z * CHUNK_SIZE + y * CHUNK_PLANE_SIZE) as usize
    }

    /// Whether local coordinates address a voxel of this chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    /// Reads a voxel of this chunk. `Empty` outside the chunk.
    #[inline]
    pub fn local_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !Self::in_bounds(x, y, z) {
            return BlockType::Empty;
        }
        self.blocks[Self::index(x, y, z)].get_type()
    }

    /// Writes a voxel of this chunk.
    ///
    /// The meshes of this chunk and of its neighbors are stale afterwards.
    ///
    /// # Returns
    /// `false`, leaving the chunk untouched, if the coordinates are outside it.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        if !Self::in_bounds(x, y, z) {
            trace!("Ignoring write at ({}, {}, {}) outside chunk {:?}", x, y, z, self.position);
            return false;
        }
        self.blocks[Self::index(x, y, z)] = Block::new(block_type);
        true
    }

    /// Gets the block at chunk-local coordinates.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Local coordinates, possibly outside the chunk
    /// * `neighbors` - Resolves queries that leave the chunk horizontally
    ///
    /// # Returns
    /// `Empty` above or below the world, the neighbor's block (or `Empty` if that
    /// neighbor is not loaded) beyond a horizontal border, otherwise the stored block.
    pub fn get_block(&self, x: i32, y: i32, z: i32, neighbors: &dyn BlockSource) -> BlockType {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return BlockType::Empty;
        }

        if !(0..CHUNK_SIZE).contains(&x) || !(0..CHUNK_SIZE).contains(&z) {
            let (offset_x, offset_z) = self.position.origin();
            return match (offset_x.checked_add(x), offset_z.checked_add(z)) {
                (Some(world_x), Some(world_z)) => neighbors.block_at(world_x, y, world_z),
                _ => BlockType::Empty,
            };
        }

        self.local_block(x, y, z)
    }

    /// Whether the block at chunk-local coordinates lets faces behind it show.
    ///
    /// Nothing below the world floor is transparent, so the bottom layer never
    /// gets a downward face.
    pub fn is_transparent(&self, x: i32, y: i32, z: i32, neighbors: &dyn BlockSource) -> bool {
        if y < 0 {
            return false;
        }
        self.get_block(x, y, z, neighbors).is_transparent()
    }

    /// Fills the voxel array from terrain noise. Runs at most once per chunk.
    pub fn generate_terrain(&mut self, generator: &TerrainGenerator) {
        debug_assert!(!self.generated, "terrain of {:?} generated twice", self.position);
        generator.fill(self);
        self.generated = true;
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Marks hand-built voxel data as complete so it can be meshed.
    pub fn mark_generated(&mut self) {
        self.generated = true;
    }

    /// Iterates the non-empty voxels in storage order.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The voxel array viewed as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Translation from chunk-local vertex positions to world space.
    pub fn model_offset(&self) -> [f32; 3] {
        let (x, z) = self.position.origin();
        [x as f32, 0.0, z as f32]
    }

    /// World-space bounds of this chunk's geometry.
    ///
    /// Voxel centers sit on integer coordinates, so the box starts half a block
    /// before the chunk origin.
    pub fn aabb(&self) -> Aabb {
        let (x, z) = self.position.origin();
        let min = Point3::new(x as f32 - 0.5, -0.5, z as f32 - 0.5);
        let max = Point3::new(
            min.x + CHUNK_SIZE as f32,
            min.y + CHUNK_HEIGHT as f32,
            min.z + CHUNK_SIZE as f32,
        );
        Aabb::new(min, max)
    }

    /// World-space center of the chunk's footprint, at ground level.
    pub fn center(&self) -> Point3<f32> {
        let (x, z) = self.position.origin();
        let half = CHUNK_SIZE as f32 / 2.0 - 0.5;
        Point3::new(x as f32 + half, 0.0, z as f32 + half)
    }

    /// Replaces both meshes with freshly built ones.
    pub fn set_meshes(&mut self, meshes: ChunkMeshes) {
        self.ground_mesh = meshes.ground;
        self.water_mesh = meshes.water;
        self.mesh_version += 1;
    }

    pub fn ground_mesh(&self) -> &Mesh {
        &self.ground_mesh
    }

    pub fn water_mesh(&self) -> &Mesh {
        &self.water_mesh
    }

    pub fn mesh_version(&self) -> u64 {
        self.mesh_version
    }
}
