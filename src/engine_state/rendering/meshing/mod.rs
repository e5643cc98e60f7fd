//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's voxel grid into the two meshes the renderer
//! draws: an opaque *ground* mesh and a translucent *water* mesh.
//!
//! # Face Culling
//! A face of an opaque voxel is emitted only when the voxel it looks at is
//! transparent. Lookups that leave the chunk go through a
//! [`BlockSource`](crate::engine_state::voxels::chunk::BlockSource), so faces on
//! chunk borders are culled against whatever neighbor is loaded at build time.
//!
//! Water only contributes its upward face, and only where nothing rests on it.
//!
//! # Rebuilding
//! Meshes are derived data. Whenever a chunk or one of its horizontal neighbors
//! changes, the chunk's meshes are rebuilt from scratch.

mod mesh;

pub use mesh::*;

use log::trace;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType, BlockRegistry},
    chunk::{BlockSource, Chunk},
};

use mesh::ambient_occlusion::face_ao;

/// Both meshes of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMeshes {
    /// Every visible face of opaque voxels
    pub ground: Mesh,
    /// Upward faces of water voxels
    pub water: Mesh,
}

impl ChunkMeshes {
    pub fn clear(&mut self) {
        self.ground.clear();
        self.water.clear();
    }
}

/// Builds chunk meshes against a block registry.
#[derive(Debug, Clone, Copy)]
pub struct MeshBuilder<'a> {
    registry: &'a BlockRegistry,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(registry: &'a BlockRegistry) -> Self {
        MeshBuilder { registry }
    }

    /// Builds fresh meshes for a chunk.
    ///
    /// # Arguments
    /// * `chunk` - A chunk whose terrain has been generated
    /// * `neighbors` - Resolves lookups across the chunk's horizontal borders
    pub fn build(&self, chunk: &Chunk, neighbors: &dyn BlockSource) -> ChunkMeshes {
        let mut meshes = ChunkMeshes::default();
        self.build_into(chunk, neighbors, &mut meshes);
        meshes
    }

    /// Rebuilds a chunk's meshes into existing buffers, discarding their contents.
    pub fn build_into(&self, chunk: &Chunk, neighbors: &dyn BlockSource, meshes: &mut ChunkMeshes) {
        debug_assert!(
            chunk.is_generated(),
            "meshing {:?} before its terrain was generated",
            chunk.position
        );
        meshes.clear();

        for (position, block_type) in chunk.iter_blocks() {
            let textures = self.registry.faces(block_type);

            if block_type == BlockType::Water {
                let above = chunk.get_block(position.x, position.y + 1, position.z, neighbors);
                if above == BlockType::Empty {
                    let face = Face::new(position, BlockSide::Top);
                    meshes.water.add_quad(face.vertices(textures.top, [0.0; 4]));
                }
                continue;
            }

            for side in BlockSide::all() {
                let [dx, dy, dz] = side.normal();
                if !chunk.is_transparent(position.x + dx, position.y + dy, position.z + dz, neighbors)
                {
                    continue;
                }

                let ao = face_ao(chunk, neighbors, position, side).map(f32::from);
                let face = Face::new(position, side);
                meshes
                    .ground
                    .add_quad(face.vertices(textures.get(side.texture()), ao));
            }
        }

        trace!(
            "Meshed chunk {:?}: {} ground faces, {} water faces",
            chunk.position,
            meshes.ground.face_count(),
            meshes.water.face_count()
        );
    }
}
