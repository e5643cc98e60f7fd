//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] is a plain vertex/index list in the layout the renderer uploads.
//! It is always rebuilt from scratch, never patched.

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::FACE_INDICES;

/// Triangle geometry of one chunk layer (ground or water).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Interleaved vertex records, four per quad
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`, six per quad
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Drops all geometry while keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends a quad given its corners in counter-clockwise order.
    ///
    /// # Arguments
    /// * `corners` - The four corner vertices, wound counter-clockwise when seen from
    ///   the side the quad faces
    pub fn add_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend(FACE_INDICES.iter().map(|i| base + i));
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex data as bytes, ready for a buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes, ready for a buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
