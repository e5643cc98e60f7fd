//! Rendering data for the voxel engine.
//!
//! This module holds the vertex layout shared with the GPU and the chunk mesh
//! generation that fills it. Submitting the resulting buffers is left to
//! whichever renderer consumes the draw list.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::{Vertex, VertexAttribute, VertexFormat};
