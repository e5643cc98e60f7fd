//! Mesh generation primitives for voxel rendering.
//!
//! # Architecture
//! - [`Mesh`]: Vertex and index lists of one chunk layer
//! - [`Face`]: A single visible voxel face and its corner vertices
//! - [`ambient_occlusion`]: Per-corner occlusion sampling
//!
//! Faces are emitted one quad per visible voxel side. Adjacent faces are never
//! merged, since every corner carries its own occlusion value.

pub mod ambient_occlusion;
mod face;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::Face;
pub use mesh::*;
