//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher and the attribute
//! table a renderer needs to bind it.

use std::mem::{offset_of, size_of};

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Ambient Occlusion: f32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// Outward unit normal of the face
    pub normal: [f32; 3],
    /// Atlas texture coordinates
    pub uv: [f32; 2],
    /// Ambient occlusion level, 0 (fully occluded) to 3 (open)
    pub ao: f32,
}

/// Scalar type of a vertex attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
}

/// One entry of a vertex buffer layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub shader_location: u32,
    /// Byte offset inside a vertex
    pub offset: usize,
    pub format: VertexFormat,
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], ao: f32) -> Self {
        Vertex {
            position,
            normal,
            uv,
            ao,
        }
    }

    /// Distance in bytes between consecutive vertices.
    pub const STRIDE: usize = size_of::<Vertex>();

    /// Returns the attribute layout matching the shader inputs.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: tex_coords (vec2<f32>)
    /// - `location = 3`: ao (f32)
    pub fn desc() -> [VertexAttribute; 4] {
        [
            VertexAttribute {
                shader_location: 0,
                offset: offset_of!(Vertex, position),
                format: VertexFormat::Float32x3,
            },
            VertexAttribute {
                shader_location: 1,
                offset: offset_of!(Vertex, normal),
                format: VertexFormat::Float32x3,
            },
            VertexAttribute {
                shader_location: 2,
                offset: offset_of!(Vertex, uv),
                format: VertexFormat::Float32x2,
            },
            VertexAttribute {
                shader_location: 3,
                offset: offset_of!(Vertex, ao),
                format: VertexFormat::Float32,
            },
        ]
    }
}
