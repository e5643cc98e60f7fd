//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and their
//! visibility classification.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are the values stored in a chunk's voxel array, so the
/// `FromPrimitive` derive is used to decode them again.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
pub enum BlockType {
    /// Nothing. Never meshed, never occludes.
    #[default]
    Empty = 0,

    /// Top layer of every terrain column.
    Grass = 1,

    /// Fills a terrain column below its grass layer.
    Dirt = 2,

    /// Flat water table placed at the configured water height.
    Water = 3,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [BlockType; 4] = [
        BlockType::Empty,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Water,
    ];

    /// Decodes a stored block value.
    ///
    /// Unknown values decode to `Empty` so corrupted data never produces geometry.
    pub fn from_int(btype: BlockTypeSize) -> Self {
        BlockType::from_u8(btype).unwrap_or(BlockType::Empty)
    }

    /// Whether light and sight pass through this block.
    ///
    /// Faces of opaque blocks are only emitted next to transparent ones.
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockType::Empty | BlockType::Water)
    }

    /// Whether this block type can appear in generated terrain and therefore
    /// needs an atlas entry before meshing.
    pub fn is_meshed(self) -> bool {
        self != BlockType::Empty
    }
}
