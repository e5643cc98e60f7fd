//! # Block Module
//!
//! This module provides the block data structures of the voxel engine: the compact
//! per-voxel [`Block`] record, the [`BlockType`] enumeration, the six
//! [`BlockSide`](block_side::BlockSide) faces and the [`BlockRegistry`] that maps
//! each block type to its texture-atlas rectangles.

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

use block_side::FaceTexture;
use block_type::BlockType;

use crate::error::RegistryError;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Inset applied to every atlas rectangle so neighboring tiles never bleed in.
pub const ATLAS_BLEED_INSET: f32 = 0.001;

/// Represents a single voxel block in the world.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `Pod` derive let a chunk's voxel array be
/// viewed as raw bytes, which is what the determinism checks compare.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Default)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// The empty block every chunk starts out filled with.
    pub const EMPTY: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored type of this block.
    pub fn get_type(&self) -> BlockType {
        BlockType::from_int(self.block_type)
    }
}

/// A texture rectangle in normalized atlas coordinates.
///
/// `v0` addresses the bottom edge of the tile and `v1` the top edge, which flips
/// the image vertically relative to its row order in the atlas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// The three texture rectangles of one block type.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FaceTextures {
    pub top: UvRect,
    pub side: UvRect,
    pub bottom: UvRect,
}

impl FaceTextures {
    /// Picks the rectangle for one face class.
    pub fn get(&self, texture: FaceTexture) -> UvRect {
        match texture {
            FaceTexture::Top => self.top,
            FaceTexture::Side => self.side,
            FaceTexture::Bottom => self.bottom,
        }
    }
}

/// Pixel dimensions of the texture atlas and of the square tiles inside it.
///
/// Tiles are numbered row-major starting at the top-left tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        AtlasLayout {
            width: 256,
            height: 256,
            tile_size: 16,
        }
    }
}

impl AtlasLayout {
    /// Number of tile columns in the atlas.
    pub fn columns(&self) -> u32 {
        self.width / self.tile_size.max(1)
    }

    /// Number of tile rows in the atlas.
    pub fn rows(&self) -> u32 {
        self.height / self.tile_size.max(1)
    }

    /// Rejects layouts that hold no complete tile.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.tile_size == 0 || self.columns() == 0 || self.rows() == 0 {
            return Err(RegistryError::DegenerateAtlas {
                width: self.width,
                height: self.height,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Converts a tile number into its inset, vertically flipped UV rectangle.
    ///
    /// # Arguments
    /// * `tile` - Row-major tile number
    ///
    /// # Returns
    /// The rectangle, or an error when the tile lies outside the atlas.
    pub fn uv(&self, tile: u32) -> Result<UvRect, RegistryError> {
        let cols = self.columns();
        let rows = self.rows();
        if tile >= cols * rows {
            return Err(RegistryError::TileOutOfRange {
                tile,
                tiles: cols * rows,
            });
        }

        let x = (tile % cols) as f32;
        let y = (tile / cols) as f32;
        let (cols, rows) = (cols as f32, rows as f32);

        Ok(UvRect {
            u0: x / cols + ATLAS_BLEED_INSET,
            u1: (x + 1.0) / cols - ATLAS_BLEED_INSET,
            v0: (y + 1.0) / rows - ATLAS_BLEED_INSET,
            v1: y / rows + ATLAS_BLEED_INSET,
        })
    }
}

/// Maps block types to their per-face atlas rectangles.
///
/// The registry is populated once at startup and then only read by the mesher.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    atlas: AtlasLayout,
    faces: HashMap<BlockType, FaceTextures>,
}

impl BlockRegistry {
    /// Creates an empty registry over the given atlas.
    pub fn new(atlas: AtlasLayout) -> Result<Self, RegistryError> {
        atlas.validate()?;
        Ok(BlockRegistry {
            atlas,
            faces: HashMap::new(),
        })
    }

    /// Creates a registry holding the tiles of every terrain block.
    ///
    /// Grass uses tiles 2/1/0 for top/side/bottom, dirt uses tile 0 everywhere
    /// and water uses tile 18 on top.
    pub fn with_defaults(atlas: AtlasLayout) -> Result<Self, RegistryError> {
        let mut registry = BlockRegistry::new(atlas)?;
        registry.add(BlockType::Grass, 2, 1, 0)?;
        registry.add(BlockType::Dirt, 0, 0, 0)?;
        registry.add(BlockType::Water, 18, 0, 0)?;
        Ok(registry)
    }

    /// Registers (or replaces) the tiles of a block type.
    ///
    /// # Arguments
    /// * `block_type` - The block being registered
    /// * `top`, `side`, `bottom` - Row-major atlas tile numbers for each face class
    pub fn add(
        &mut self,
        block_type: BlockType,
        top: u32,
        side: u32,
        bottom: u32,
    ) -> Result<(), RegistryError> {
        let textures = FaceTextures {
            top: self.atlas.uv(top)?,
            side: self.atlas.uv(side)?,
            bottom: self.atlas.uv(bottom)?,
        };
        self.faces.insert(block_type, textures);
        Ok(())
    }

    /// Looks up the rectangles of a block type.
    ///
    /// A miss degrades to all-zero rectangles so a frame is never failed by a
    /// missing atlas entry.
    pub fn faces(&self, block_type: BlockType) -> FaceTextures {
        match self.faces.get(&block_type) {
            Some(textures) => *textures,
            None => {
                trace!("No atlas entry for {:?}, using an empty rectangle", block_type);
                FaceTextures::default()
            }
        }
    }

    /// Whether a block type has an entry.
    pub fn contains(&self, block_type: BlockType) -> bool {
        self.faces.contains_key(&block_type)
    }

    /// Verifies that every listed block type has an entry.
    pub fn ensure_registered<I>(&self, block_types: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = BlockType>,
    {
        for block_type in block_types {
            if !self.contains(block_type) {
                return Err(RegistryError::MissingBlock(block_type));
            }
        }
        Ok(())
    }

    /// The atlas this registry was built against.
    pub fn atlas(&self) -> &AtlasLayout {
        &self.atlas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn tile_uv_is_inset_and_flipped() {
        let atlas = AtlasLayout::default();
        let uv = atlas.uv(18).unwrap();

        // 16 columns, tile 18 sits at column 2 of row 1.
        assert!((uv.u0 - (2.0 / 16.0 + ATLAS_BLEED_INSET)).abs() < EPSILON);
        assert!((uv.u1 - (3.0 / 16.0 - ATLAS_BLEED_INSET)).abs() < EPSILON);
        assert!((uv.v0 - (2.0 / 16.0 - ATLAS_BLEED_INSET)).abs() < EPSILON);
        assert!((uv.v1 - (1.0 / 16.0 + ATLAS_BLEED_INSET)).abs() < EPSILON);
        assert!(uv.v0 > uv.v1);
    }

    #[test]
    fn tile_outside_atlas_is_rejected() {
        let atlas = AtlasLayout {
            width: 32,
            height: 16,
            tile_size: 16,
        };
        assert!(atlas.uv(1).is_ok());
        assert!(matches!(
            atlas.uv(2),
            Err(RegistryError::TileOutOfRange { tile: 2, tiles: 2 })
        ));
    }

    #[test]
    fn degenerate_atlas_is_rejected() {
        let atlas = AtlasLayout {
            width: 8,
            height: 8,
            tile_size: 16,
        };
        assert!(BlockRegistry::new(atlas).is_err());
    }

    #[test]
    fn defaults_cover_every_terrain_block() {
        let registry = BlockRegistry::with_defaults(AtlasLayout::default()).unwrap();
        registry
            .ensure_registered(BlockType::ALL.into_iter().filter(|b| b.is_meshed()))
            .unwrap();

        let grass = registry.faces(BlockType::Grass);
        assert_ne!(grass.top, grass.side);
        assert_ne!(grass.side, grass.bottom);
    }

    #[test]
    fn missing_entry_falls_back_to_empty_rectangle() {
        let registry = BlockRegistry::new(AtlasLayout::default()).unwrap();
        assert_eq!(registry.faces(BlockType::Dirt), FaceTextures::default());
        assert!(matches!(
            registry.ensure_registered([BlockType::Dirt]),
            Err(RegistryError::MissingBlock(BlockType::Dirt))
        ));
    }
}
