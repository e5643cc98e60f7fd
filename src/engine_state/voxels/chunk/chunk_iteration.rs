//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-empty blocks of a chunk,
//! yielding each block together with its local position.
//!
//! Blocks are visited in storage order: X fastest, then Z, then Y, so a whole
//! horizontal layer is finished before the next one starts.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{Chunk, CHUNK_PLANE_SIZE, CHUNK_SIZE, CHUNK_VOLUME};

/// An iterator over all non-empty blocks in a chunk.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Flat index of the next voxel to inspect
    offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates an iterator positioned before the chunk's first voxel.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.chunk_ref.as_bytes();
        while self.offset < CHUNK_VOLUME {
            let index = self.offset;
            self.offset += 1;

            let block_type = BlockType::from_int(bytes[index]);
            if block_type == BlockType::Empty {
                continue;
            }

            let index = index as i32;
            let position = Point3::new(
                index % CHUNK_SIZE,
                index / CHUNK_PLANE_SIZE,
                (index % CHUNK_PLANE_SIZE) / CHUNK_SIZE,
            );
            return Some((position, block_type));
        }
        None
    }
}
