//! # Block Side Module
//!
//! This module defines the six faces of a voxel block.
//!
//! Every per-face decision made by the mesher (neighbor offset, normal, corner
//! placement, ambient occlusion sampling and texture selection) is read from the
//! constant tables on [`BlockSide`] rather than re-derived in a `match` at each
//! call site.
//!
//! ## Face Frame
//!
//! Each face carries two in-plane unit axes `u` and `v` with `u × v = normal`.
//! Walking the corners `(-u,-v) → (+u,-v) → (+u,+v) → (-u,+v)` is therefore
//! counter-clockwise when the face is viewed from outside the block.

/// Which of the three atlas rectangles of a block a face samples.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum FaceTexture {
    /// The upward face.
    Top,
    /// Any of the four horizontal-facing faces.
    Side,
    /// The downward face.
    Bottom,
}

/// Represents the six possible faces of a voxel block.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// Facing negative Z
    North = 0,

    /// Facing positive Z
    South = 1,

    /// Facing positive X
    East = 2,

    /// Facing negative X
    West = 3,

    /// Facing positive Y
    Top = 4,

    /// Facing negative Y
    Bottom = 5,
}

/// The four corners of a face as `(u sign, v sign)`, in counter-clockwise order.
pub const FACE_CORNERS: [(i32, i32); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// Two triangles over the corners in [`FACE_CORNERS`] order.
pub const FACE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

impl BlockSide {
    /// Returns an array containing all six block faces.
    ///
    /// The order is: [North, South, East, West, Top, Bottom]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::North,
            BlockSide::South,
            BlockSide::East,
            BlockSide::West,
            BlockSide::Top,
            BlockSide::Bottom,
        ]
    }

    /// Integer step from a voxel to the neighbor this face looks at.
    pub const fn normal(self) -> [i32; 3] {
        match self {
            BlockSide::North => [0, 0, -1],
            BlockSide::South => [0, 0, 1],
            BlockSide::East => [1, 0, 0],
            BlockSide::West => [-1, 0, 0],
            BlockSide::Top => [0, 1, 0],
            BlockSide::Bottom => [0, -1, 0],
        }
    }

    /// The in-plane `(u, v)` axes of this face, with `u × v` equal to [`BlockSide::normal`].
    pub const fn axes(self) -> ([i32; 3], [i32; 3]) {
        match self {
            BlockSide::North => ([-1, 0, 0], [0, 1, 0]),
            BlockSide::South => ([1, 0, 0], [0, 1, 0]),
            BlockSide::East => ([0, 0, -1], [0, 1, 0]),
            BlockSide::West => ([0, 0, 1], [0, 1, 0]),
            BlockSide::Top => ([1, 0, 0], [0, 0, -1]),
            BlockSide::Bottom => ([1, 0, 0], [0, 0, 1]),
        }
    }

    /// Which atlas rectangle this face samples.
    pub const fn texture(self) -> FaceTexture {
        match self {
            BlockSide::Top => FaceTexture::Top,
            BlockSide::Bottom => FaceTexture::Bottom,
            _ => FaceTexture::Side,
        }
    }

    /// The normal as a float triple, ready for a vertex record.
    pub fn normal_f32(self) -> [f32; 3] {
        let [x, y, z] = self.normal();
        [x as f32, y as f32, z as f32]
    }
}
