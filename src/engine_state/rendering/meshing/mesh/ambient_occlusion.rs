//! Per-vertex ambient occlusion.
//!
//! Each corner of a face looks at three voxels in the layer directly in front of
//! the face: the two that share an edge with the corner and the one diagonal to
//! it. The more of them are open, the brighter the corner.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::{BlockSide, FACE_CORNERS};
use crate::engine_state::voxels::chunk::{BlockSource, Chunk};

/// Occlusion level of a fully open corner.
pub const AO_OPEN: u8 = 3;

/// Combines three corner samples into a level in `0..=3`.
///
/// Two solid sides close the corner completely, whatever the diagonal holds.
/// Otherwise the level is the number of open samples.
pub fn vertex_ao(side1_open: bool, side2_open: bool, corner_open: bool) -> u8 {
    if !side1_open && !side2_open {
        return 0;
    }
    side1_open as u8 + side2_open as u8 + corner_open as u8
}

/// Occlusion levels of the four corners of a face, in `FACE_CORNERS` order.
///
/// # Arguments
/// * `chunk` - The chunk owning the voxel
/// * `neighbors` - Resolves samples that fall outside the chunk
/// * `position` - Chunk-local position of the voxel
/// * `side` - The face being lit
pub fn face_ao(
    chunk: &Chunk,
    neighbors: &dyn BlockSource,
    position: Point3<i32>,
    side: BlockSide,
) -> [u8; 4] {
    let [nx, ny, nz] = side.normal();
    let (u, v) = side.axes();
    let layer = [position.x + nx, position.y + ny, position.z + nz];

    let open = |su: i32, sv: i32| {
        chunk.is_transparent(
            layer[0] + su * u[0] + sv * v[0],
            layer[1] + su * u[1] + sv * v[1],
            layer[2] + su * u[2] + sv * v[2],
            neighbors,
        )
    };

    FACE_CORNERS.map(|(su, sv)| vertex_ao(open(su, 0), open(0, sv), open(su, sv)))
}
