use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::{
    block_side::{BlockSide, FACE_CORNERS},
    UvRect,
};

/// Represents a single visible quad of a voxel.
///
/// The corner positions, normal and texture orientation are all read from the
/// per-side tables of [`BlockSide`], so every side is emitted by the same code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Chunk-local position of the voxel the face belongs to
    pub position: Point3<i32>,
    /// Which side of the voxel this face covers
    pub side: BlockSide,
}

impl Face {
    pub fn new(position: Point3<i32>, side: BlockSide) -> Self {
        Face { position, side }
    }

    /// Builds the four corner vertices of the face.
    ///
    /// # Arguments
    /// * `uv` - Atlas rectangle to stretch over the face
    /// * `ao` - Occlusion level of each corner, in `FACE_CORNERS` order
    ///
    /// # Returns
    /// The corners in counter-clockwise order as seen from outside the voxel.
    /// The low end of each face axis samples `u0`/`v0` and the high end `u1`/`v1`.
    pub fn vertices(&self, uv: UvRect, ao: [f32; 4]) -> [Vertex; 4] {
        let [nx, ny, nz] = self.side.normal();
        let (u, v) = self.side.axes();
        let normal = self.side.normal_f32();

        let center = [
            self.position.x as f32 + 0.5 * nx as f32,
            self.position.y as f32 + 0.5 * ny as f32,
            self.position.z as f32 + 0.5 * nz as f32,
        ];

        std::array::from_fn(|corner| {
            let (su, sv) = FACE_CORNERS[corner];
            let (su, sv) = (0.5 * su as f32, 0.5 * sv as f32);
            let position = [
                center[0] + su * u[0] as f32 + sv * v[0] as f32,
                center[1] + su * u[1] as f32 + sv * v[1] as f32,
                center[2] + su * u[2] as f32 + sv * v[2] as f32,
            ];
            let tex_coords = [
                if su < 0.0 { uv.u0 } else { uv.u1 },
                if sv < 0.0 { uv.v0 } else { uv.v1 },
            ];
            Vertex::new(position, normal, tex_coords, ao[corner])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn corners_lie_on_the_unit_cube() {
        let center = Point3::new(3, 4, 5);
        for side in BlockSide::all() {
            let vertices = Face::new(center, side).vertices(UvRect::default(), [3.0; 4]);
            for vertex in vertices {
                for (axis, value) in vertex.position.iter().enumerate() {
                    let offset = value - center[axis] as f32;
                    assert!((offset.abs() - 0.5).abs() < 1e-6, "{:?} {:?}", side, vertex);
                }
                assert_eq!(vertex.normal, side.normal_f32());
            }
        }
    }

    #[test]
    fn triangles_face_outward() {
        for side in BlockSide::all() {
            let v = Face::new(Point3::new(0, 0, 0), side).vertices(UvRect::default(), [3.0; 4]);
            for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
                let n = cross(
                    sub(v[b].position, v[a].position),
                    sub(v[c].position, v[a].position),
                );
                assert!(dot(n, side.normal_f32()) > 0.0, "{:?} winds inward", side);
            }
        }
    }

    #[test]
    fn texture_spans_the_rectangle() {
        let uv = UvRect {
            u0: 0.1,
            v0: 0.4,
            u1: 0.2,
            v1: 0.3,
        };
        let v = Face::new(Point3::new(0, 0, 0), BlockSide::South).vertices(uv, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(v[0].uv, [0.1, 0.4]);
        assert_eq!(v[1].uv, [0.2, 0.4]);
        assert_eq!(v[2].uv, [0.2, 0.3]);
        assert_eq!(v[3].uv, [0.1, 0.3]);
        assert_eq!(v.map(|vertex| vertex.ao), [0.0, 1.0, 2.0, 3.0]);
    }
}
