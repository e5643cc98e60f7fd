//! # View Frustum
//!
//! Extracts the six clip planes of a camera from its combined view-projection
//! matrix and tests points and axis-aligned boxes against them.
//!
//! The planes follow the OpenGL clip convention (`-w <= x, y, z <= w`). Each one
//! is a sum or difference of the matrix's fourth row with one of the first three,
//! scaled so its normal has unit length. The normals point into the frustum.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector3, Vector4};

/// A plane `a·x + b·y + c·z + d = 0` with a unit normal `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub d: f32,
}

impl Plane {
    /// Builds a plane from raw coefficients, normalizing by the length of the normal.
    ///
    /// Degenerate coefficients are kept as-is.
    pub fn from_coefficients(coefficients: Vector4<f32>) -> Self {
        let normal = coefficients.truncate();
        let length = normal.magnitude();
        if length > 0.0 {
            Plane {
                normal: normal / length,
                d: coefficients.w / length,
            }
        } else {
            Plane {
                normal,
                d: coefficients.w,
            }
        }
    }

    /// Signed distance from the plane, positive on the inside.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.x * point.x + self.normal.y * point.y + self.normal.z * point.z + self.d
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// The six clip planes of a camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Right, left, top, bottom, far and near planes
    pub planes: [Plane; 6],
}

impl Frustum {
    pub const RIGHT: usize = 0;
    pub const LEFT: usize = 1;
    pub const TOP: usize = 2;
    pub const BOTTOM: usize = 3;
    pub const FAR: usize = 4;
    pub const NEAR: usize = 5;

    /// Extracts the planes of a view-projection matrix.
    pub fn from_view_projection(view_proj: &Matrix4<f32>) -> Self {
        let row = |i: usize| view_proj.row(i);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Frustum {
            planes: [
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r2),
                Plane::from_coefficients(r3 + r2),
            ],
        }
    }

    /// Whether a point lies strictly inside every plane.
    pub fn is_point_inside(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) > 0.0)
    }

    /// Conservative box test.
    ///
    /// A box is rejected only when all eight of its corners are outside one plane.
    /// Boxes near the frustum's edges may pass even when they are not visible,
    /// but a box that intersects the frustum is never rejected.
    pub fn is_aabb_inside(&self, aabb: &Aabb) -> bool {
        let corners = aabb.corners();
        self.planes.iter().all(|plane| {
            corners
                .iter()
                .any(|corner| plane.signed_distance(*corner) > 0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{perspective, Deg};

    use super::*;

    const NEAR: f32 = 0.1;
    const FAR: f32 = 100.0;

    /// A camera at the origin looking down negative Z.
    fn frustum() -> Frustum {
        let view = Matrix4::look_to_rh(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::unit_y(),
        );
        let proj = perspective(Deg(60.0), 1.0, NEAR, FAR);
        Frustum::from_view_projection(&(proj * view))
    }

    #[test]
    fn planes_are_normalized() {
        for plane in frustum().planes {
            assert!((plane.normal.magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn point_between_near_and_far_is_inside() {
        let frustum = frustum();
        assert!(frustum.is_point_inside(Point3::new(0.0, 0.0, -(NEAR + FAR) / 2.0)));
    }

    #[test]
    fn points_outside_are_rejected() {
        let frustum = frustum();
        assert!(!frustum.is_point_inside(Point3::new(0.0, 0.0, 10.0)));
        assert!(!frustum.is_point_inside(Point3::new(0.0, 0.0, -(FAR + 1.0))));
        assert!(!frustum.is_point_inside(Point3::new(0.0, 0.0, -NEAR / 2.0)));
        // 60 degree field of view: at depth 10 the half-width is about 5.77.
        assert!(!frustum.is_point_inside(Point3::new(7.0, 0.0, -10.0)));
        assert!(frustum.is_point_inside(Point3::new(5.0, 0.0, -10.0)));
    }

    #[test]
    fn near_plane_distance_matches_clip_range() {
        let frustum = frustum();
        let near = frustum.planes[Frustum::NEAR];
        let distance = near.signed_distance(Point3::new(0.0, 0.0, -1.0));
        assert!((distance - (1.0 - NEAR)).abs() < 1e-4);
    }

    #[test]
    fn box_straddling_one_plane_is_inside() {
        let frustum = frustum();
        let across_far = Aabb::new(Point3::new(-1.0, -1.0, -FAR - 1.0), Point3::new(1.0, 1.0, -FAR + 1.0));
        assert!(frustum.is_aabb_inside(&across_far));

        let across_right = Aabb::new(Point3::new(5.0, -1.0, -11.0), Point3::new(7.0, 1.0, -9.0));
        assert!(frustum.is_aabb_inside(&across_right));
    }

    #[test]
    fn separated_boxes_are_rejected() {
        let frustum = frustum();
        let behind = Aabb::new(Point3::new(-1.0, -1.0, 1.0), Point3::new(1.0, 1.0, 3.0));
        let beyond = Aabb::new(Point3::new(-1.0, -1.0, -300.0), Point3::new(1.0, 1.0, -200.0));
        let above = Aabb::new(Point3::new(-1.0, 50.0, -12.0), Point3::new(1.0, 60.0, -8.0));
        assert!(!frustum.is_aabb_inside(&behind));
        assert!(!frustum.is_aabb_inside(&beyond));
        assert!(!frustum.is_aabb_inside(&above));
    }

    #[test]
    fn box_enclosing_the_camera_is_inside() {
        let frustum = frustum();
        let around = Aabb::new(Point3::new(-10.0, -10.0, -10.0), Point3::new(10.0, 10.0, 10.0));
        assert!(frustum.is_aabb_inside(&around));
    }
}
