//! # Camera State Management
//!
//! This module turns a camera into the per-frame data the world consumes:
//! the camera's position (for distance culling) and its combined
//! view-projection matrix (for frustum culling).
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraView`: A frozen snapshot of both for one frame
//! - `Frustum`: The clip planes derived from a `CameraView`

use cgmath::{Deg, Matrix4, Point3};

use crate::config::CameraConfig;

pub mod camera;
pub mod frustum;

use camera::{Camera, Projection};
use frustum::Frustum;

/// What the world needs to know about the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera position in world space
    pub position: Point3<f32>,
    /// Projection matrix times view matrix
    pub view_proj: Matrix4<f32>,
}

impl CameraView {
    pub fn new(position: Point3<f32>, view_proj: Matrix4<f32>) -> Self {
        CameraView {
            position,
            view_proj,
        }
    }

    /// Extracts the clip planes of this view.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_proj)
    }
}

/// A camera together with its projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// The perspective applied on top of the camera's view
    pub projection: Projection,
}

impl CameraState {
    pub fn new(camera: Camera, projection: Projection) -> Self {
        CameraState { camera, projection }
    }

    /// Places and configures the camera as described by a config.
    pub fn from_config(config: &CameraConfig) -> Self {
        let camera = Camera::new(
            Point3::from(config.position),
            Deg(config.yaw_degrees),
            Deg(config.pitch_degrees),
        );
        let projection = Projection::new(
            config.viewport_width,
            config.viewport_height,
            Deg(config.fov_degrees),
            config.znear,
            config.zfar,
        );
        CameraState { camera, projection }
    }

    /// Snapshots the current camera for one frame.
    pub fn view(&self) -> CameraView {
        CameraView::new(
            self.camera.position,
            self.projection.calc_matrix() * self.camera.calc_matrix(),
        )
    }
}
