//! # Engine State Module
//!
//! The core engine module that drives the voxel world one frame at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - Couples a world with the camera looking at it
//! * `camera_state` - Camera placement, projection and frustum extraction
//! * `rendering` - Vertex format and chunk mesh generation
//! * `voxels` - Blocks, chunks, terrain generation and the world itself
//!
//! ## Frame Pipeline
//!
//! Everything runs on the calling thread, once per frame:
//!
//! 1. Snapshot the camera into a [`CameraView`](camera_state::CameraView)
//! 2. Extract the frustum and scan the chunk window around the camera
//! 3. Generate missing chunks as the generation policy allows, re-meshing
//!    their neighbors
//! 4. Hand the ordered draw list (opaque first, then water) to the renderer

use log::trace;

use crate::config::WorldConfig;
use crate::error::WorldError;
use camera_state::{camera::Camera, CameraState};
use voxels::world::{RenderPass, World};

pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// Summary of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Sequence number, starting at 1
    pub frame: u64,
    /// Chunks that passed distance and frustum culling
    pub visible: usize,
    /// Lattice cells inspected
    pub scanned: usize,
    /// Chunks generated this frame
    pub generated: usize,
    /// Opaque meshes in the draw list
    pub opaque_draws: usize,
    /// Water meshes in the draw list
    pub water_draws: usize,
    /// Triangles across the whole draw list
    pub triangles: usize,
}

/// The main state container for the voxel engine.
pub struct EngineState {
    pub world: World,
    pub camera_state: CameraState,
    frame: u64,
}

impl EngineState {
    /// Builds the world and camera a config describes.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        let world = World::new(config)?;
        let camera_state = CameraState::from_config(&config.camera);
        Ok(Self::from_parts(world, camera_state))
    }

    pub fn from_parts(world: World, camera_state: CameraState) -> Self {
        EngineState {
            world,
            camera_state,
            frame: 0,
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera_state.camera
    }

    /// Runs the frame pipeline once.
    ///
    /// # Returns
    /// Counts describing the visibility pass and the resulting draw list.
    pub fn frame(&mut self) -> FrameReport {
        self.frame += 1;

        let view = self.camera_state.view();
        let visibility = self.world.visible_chunks(&view);
        let draws = self.world.draw_list(&visibility.visible);

        let mut report = FrameReport {
            frame: self.frame,
            visible: visibility.visible.len(),
            scanned: visibility.scanned,
            generated: visibility.generated,
            ..FrameReport::default()
        };
        for draw in &draws {
            match draw.pass {
                RenderPass::Opaque => report.opaque_draws += 1,
                RenderPass::Water => report.water_draws += 1,
            }
            report.triangles += draw.mesh.indices.len() / 3;
        }

        trace!("Frame {}: {:?}", self.frame, report);
        report
    }
}
