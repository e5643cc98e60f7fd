//! # Voxel World
//!
//! This module contains everything needed to represent a streamed voxel world and
//! turn it into renderable geometry.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block types, face directions and the texture registry
//! * **Chunk**: Fixed-size 16x16x16 arrays of blocks, their terrain and meshes
//! * **Scheduling**: Policies that bound how much generation a frame may do
//! * **World**: The chunk map, neighbor-aware meshing and per-frame visibility
//!
//! ## Data Flow
//!
//! 1. The world scans the chunk window around the camera every frame
//! 2. Missing chunks are generated when the scheduling policy allows
//! 3. A new chunk and its four horizontal neighbors are re-meshed
//! 4. Visible meshes are returned as an ordered draw list

pub mod block;
pub mod chunk;
pub mod scheduling;
pub mod world;
