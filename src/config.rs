//! # Configuration
//!
//! Tunable parameters of the world and its camera, loaded from JSON.
//!
//! Every field has a default, so a config file only needs to list the values it
//! overrides:
//!
//! ```json
//! { "seed": 42, "view_distance": 5, "generation": { "per_tick": { "max": 2 } } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::AtlasLayout;
use crate::engine_state::voxels::chunk::{CHUNK_HEIGHT, CHUNK_SIZE};
use crate::error::ConfigError;

/// How quickly missing chunks inside the view window are generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationConfig {
    /// At most `max` chunks per visibility pass.
    PerTick { max: u32 },
    /// At most one chunk per `millis` of wall-clock time.
    TimeSlice { millis: u64 },
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig::PerTick { max: 1 }
    }
}

/// Camera placement and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Heading in degrees, 270 looks down negative Z.
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: [0.0, 20.0, 10.0],
            yaw_degrees: 270.0,
            pitch_degrees: 0.0,
            fov_degrees: 60.0,
            znear: 0.01,
            zfar: 1000.0,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Parameters of world generation and streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of the terrain noise, shared by every chunk.
    pub seed: u32,
    /// World coordinates are divided by this before sampling noise.
    pub noise_smoothness: f64,
    /// Layer that is back-filled with water wherever terrain leaves it empty.
    pub water_height: i32,
    /// Radius, in chunks, of the square window scanned around the camera.
    pub view_distance: i32,
    /// Horizontal distance, in blocks, beyond which chunks are not drawn.
    pub render_distance: f32,
    /// Radius, in chunks, of the area generated around the origin at startup.
    pub initial_radius: i32,
    pub generation: GenerationConfig,
    pub atlas: AtlasLayout,
    pub camera: CameraConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0xdeadbeef,
            noise_smoothness: 20.0,
            water_height: 4,
            view_distance: 3,
            render_distance: 4.0 * CHUNK_SIZE as f32,
            initial_radius: 1,
            generation: GenerationConfig::default(),
            atlas: AtlasLayout::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a config from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The render distance cutoff, squared, as compared against during culling.
    pub fn render_distance_squared(&self) -> f32 {
        self.render_distance * self.render_distance
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..CHUNK_HEIGHT).contains(&self.water_height) {
            return Err(ConfigError::Invalid(format!(
                "water_height {} must lie in 0..{}",
                self.water_height, CHUNK_HEIGHT
            )));
        }
        if !(self.noise_smoothness.is_finite() && self.noise_smoothness > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "noise_smoothness {} must be positive",
                self.noise_smoothness
            )));
        }
        if self.view_distance < 0 || self.initial_radius < 0 {
            return Err(ConfigError::Invalid(
                "view_distance and initial_radius must not be negative".to_string(),
            ));
        }
        if !(self.render_distance.is_finite() && self.render_distance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "render_distance {} must be a non-negative number",
                self.render_distance
            )));
        }
        match self.generation {
            GenerationConfig::PerTick { max: 0 } => {
                return Err(ConfigError::Invalid(
                    "generation.per_tick.max must be at least 1".to_string(),
                ))
            }
            GenerationConfig::TimeSlice { millis: 0 } => {
                return Err(ConfigError::Invalid(
                    "generation.time_slice.millis must be at least 1".to_string(),
                ))
            }
            _ => {}
        }
        let camera = &self.camera;
        if !(camera.znear > 0.0 && camera.zfar > camera.znear) {
            return Err(ConfigError::Invalid(format!(
                "camera clip range {}..{} is empty",
                camera.znear, camera.zfar
            )));
        }
        if camera.viewport_width == 0 || camera.viewport_height == 0 {
            return Err(ConfigError::Invalid("camera viewport is empty".to_string()));
        }
        Ok(())
    }
}
