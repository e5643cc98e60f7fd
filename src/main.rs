//! # Voxel World Flythrough
//!
//! Headless driver for the voxel world. It flies a camera across the terrain,
//! streaming chunks in as it goes, and logs what every frame would have drawn.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json] [frames]
//! ```

use std::env;
use std::process;

use cgmath::{Deg, Rad};
use log::{error, info};
use voxel_world::{EngineState, WorldConfig};

const DEFAULT_FRAMES: u32 = 600;
/// Blocks travelled per frame
const FLIGHT_SPEED: f32 = 0.5;
/// Heading change per frame
const TURN_RATE: Deg<f32> = Deg(0.1);

fn main() {
    voxel_world::init_logging();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match WorldConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("Could not load {}: {}", path, err);
                process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    let frames = match args.next().map(|arg| arg.parse::<u32>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            error!("Invalid frame count: {}", err);
            process::exit(1);
        }
        None => DEFAULT_FRAMES,
    };

    let mut engine = match EngineState::new(&config) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Could not create world: {}", err);
            process::exit(1);
        }
    };

    let mut generated = 0;
    for _ in 0..frames {
        let report = engine.frame();
        generated += report.generated;
        if report.frame % 60 == 0 {
            info!(
                "Frame {}: {} visible, {} opaque + {} water draws, {} triangles, {} chunks loaded",
                report.frame,
                report.visible,
                report.opaque_draws,
                report.water_draws,
                report.triangles,
                engine.world.chunk_count()
            );
        }

        let camera = engine.camera_mut();
        camera.translate(FLIGHT_SPEED, 0.0, 0.0);
        camera.rotate(TURN_RATE.into(), Rad(0.0));
    }

    info!(
        "Flew {} frames, generated {} chunks, {} chunks loaded",
        frames,
        generated,
        engine.world.chunk_count()
    );
}
