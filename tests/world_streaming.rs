//! # World Streaming Integration Tests
//!
//! Drives the world through its public API: terrain determinism, meshing across
//! chunk borders, visibility and throttled generation.

use std::time::Duration;

use noise::Constant;
use voxel_world::{
    AtlasLayout, BlockRegistry, BlockType, CameraConfig, CameraState, ChunkCoord, ConfigError,
    GenerationPolicy, RegistryError, RenderPass, TerrainGenerator, TimeSliceBudget, Unthrottled,
    World, WorldConfig, WorldError, CHUNK_HEIGHT, CHUNK_SIZE,
};

fn world_with_noise(value: f64, initial_radius: i32, policy: Box<dyn GenerationPolicy>) -> World {
    let config = WorldConfig {
        initial_radius,
        ..WorldConfig::default()
    };
    World::with_parts(
        &config,
        TerrainGenerator::with_noise(Constant::new(value), 20.0, 4),
        BlockRegistry::with_defaults(AtlasLayout::default()).unwrap(),
        policy,
    )
    .unwrap()
}

fn faces_with_normal(world: &World, coord: ChunkCoord, normal: [f32; 3]) -> usize {
    let mesh = world.get_chunk_at(coord).unwrap().ground_mesh();
    mesh.vertices.iter().filter(|v| v.normal == normal).count() / 4
}

#[test]
fn terrain_is_deterministic_across_worlds() {
    let config = WorldConfig {
        initial_radius: 0,
        ..WorldConfig::default()
    };
    let mut first = World::new(&config).unwrap();
    let mut second = World::new(&config).unwrap();

    for coord in [ChunkCoord::new(3, -2), ChunkCoord::new(-7, 11)] {
        first.generate_chunk(coord);
        second.generate_chunk(coord);
        let a = first.get_chunk_at(coord).unwrap();
        let b = second.get_chunk_at(coord).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.ground_mesh(), b.ground_mesh());
    }
}

#[test]
fn seeded_terrain_has_grass_caps() {
    let world = World::new(&WorldConfig::default()).unwrap();
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let height = world.generator().column_height(x, z);
            if height == 0 {
                continue;
            }
            assert_eq!(world.get_block_at(x, height - 1, z), BlockType::Grass);
            if height < CHUNK_HEIGHT {
                let above = world.get_block_at(x, height, z);
                assert!(above == BlockType::Empty || above == BlockType::Water);
            }
        }
    }
}

#[test]
fn neighbor_generation_hides_shared_border() {
    let mut world = world_with_noise(0.0, 0, Box::new(Unthrottled));
    let origin = ChunkCoord::new(0, 0);

    // 8 terrain layers times 16 rows on the eastern border.
    assert_eq!(faces_with_normal(&world, origin, [1.0, 0.0, 0.0]), 128);

    world.generate_chunk(ChunkCoord::new(1, 0));
    assert_eq!(faces_with_normal(&world, origin, [1.0, 0.0, 0.0]), 0);
    assert_eq!(faces_with_normal(&world, ChunkCoord::new(1, 0), [-1.0, 0.0, 0.0]), 0);
    assert_eq!(faces_with_normal(&world, origin, [-1.0, 0.0, 0.0]), 128);
}

#[test]
fn solid_chunk_keeps_only_its_top_once_surrounded() {
    let mut world = world_with_noise(1.0, 0, Box::new(Unthrottled));
    let origin = ChunkCoord::new(0, 0);

    // Four exposed sides plus the top, the world floor is never drawn.
    let alone = world.get_chunk_at(origin).unwrap().ground_mesh().face_count();
    assert_eq!(alone, 5 * 256);

    for neighbor in origin.neighbors() {
        world.generate_chunk(neighbor);
    }
    let chunk = world.get_chunk_at(origin).unwrap();
    assert_eq!(chunk.ground_mesh().face_count(), 256);
    assert_eq!(chunk.mesh_version(), 5);
    assert_eq!(faces_with_normal(&world, origin, [0.0, 1.0, 0.0]), 256);
}

#[test]
fn repeated_generation_changes_nothing() {
    let mut world = world_with_noise(0.0, 1, Box::new(Unthrottled));
    let before: Vec<u64> = world.chunks().map(|c| c.mesh_version()).collect();

    for x in -1..=1 {
        for z in -1..=1 {
            assert!(!world.generate_chunk(ChunkCoord::new(x, z)));
        }
    }

    let after: Vec<u64> = world.chunks().map(|c| c.mesh_version()).collect();
    assert_eq!(world.chunk_count(), 9);
    assert_eq!(before, after);
}

#[test]
fn water_draws_after_all_opaque_geometry() {
    // A single grass layer with the water layer above it.
    let world = world_with_noise(-0.82, 1, Box::new(Unthrottled));
    let coords: Vec<ChunkCoord> = world.chunks().map(|c| c.position).collect();

    let draws = world.draw_list(&coords);
    assert_eq!(draws.len(), 2 * coords.len());

    let first_water = draws
        .iter()
        .position(|d| d.pass == RenderPass::Water)
        .unwrap();
    assert!(draws[..first_water].iter().all(|d| d.pass == RenderPass::Opaque));
    assert!(draws[first_water..].iter().all(|d| d.pass == RenderPass::Water));

    for draw in &draws[first_water..] {
        // Only top faces at the water layer.
        assert!(draw.mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert!(draw.mesh.vertices.iter().all(|v| v.position[1] == 4.5));
    }
}

#[test]
fn visibility_culls_behind_camera_and_beyond_render_distance() {
    let mut world = world_with_noise(0.0, 0, Box::new(Unthrottled));
    let camera = CameraState::from_config(&CameraConfig::default());
    let visibility = world.visible_chunks(&camera.view());

    assert_eq!(visibility.scanned, 49);
    assert_eq!(visibility.generated, 48);
    assert_eq!(world.chunk_count(), 49);

    let visible = |x, z| visibility.visible.contains(&ChunkCoord::new(x, z));
    // Camera at (0, 20, 10) looking down negative Z.
    assert!(visible(0, 0));
    assert!(visible(0, -2));
    assert!(visible(-1, -3));
    assert!(!visible(0, 1));
    assert!(!visible(0, 3));
    assert!(!visible(3, -3));
}

#[test]
fn time_slice_policy_limits_streaming() {
    let policy = TimeSliceBudget::new(Duration::from_secs(3600));
    let mut world = world_with_noise(0.0, 0, Box::new(policy));
    let camera = CameraState::from_config(&CameraConfig::default());

    assert_eq!(world.visible_chunks(&camera.view()).generated, 1);
    assert_eq!(world.visible_chunks(&camera.view()).generated, 0);
    assert_eq!(world.chunk_count(), 2);
}

#[test]
fn json_config_drives_generation() {
    let config = WorldConfig::from_json_str(
        r#"{ "initial_radius": 0, "generation": { "per_tick": { "max": 4 } } }"#,
    )
    .unwrap();
    let mut world = World::new(&config).unwrap();
    assert_eq!(world.chunk_count(), 1);

    let camera = CameraState::from_config(&config.camera);
    let visibility = world.visible_chunks(&camera.view());
    assert_eq!(visibility.generated, 4);
    assert_eq!(world.chunk_count(), 5);
}

#[test]
fn invalid_setup_is_rejected() {
    let config = WorldConfig {
        water_height: CHUNK_HEIGHT,
        ..WorldConfig::default()
    };
    assert!(matches!(
        World::new(&config),
        Err(WorldError::Config(ConfigError::Invalid(_)))
    ));

    let empty = BlockRegistry::new(AtlasLayout::default()).unwrap();
    let result = World::with_parts(
        &WorldConfig::default(),
        TerrainGenerator::with_noise(Constant::new(0.0), 20.0, 4),
        empty,
        Box::new(Unthrottled),
    );
    assert!(matches!(
        result,
        Err(WorldError::Registry(RegistryError::MissingBlock(_)))
    ));
}
