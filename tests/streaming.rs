use std::collections::HashSet;

use cgmath::Point3;
use voxel_terrain::{
    build_mesh, BlockSide, ChunkCoord, ChunkState, EngineState, NoiseParameters, World, WorldConfig,
};

fn config(render_distance: u16, max_chunks_per_tick: usize) -> WorldConfig {
    WorldConfig {
        chunk_size: [16, 50, 16],
        render_distance,
        max_chunks_per_tick,
        noise: NoiseParameters {
            seed: Some(31337),
            ..NoiseParameters::default()
        },
        ..WorldConfig::default()
    }
}

fn key(position: ChunkCoord) -> (i32, i32, i32) {
    (position.x, position.y, position.z)
}

fn settle(world: &mut World, viewer: Point3<f32>) {
    while world.queued_count() > 0 {
        world.advance(viewer);
    }
}

#[test]
fn nine_chunk_window_follows_the_viewer() {
    let mut world = World::new(&config(1, 4)).unwrap();
    settle(&mut world, Point3::new(8.0, 30.0, 8.0));

    let active: HashSet<_> = world.active_positions().into_iter().map(key).collect();
    let expected: HashSet<_> = (-1..=1)
        .flat_map(|x| (-1..=1).map(move |z| (x, 0, z)))
        .collect();
    assert_eq!(active, expected);

    // Step into chunk (1, 0, 0)
    let viewer = Point3::new(20.0, 30.0, 8.0);
    let update = world.advance(viewer);
    let evicted: HashSet<_> = update.evicted.into_iter().map(key).collect();
    assert_eq!(evicted, HashSet::from([(-1, 0, -1), (-1, 0, 0), (-1, 0, 1)]));
    settle(&mut world, viewer);

    let active: HashSet<_> = world.active_positions().into_iter().map(key).collect();
    let expected: HashSet<_> = (0..=2)
        .flat_map(|x| (-1..=1).map(move |z| (x, 0, z)))
        .collect();
    assert_eq!(active, expected);
}

#[test]
fn active_and_queued_always_tile_the_window() {
    let mut world = World::new(&config(2, 3)).unwrap();
    let path = [
        (0.0, 0.0),
        (17.0, 0.0),
        (17.0, -40.0),
        (-70.0, -40.0),
        (-70.0, -39.0),
        (200.0, 5.0),
    ];

    for (x, z) in path {
        for _ in 0..3 {
            world.advance(Point3::new(x, 0.0, z));

            let active: HashSet<_> = world.active_positions().into_iter().map(key).collect();
            let queued: HashSet<_> = world.queued_positions().into_iter().map(key).collect();
            let window: HashSet<_> = world.window().into_iter().map(key).collect();

            assert!(active.is_disjoint(&queued));
            assert_eq!(&active | &queued, window);
            assert!(world.active_count() <= 25);
        }
    }
}

#[test]
fn chunk_lifecycle_goes_unseen_queued_active_unseen() {
    let mut world = World::new(&config(1, 1)).unwrap();
    let far = Point3::new(5, 0, 0);
    assert_eq!(world.chunk_state(far), ChunkState::Unseen);

    let viewer = Point3::new(5.0 * 16.0 + 1.0, 0.0, 1.0);
    world.update_viewer_position(viewer);
    assert_eq!(world.chunk_state(far), ChunkState::Queued);

    settle(&mut world, viewer);
    assert_eq!(world.chunk_state(far), ChunkState::Active);

    world.advance(Point3::new(1.0, 0.0, 1.0));
    assert_eq!(world.chunk_state(far), ChunkState::Unseen);
    assert!(world.chunk(far).is_none());
}

#[test]
fn regenerated_chunks_are_identical() {
    let viewer = Point3::new(0.0, 0.0, 0.0);
    let position = Point3::new(1, 0, 1);

    let mut world = World::new(&config(1, 9)).unwrap();
    world.advance(viewer);
    let original = world.chunk(position).unwrap().grid().clone();

    // Walk away until the chunk is evicted, then come back
    world.advance(Point3::new(100.0, 0.0, 0.0));
    assert_eq!(world.chunk_state(position), ChunkState::Unseen);
    world.advance(viewer);

    let regenerated = world.chunk(position).unwrap();
    assert_eq!(regenerated.grid(), &original);
    assert_eq!(
        regenerated.mesh(),
        &build_mesh(&original, world.catalog(), 4)
    );
}

#[test]
fn meshes_only_face_out_of_the_terrain() {
    let mut world = World::new(&config(0, 1)).unwrap();
    world.advance(Point3::new(0.0, 0.0, 0.0));
    let chunk = world.chunk(Point3::new(0, 0, 0)).unwrap();
    let mesh = chunk.mesh();

    assert_eq!(mesh.positions.len(), mesh.face_count() * 4);
    assert_eq!(mesh.indices.len(), mesh.face_count() * 6);
    assert_eq!(mesh.uvs.len(), mesh.positions.len());

    // Exactly one upward face per column, at the surface
    let top_faces = mesh
        .normals
        .chunks(4)
        .filter(|quad| quad[0] == BlockSide::TOP.normal())
        .count();
    assert_eq!(top_faces, 16 * 16);

    // Every vertex lies inside the chunk bounds
    assert!(mesh.positions.iter().all(|p| {
        (0.0..=16.0).contains(&p.x) && (0.0..=50.0).contains(&p.y) && (0.0..=16.0).contains(&p.z)
    }));
}

#[test]
fn edits_through_the_engine_rebuild_meshes() {
    let mut engine_state = EngineState::new(&config(1, 9)).unwrap();
    engine_state.tick(Point3::new(0.0, 0.0, 0.0));

    let world = engine_state.world_mut();
    let target = Point3::new(-5, 0, 7);
    let (position, local) = world.locate_voxel(target);
    let before = world.chunk(position).unwrap().mesh().clone();
    let bedrock = world.chunk(position).unwrap().block_at(local).unwrap();

    assert!(world.destroy_voxel_at(target));
    assert_ne!(world.chunk(position).unwrap().mesh(), &before);

    assert!(world.place_block_at(target, bedrock));
    assert_eq!(world.chunk(position).unwrap().mesh(), &before);

    // Out of the chunk's vertical range
    assert!(!world.place_block_at(Point3::new(-5, -1, 7), bedrock));
    assert_eq!(world.chunk(position).unwrap().mesh(), &before);
}
