#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural, chunked voxel terrain with face-culled meshing and viewer-centered
//! chunk streaming.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration with defaults and validation
//! * `engine_state` - The tick host, the voxel world and the mesher
//!
//! ## Architecture
//!
//! The crate is split into three cooperating parts:
//! * Terrain generation from layered Perlin noise, one chunk grid at a time
//! * Meshing, turning a chunk grid into one quad per exposed voxel face
//! * Streaming, keeping a square window of chunks around the viewer under a
//!   per-tick generation budget
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_terrain::{config::WorldConfig, EngineState};
//!
//! let mut engine_state = EngineState::new(&WorldConfig::default()).unwrap();
//! let update = engine_state.tick(Point3::new(0.0, 0.0, 0.0));
//!
//! for position in update.created {
//!     let chunk = engine_state.world().chunk(position).unwrap();
//!     let vertices = chunk.mesh().vertices();
//!     assert_eq!(vertices.len(), chunk.mesh().positions.len());
//! }
//! ```

use cgmath::Point3;
use log::info;

pub mod config;
pub mod engine_state;

pub use config::{ConfigError, NoiseParameters, WorldConfig};
pub use engine_state::{
    rendering::{
        meshing::{build_mesh, Face, Mesh},
        Vertex,
    },
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType, Block, BlockCatalog, Voxel},
        chunk::{voxel_grid::VoxelGrid, Chunk},
        terrain::{GenerationError, TerrainGenerator},
        world::{ChunkCoord, ChunkState, StreamingUpdate, World},
    },
    EngineState, TickStats,
};

/// Number of ticks the viewer walks for in the headless session.
const WALK_TICKS: u32 = 48;
/// Distance the viewer moves along +x per tick, in voxels.
const WALK_SPEED: f32 = 4.0;

/// Runs a headless streaming session.
///
/// The configuration is read from the JSON file named by the first command line
/// argument. The defaults are used when no argument is given or the file does
/// not exist. A file that fails to parse or validate is returned as an error.
/// A viewer then walks along +x, one edit pair is made in the chunk it ends up
/// in, and per-tick statistics are logged.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::load_or_default(path)?,
        None => {
            info!("No configuration file given, using defaults");
            WorldConfig::default()
        }
    };

    let mut engine_state = EngineState::new(&config)?;
    let mut viewer = config.initial_viewer_position();

    for _ in 0..WALK_TICKS {
        let update = engine_state.tick(viewer);
        let stats = engine_state.last_tick();
        if !update.is_empty() {
            info!(
                "Tick {} at x = {:.1}: +{} -{} chunks ({} active, {} queued)",
                stats.tick, viewer.x, stats.created, stats.evicted, stats.active, stats.queued
            );
        }
        viewer.x += WALK_SPEED;
    }

    while !engine_state.is_settled() {
        engine_state.tick(viewer);
    }

    edit_surface_below(&mut engine_state, viewer);

    let faces: usize = engine_state
        .world()
        .chunks()
        .map(|chunk| chunk.mesh().face_count())
        .sum();
    info!(
        "Session finished after {} ticks: {} active chunks, {} faces, {:?} in ticks, {:?} total",
        engine_state.last_tick().tick,
        engine_state.world().active_count(),
        faces,
        engine_state.total_tick_time(),
        engine_state.uptime()
    );

    Ok(())
}

/// Digs out the topmost voxel of the column below `viewer`, then puts it back.
fn edit_surface_below(engine_state: &mut EngineState, viewer: Point3<f32>) {
    let world = engine_state.world_mut();
    let column = Point3::new(viewer.x.floor() as i32, 0, viewer.z.floor() as i32);
    let (position, local) = world.locate_voxel(column);

    let Some(chunk) = world.chunk(position) else {
        info!("Chunk {:?} below the viewer is not active, skipping edit", position);
        return;
    };

    let surface = (0..chunk.dimensions().y as i32)
        .rev()
        .map(|y| Point3::new(local.x, y, local.z))
        .find_map(|cell| chunk.block_at(cell).map(|block| (cell, block)));

    let Some((cell, block)) = surface else {
        info!("Column {:?} of chunk {:?} is empty, skipping edit", local, position);
        return;
    };

    let faces_before = chunk.mesh().face_count();
    let target = Point3::new(column.x, cell.y, column.z);

    if world.destroy_voxel_at(target) {
        let faces_dug = world.chunk(position).map_or(0, |chunk| chunk.mesh().face_count());
        world.place_block_at(target, block);
        let faces_after = world.chunk(position).map_or(0, |chunk| chunk.mesh().face_count());
        info!(
            "Edited voxel {:?}: {} faces before, {} dug out, {} restored",
            target, faces_before, faces_dug, faces_after
        );
    }
}
