//! # World Module
//!
//! This module provides the `World` struct, which decides which chunks exist
//! around a moving viewer and owns every chunk that does.
//!
//! ## Streaming
//!
//! The world keeps a square window of chunk coordinates centered on the
//! viewer's chunk, `2 * render_distance + 1` chunks on a side. Whenever the
//! viewer enters a different chunk the window is recomputed:
//!
//! 1. Window coordinates that are neither active nor queued are appended to the
//!    create queue
//! 2. Active chunks outside the window are evicted, releasing grid and mesh
//! 3. Queued coordinates outside the window are dropped from the queue
//!
//! Once per tick at most `max_chunks_per_tick` queued coordinates are taken in
//! FIFO order, generated and meshed. Between recomputations the active set and
//! the queue together cover the window exactly, with no coordinate in both.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Queue membership is O(1) through a mirrored hash set
//! - Generation and meshing run synchronously inside the tick, so the per-tick
//!   budget bounds the work done in one call

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use cgmath::{Point3, Vector3};

use crate::config::{ConfigError, WorldConfig};
use crate::engine_state::voxels::block::{Block, BlockCatalog};
use crate::engine_state::voxels::chunk::Chunk;
use crate::engine_state::voxels::terrain::TerrainGenerator;

/// A chunk coordinate. Streamed chunks always have `y == 0`.
pub type ChunkCoord = Point3<i32>;

/// Lifecycle state of a chunk coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Not tracked by the world
    Unseen,
    /// Waiting in the create queue
    Queued,
    /// Generated, meshed and owned by the world
    Active,
}

/// What changed during one call to [`World::advance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingUpdate {
    /// Chunks that became active, in creation order
    pub created: Vec<ChunkCoord>,
    /// Chunks that were evicted, sorted by coordinate
    pub evicted: Vec<ChunkCoord>,
}

impl StreamingUpdate {
    /// Whether the tick neither created nor evicted any chunk.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty()
    }
}

/// The streamed voxel world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_terrain::config::WorldConfig;
/// use voxel_terrain::World;
///
/// let mut world = World::new(&WorldConfig::default()).unwrap();
/// let update = world.advance(Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(update.created.len(), 4);
/// ```
pub struct World {
    /// Active chunks by chunk coordinate
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Coordinates waiting to be generated, oldest first
    create_queue: VecDeque<ChunkCoord>,
    /// Mirror of `create_queue` for membership tests
    queued: HashSet<ChunkCoord>,
    /// The chunk the viewer was in at the last window computation
    current_chunk_position: ChunkCoord,
    dimensions: Vector3<usize>,
    render_distance: i32,
    max_chunks_per_tick: usize,
    atlas_size: u32,
    catalog: Arc<BlockCatalog>,
    generator: TerrainGenerator,
}

impl World {
    /// Creates a world from a validated configuration and queues the window
    /// around the configured viewer position.
    ///
    /// No chunk is generated until the first [`World::advance`].
    ///
    /// # Returns
    /// The configuration error if `config` fails validation.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let dimensions = config.chunk_dimensions();
        let generator = TerrainGenerator::new(config.noise.clone());
        let current_chunk_position =
            chunk_coordinate_of(config.initial_viewer_position(), dimensions);

        let mut world = World {
            chunks: HashMap::new(),
            create_queue: VecDeque::new(),
            queued: HashSet::new(),
            current_chunk_position,
            dimensions,
            render_distance: i32::from(config.render_distance),
            max_chunks_per_tick: config.max_chunks_per_tick,
            atlas_size: config.atlas_size,
            catalog: Arc::new(config.catalog()),
            generator,
        };

        log::info!(
            "World created: chunk size {:?}, render distance {}, {} chunks per tick, seed {}",
            config.chunk_size,
            world.render_distance,
            world.max_chunks_per_tick,
            world.generator.seed()
        );

        world.recompute_window();
        Ok(world)
    }

    /// Runs one streaming tick.
    ///
    /// Updates the viewer's chunk coordinate, recomputing the window if it
    /// changed, then materializes one batch of queued chunks.
    ///
    /// # Arguments
    /// * `viewer_position` - The viewer's world-space position
    pub fn advance(&mut self, viewer_position: Point3<f32>) -> StreamingUpdate {
        let evicted = self.update_viewer_position(viewer_position);
        let created = self.materialize_queued();

        StreamingUpdate { created, evicted }
    }

    /// Moves the viewer, recomputing the window if it entered a new chunk.
    ///
    /// # Returns
    /// The evicted chunk coordinates, sorted.
    pub fn update_viewer_position(&mut self, viewer_position: Point3<f32>) -> Vec<ChunkCoord> {
        let chunk_position = chunk_coordinate_of(viewer_position, self.dimensions);
        if chunk_position == self.current_chunk_position {
            return Vec::new();
        }

        log::debug!(
            "Viewer moved from chunk {:?} to {:?}",
            self.current_chunk_position,
            chunk_position
        );
        self.current_chunk_position = chunk_position;
        self.recompute_window()
    }

    fn recompute_window(&mut self) -> Vec<ChunkCoord> {
        let center = self.current_chunk_position;
        let render_distance = self.render_distance;

        let mut enqueued = 0;
        for position in window_positions(center, render_distance) {
            if self.chunks.contains_key(&position) || self.queued.contains(&position) {
                continue;
            }
            self.create_queue.push_back(position);
            self.queued.insert(position);
            enqueued += 1;
        }

        let radius = i64::from(render_distance);
        let mut evicted: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|position| chebyshev_distance(**position, center) > radius)
            .copied()
            .collect();
        for position in &evicted {
            self.chunks.remove(position);
        }
        evicted.sort_by_key(|position| (position.x, position.y, position.z));

        let queued_before = self.create_queue.len();
        self.create_queue
            .retain(|position| chebyshev_distance(*position, center) <= radius);
        self.queued
            .retain(|position| chebyshev_distance(*position, center) <= radius);

        log::debug!(
            "Window around {:?}: {} enqueued, {} evicted, {} dropped from queue",
            center,
            enqueued,
            evicted.len(),
            queued_before - self.create_queue.len()
        );

        evicted
    }

    /// Generates and meshes up to `max_chunks_per_tick` queued chunks, oldest
    /// first.
    ///
    /// A chunk whose generation fails is logged and dropped from the queue. It
    /// is queued again by the next window recomputation that covers it.
    ///
    /// # Returns
    /// The coordinates that became active, in creation order.
    pub fn materialize_queued(&mut self) -> Vec<ChunkCoord> {
        let mut created = Vec::new();

        for _ in 0..self.max_chunks_per_tick {
            let Some(position) = self.create_queue.pop_front() else {
                break;
            };
            self.queued.remove(&position);

            if self.chunks.contains_key(&position) {
                continue;
            }

            match Chunk::generate(
                position,
                self.dimensions,
                &self.generator,
                self.catalog.clone(),
                self.atlas_size,
            ) {
                Ok(chunk) => {
                    log::trace!(
                        "Materialized chunk {:?}: {} solid voxels, {} faces",
                        position,
                        chunk.grid().solid_count(),
                        chunk.mesh().face_count()
                    );
                    self.chunks.insert(position, chunk);
                    created.push(position);
                }
                Err(e) => {
                    log::error!("Failed to generate chunk {:?}: {}", position, e);
                }
            }
        }

        created
    }

    /// The active chunk at `position`, if any.
    pub fn chunk(&self, position: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Mutable access to the active chunk at `position`, if any.
    pub fn chunk_mut(&mut self, position: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Iterates over all active chunks, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Where `position` is in the chunk lifecycle.
    pub fn chunk_state(&self, position: ChunkCoord) -> ChunkState {
        if self.chunks.contains_key(&position) {
            ChunkState::Active
        } else if self.queued.contains(&position) {
            ChunkState::Queued
        } else {
            ChunkState::Unseen
        }
    }

    /// Active chunk coordinates, in no particular order.
    pub fn active_positions(&self) -> Vec<ChunkCoord> {
        self.chunks.keys().copied().collect()
    }

    /// Queued chunk coordinates, oldest first.
    pub fn queued_positions(&self) -> Vec<ChunkCoord> {
        self.create_queue.iter().copied().collect()
    }

    /// Number of active chunks.
    pub fn active_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of coordinates waiting in the create queue.
    pub fn queued_count(&self) -> usize {
        self.create_queue.len()
    }

    /// The viewer's chunk at the last window computation.
    pub fn current_chunk_position(&self) -> ChunkCoord {
        self.current_chunk_position
    }

    /// Chunk size in voxels.
    pub fn chunk_dimensions(&self) -> Vector3<usize> {
        self.dimensions
    }

    /// The block catalog shared by every chunk.
    pub fn catalog(&self) -> &Arc<BlockCatalog> {
        &self.catalog
    }

    /// Coordinates of the window around the current viewer chunk.
    ///
    /// Near the edge of the `i32` coordinate range the window is cut short
    /// instead of wrapping around.
    pub fn window(&self) -> Vec<ChunkCoord> {
        window_positions(self.current_chunk_position, self.render_distance).collect()
    }

    /// Splits a world voxel coordinate into its owning chunk and the local
    /// coordinate inside that chunk.
    pub fn locate_voxel(&self, world_voxel: Point3<i32>) -> (ChunkCoord, Point3<i32>) {
        let size_x = self.dimensions.x as i32;
        let size_z = self.dimensions.z as i32;
        (
            Point3::new(world_voxel.x.div_euclid(size_x), 0, world_voxel.z.div_euclid(size_z)),
            Point3::new(
                world_voxel.x.rem_euclid(size_x),
                world_voxel.y,
                world_voxel.z.rem_euclid(size_z),
            ),
        )
    }

    /// Empties the voxel at a world coordinate.
    ///
    /// # Returns
    /// `false` if the owning chunk is not active or the voxel is out of bounds.
    pub fn destroy_voxel_at(&mut self, world_voxel: Point3<i32>) -> bool {
        let (position, local) = self.locate_voxel(world_voxel);
        self.chunks
            .get_mut(&position)
            .map(|chunk| chunk.destroy_voxel(local))
            .unwrap_or(false)
    }

    /// Places a block at a world coordinate.
    ///
    /// # Returns
    /// `false` if the owning chunk is not active or the chunk rejected the edit.
    pub fn place_block_at(&mut self, world_voxel: Point3<i32>, block: Block) -> bool {
        let (position, local) = self.locate_voxel(world_voxel);
        match self.chunks.get_mut(&position) {
            Some(chunk) => chunk.place_block(local, block),
            None => {
                log::warn!(
                    "Refusing to place block at {:?}, chunk {:?} is not active",
                    world_voxel,
                    position
                );
                false
            }
        }
    }
}

/// The chunk coordinate containing a world-space position.
///
/// Only `x` and `z` are considered. The result always has `y == 0`.
pub fn chunk_coordinate_of(position: Point3<f32>, dimensions: Vector3<usize>) -> ChunkCoord {
    Point3::new(
        (position.x / dimensions.x as f32).floor() as i32,
        0,
        (position.z / dimensions.z as f32).floor() as i32,
    )
}

/// The largest per-axis distance between two chunk coordinates.
///
/// Computed in `i64` so that any two `i32` coordinates have a distance.
pub fn chebyshev_distance(a: ChunkCoord, b: ChunkCoord) -> i64 {
    let axis = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs();
    axis(a.x, b.x).max(axis(a.y, b.y)).max(axis(a.z, b.z))
}

/// Coordinates of the square window of radius `render_distance` around
/// `center`, x outer and z inner.
///
/// Coordinates that do not fit in `i32` are skipped.
fn window_positions(center: ChunkCoord, render_distance: i32) -> impl Iterator<Item = ChunkCoord> {
    (-render_distance..=render_distance)
        .filter_map(move |x| center.x.checked_add(x))
        .flat_map(move |x| {
            (-render_distance..=render_distance)
                .filter_map(move |z| center.z.checked_add(z))
                .map(move |z| Point3::new(x, 0, z))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseParameters;

    fn config(render_distance: u16, max_chunks_per_tick: usize) -> WorldConfig {
        WorldConfig {
            chunk_size: [4, 20, 4],
            render_distance,
            max_chunks_per_tick,
            noise: NoiseParameters {
                seed: Some(17),
                ..NoiseParameters::default()
            },
            ..WorldConfig::default()
        }
    }

    fn sorted(mut positions: Vec<ChunkCoord>) -> Vec<(i32, i32, i32)> {
        positions.sort_by_key(|p| (p.x, p.y, p.z));
        positions.into_iter().map(|p| (p.x, p.y, p.z)).collect()
    }

    fn assert_window_covered(world: &World) {
        let mut covered = world.active_positions();
        covered.extend(world.queued_positions());
        let covered = sorted(covered);
        let mut deduped = covered.clone();
        deduped.dedup();

        assert_eq!(covered, deduped, "a coordinate is both active and queued");
        assert_eq!(covered, sorted(world.window()));
    }

    #[test]
    fn viewer_chunk_uses_floor_division() {
        let dims = Vector3::new(16, 50, 16);
        assert_eq!(chunk_coordinate_of(Point3::new(0.0, 0.0, 0.0), dims), Point3::new(0, 0, 0));
        assert_eq!(chunk_coordinate_of(Point3::new(15.9, 80.0, 16.0), dims), Point3::new(0, 0, 1));
        assert_eq!(chunk_coordinate_of(Point3::new(-0.1, 0.0, -16.0), dims), Point3::new(-1, 0, -1));
        assert_eq!(chunk_coordinate_of(Point3::new(-16.1, 0.0, 5.0), dims), Point3::new(-2, 0, 0));
    }

    #[test]
    fn construction_queues_the_initial_window() {
        let world = World::new(&config(2, 4)).unwrap();

        assert_eq!(world.active_count(), 0);
        assert_eq!(world.queued_count(), 25);
        assert_eq!(world.queued_positions()[0], Point3::new(-2, 0, -2));
        assert_eq!(world.queued_positions()[1], Point3::new(-2, 0, -1));
        assert_window_covered(&world);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = WorldConfig {
            max_chunks_per_tick: 0,
            ..WorldConfig::default()
        };
        assert!(World::new(&bad).is_err());
    }

    #[test]
    fn materialization_is_fifo_and_bounded() {
        let mut world = World::new(&config(2, 4)).unwrap();
        let expected: Vec<_> = world.queued_positions().into_iter().take(4).collect();

        let update = world.advance(Point3::new(1.0, 0.0, 1.0));

        assert_eq!(update.created, expected);
        assert!(update.evicted.is_empty());
        assert_eq!(world.active_count(), 4);
        assert_eq!(world.queued_count(), 21);
        assert_window_covered(&world);

        for _ in 0..6 {
            world.advance(Point3::new(1.0, 0.0, 1.0));
            assert_window_covered(&world);
        }
        assert_eq!(world.active_count(), 25);
        assert_eq!(world.queued_count(), 0);
        assert!(world.advance(Point3::new(2.0, 0.0, 3.0)).is_empty());
    }

    #[test]
    fn moving_one_chunk_streams_one_column() {
        let mut world = World::new(&config(1, 9)).unwrap();

        let first = world.advance(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(first.created.len(), 9);
        assert_eq!(world.active_count(), 9);

        // Chunk (1, 0, 0) with 4-voxel chunks
        let update = world.advance(Point3::new(5.0, 0.0, 1.0));

        assert_eq!(
            update.created,
            vec![Point3::new(2, 0, -1), Point3::new(2, 0, 0), Point3::new(2, 0, 1)]
        );
        assert_eq!(
            update.evicted,
            vec![Point3::new(-1, 0, -1), Point3::new(-1, 0, 0), Point3::new(-1, 0, 1)]
        );
        assert_eq!(world.active_count(), 9);
        assert_eq!(world.chunk_state(Point3::new(-1, 0, 0)), ChunkState::Unseen);
        assert_eq!(world.chunk_state(Point3::new(2, 0, 0)), ChunkState::Active);
        assert_window_covered(&world);
    }

    #[test]
    fn stale_queue_entries_are_pruned() {
        let mut world = World::new(&config(1, 1)).unwrap();
        world.advance(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(world.chunk_state(Point3::new(-1, 0, -1)), ChunkState::Active);
        assert_eq!(world.chunk_state(Point3::new(1, 0, 1)), ChunkState::Queued);

        // Jump far away: everything old is evicted or dropped
        let update = world.advance(Point3::new(100.0, 0.0, 100.0));
        assert_eq!(update.evicted, vec![Point3::new(-1, 0, -1)]);
        assert_eq!(world.chunk_state(Point3::new(1, 0, 1)), ChunkState::Unseen);
        assert_eq!(world.current_chunk_position(), Point3::new(25, 0, 25));
        assert_window_covered(&world);
    }

    #[test]
    fn failed_generation_is_retried_after_the_next_recompute() {
        let mut cfg = config(1, 9);
        cfg.noise.height_multiplier = f64::NAN;
        let mut world = World::new(&cfg).unwrap();

        let update = world.advance(Point3::new(0.0, 0.0, 0.0));
        assert!(update.created.is_empty());
        assert_eq!(world.queued_count(), 0);
        assert_eq!(world.chunk_state(Point3::new(0, 0, 0)), ChunkState::Unseen);

        world.advance(Point3::new(4.0, 0.0, 0.0));
        assert_eq!(world.chunk_state(Point3::new(0, 0, 0)), ChunkState::Unseen);
        world.update_viewer_position(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(world.chunk_state(Point3::new(0, 0, 0)), ChunkState::Queued);
        assert_eq!(world.queued_count(), 9);
    }

    #[test]
    fn far_viewer_cuts_the_window_at_the_coordinate_limit() {
        let mut world = World::new(&config(2, 4)).unwrap();
        world.advance(Point3::new(0.0, 0.0, 0.0));

        let update = world.advance(Point3::new(1.0e11, 0.0, -1.0e11));

        assert_eq!(world.current_chunk_position(), Point3::new(i32::MAX, 0, i32::MIN));
        assert_eq!(update.evicted.len(), 4);
        // Only x in MAX-2..=MAX and z in MIN..=MIN+2 are representable
        assert_eq!(world.window().len(), 9);
        assert_window_covered(&world);
        assert!(world
            .window()
            .iter()
            .all(|p| p.x >= i32::MAX - 2 && p.z <= i32::MIN + 2));

        // Coming back from the edge evicts everything there
        let update = world.advance(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(update.evicted.len(), 4);
        assert_window_covered(&world);
    }

    #[test]
    fn distance_between_extreme_coordinates_does_not_overflow() {
        assert_eq!(
            chebyshev_distance(Point3::new(i32::MIN, 0, 0), Point3::new(i32::MAX, 0, 0)),
            u32::MAX as i64
        );
        assert_eq!(chebyshev_distance(Point3::new(1, 0, -3), Point3::new(-1, 0, 2)), 5);
    }

    #[test]
    fn world_edits_reach_the_owning_chunk() {
        let mut world = World::new(&config(1, 9)).unwrap();
        world.advance(Point3::new(0.0, 0.0, 0.0));

        let (position, local) = world.locate_voxel(Point3::new(-1, 0, -1));
        assert_eq!(position, Point3::new(-1, 0, -1));
        assert_eq!(local, Point3::new(3, 0, 3));

        let bedrock = world.chunk(position).unwrap().block_at(local).unwrap();
        assert!(world.destroy_voxel_at(Point3::new(-1, 0, -1)));
        assert_eq!(world.chunk(position).unwrap().block_at(local), None);
        assert!(world.place_block_at(Point3::new(-1, 0, -1), bedrock));
        assert_eq!(world.chunk(position).unwrap().block_at(local), Some(bedrock));

        // Not active
        assert!(!world.destroy_voxel_at(Point3::new(40, 0, 0)));
        assert!(!world.place_block_at(Point3::new(40, 0, 0), bedrock));
        // Above the chunk
        assert!(!world.destroy_voxel_at(Point3::new(0, 20, 0)));
    }
}
