//! # Engine State Module
//!
//! The host side of the terrain engine: owns the world and drives it one tick
//! at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The tick loop owner, forwarding viewer positions to the world
//! * `rendering` - Mesh construction from chunk voxel grids
//! * `voxels` - Voxel data, chunks, terrain generation and chunk streaming
//!
//! ## Architecture
//!
//! Every tick the host passes the current viewer position to
//! [`EngineState::tick`]. The world recomputes its window when the viewer has
//! changed chunk, then generates a bounded batch of queued chunks. The returned
//! [`StreamingUpdate`] tells the host which chunk meshes to bind and which to
//! release.

use cgmath::Point3;
use web_time::{Duration, Instant};

use voxels::world::{StreamingUpdate, World};

use crate::config::{ConfigError, WorldConfig};

pub mod rendering;
pub mod voxels;

/// Statistics about the most recent tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Number of ticks run so far, including this one
    pub tick: u64,
    /// Chunks created this tick
    pub created: usize,
    /// Chunks evicted this tick
    pub evicted: usize,
    /// Active chunks after the tick
    pub active: usize,
    /// Queued chunks after the tick
    pub queued: usize,
    /// Wall-clock time spent inside the tick
    pub duration: Duration,
}

/// The main state container for the terrain engine.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_terrain::config::WorldConfig;
/// use voxel_terrain::EngineState;
///
/// let mut engine_state = EngineState::new(&WorldConfig::default()).unwrap();
/// let viewer = Point3::new(8.0, 20.0, 8.0);
///
/// while !engine_state.is_settled() {
///     engine_state.tick(viewer);
/// }
/// assert_eq!(engine_state.world().active_count(), 25);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    world: World,
    /// Statistics of the last tick
    last_tick: TickStats,
    /// Total wall-clock time spent in ticks
    total_tick_time: Duration,
    /// When the engine was created
    started_at: Instant,
}

impl EngineState {
    /// Creates the engine state and its world.
    ///
    /// # Returns
    /// The configuration error if `config` fails validation.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;

        Ok(Self {
            world,
            last_tick: TickStats::default(),
            total_tick_time: Duration::ZERO,
            started_at: Instant::now(),
        })
    }

    /// Runs one tick of chunk streaming for the given viewer position.
    ///
    /// # Arguments
    /// * `viewer_position` - The viewer's world-space position this tick
    ///
    /// # Returns
    /// The chunks created and evicted during the tick.
    pub fn tick(&mut self, viewer_position: Point3<f32>) -> StreamingUpdate {
        let tick_start = Instant::now();
        let update = self.world.advance(viewer_position);
        let duration = tick_start.elapsed();

        self.total_tick_time += duration;
        self.last_tick = TickStats {
            tick: self.last_tick.tick + 1,
            created: update.created.len(),
            evicted: update.evicted.len(),
            active: self.world.active_count(),
            queued: self.world.queued_count(),
            duration,
        };

        if !update.is_empty() {
            log::debug!(
                "Tick {}: {} created, {} evicted, {} active, {} queued in {:?}",
                self.last_tick.tick,
                self.last_tick.created,
                self.last_tick.evicted,
                self.last_tick.active,
                self.last_tick.queued,
                duration
            );
        }

        update
    }

    /// Whether every chunk of the current window is active.
    pub fn is_settled(&self) -> bool {
        self.world.queued_count() == 0
    }

    /// The streamed world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for edits.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Statistics of the most recent tick.
    pub fn last_tick(&self) -> TickStats {
        self.last_tick
    }

    /// Wall-clock time spent in all ticks so far.
    pub fn total_tick_time(&self) -> Duration {
        self.total_tick_time
    }

    /// Time since the engine was created.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseParameters;

    fn engine_state() -> EngineState {
        EngineState::new(&WorldConfig {
            chunk_size: [8, 24, 8],
            noise: NoiseParameters {
                seed: Some(2024),
                ..NoiseParameters::default()
            },
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn ticks_are_counted_and_summarized() {
        let mut engine_state = engine_state();
        let viewer = Point3::new(0.0, 0.0, 0.0);

        let update = engine_state.tick(viewer);
        let stats = engine_state.last_tick();
        assert_eq!(stats.tick, 1);
        assert_eq!(stats.created, update.created.len());
        assert_eq!(stats.created, 4);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.queued, 21);

        engine_state.tick(viewer);
        assert_eq!(engine_state.last_tick().tick, 2);
        assert!(engine_state.total_tick_time() >= engine_state.last_tick().duration);
    }

    #[test]
    fn engine_settles_after_enough_ticks() {
        let mut engine_state = engine_state();
        let viewer = Point3::new(3.0, 10.0, 3.0);

        let mut ticks = 0;
        while !engine_state.is_settled() {
            engine_state.tick(viewer);
            ticks += 1;
        }

        // 25 chunks at 4 per tick
        assert_eq!(ticks, 7);
        assert_eq!(engine_state.world().active_count(), 25);
        assert!(engine_state.tick(viewer).is_empty());
    }
}
