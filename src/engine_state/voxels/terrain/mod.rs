//! # Terrain Module
//!
//! Procedural terrain generation for chunks.
//!
//! Each column of a chunk gets a surface height from layered Perlin noise sampled
//! at the column's world coordinates. Cells at or below that height are filled
//! with a block chosen by vertical band:
//!
//! | y            | band      |
//! |--------------|-----------|
//! | 0            | bedrock   |
//! | 1 to 9       | stone     |
//! | 10           | dirt      |
//! | 11 and 12    | catalog entry `y`, clamped to the catalog |
//! | 13 and above | grass     |
//!
//! Generation is a pure function of the chunk coordinate, the chunk dimensions,
//! the catalog and the noise parameters. Chunks can be generated in any order
//! and regenerated at will with identical results.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use cgmath::{Point3, Vector3};
use noise::{NoiseFn, Perlin};

use crate::config::NoiseParameters;
use crate::engine_state::voxels::block::BlockCatalog;
use crate::engine_state::voxels::chunk::voxel_grid::VoxelGrid;

/// Generates chunk voxel grids from layered 2D Perlin noise.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    parameters: NoiseParameters,
    perlin: Perlin,
    seed: u32,
}

impl TerrainGenerator {
    /// Creates a generator for the given noise parameters.
    ///
    /// If the parameters carry no seed, one is drawn at random and logged so a
    /// session can be reproduced.
    pub fn new(parameters: NoiseParameters) -> Self {
        let seed = match parameters.seed {
            Some(seed) => seed,
            None => {
                let seed = fastrand::u32(..);
                log::info!("No terrain seed configured, using random seed {}", seed);
                seed
            }
        };

        TerrainGenerator {
            perlin: Perlin::new(seed),
            parameters,
            seed,
        }
    }

    /// The Perlin seed in use.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The noise parameters, with the seed as configured.
    pub fn parameters(&self) -> &NoiseParameters {
        &self.parameters
    }

    /// Computes the surface height of the column at integer world coordinates
    /// `(world_x, world_z)`.
    ///
    /// The height is the octave sum of unit-range noise, each octave scaled by
    /// the running amplitude, multiplied by the height multiplier.
    pub fn column_height(&self, world_x: f64, world_z: f64) -> f64 {
        let scaled_x = world_x * self.parameters.scale;
        let scaled_z = world_z * self.parameters.scale;

        let mut height = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..self.parameters.num_octaves {
            height += self.unit_noise(scaled_x * frequency, scaled_z * frequency) * amplitude;

            amplitude *= self.parameters.persistence;
            frequency *= self.parameters.lacunarity;
        }

        height * self.parameters.height_multiplier
    }

    /// Perlin noise remapped from `[-1, 1]` into `[0, 1]`.
    fn unit_noise(&self, x: f64, z: f64) -> f64 {
        (self.perlin.get([x, z]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Generates the voxel grid of the chunk at `position`.
    ///
    /// # Arguments
    /// * `position` - Chunk coordinate. Only `x` and `z` influence the result.
    /// * `dimensions` - Chunk size in voxels
    /// * `catalog` - Block catalog the bands index into
    ///
    /// # Returns
    /// The filled grid, or a `GenerationError` if the catalog is empty or a
    /// column height is not a finite number.
    pub fn generate(
        &self,
        position: Point3<i32>,
        dimensions: Vector3<usize>,
        catalog: &BlockCatalog,
    ) -> Result<VoxelGrid, GenerationError> {
        if catalog.is_empty() {
            return Err(GenerationError::EmptyCatalog);
        }

        let mut grid = VoxelGrid::new(dimensions);

        for x in 0..dimensions.x {
            for z in 0..dimensions.z {
                let world_x = position.x as i64 * dimensions.x as i64 + x as i64;
                let world_z = position.z as i64 * dimensions.z as i64 + z as i64;
                let height = self.column_height(world_x as f64, world_z as f64);

                if !height.is_finite() {
                    return Err(GenerationError::NonFiniteHeight {
                        x: world_x,
                        z: world_z,
                        height,
                    });
                }

                for y in 0..dimensions.y {
                    if y as f64 > height {
                        break;
                    }
                    let block = catalog.clamped(select_band(y, catalog.len()));
                    grid.set_local(x, y, z, block);
                }
            }
        }

        Ok(grid)
    }
}

/// Selects the catalog index of a filled cell at height `y`.
///
/// Heights 11 and 12 belong to no band and use the index `y` itself. The result
/// is always clamped into `[0, catalog_len - 1]`.
pub fn select_band(y: usize, catalog_len: usize) -> usize {
    let last = catalog_len.saturating_sub(1);

    let band = match y {
        0 => 0,
        1..=9 => 1,
        10 => 2,
        11 | 12 => y,
        _ => 3,
    };

    band.min(last)
}

/// Errors raised while generating a chunk's terrain.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The catalog has no block types to fill cells with
    EmptyCatalog,
    /// The noise produced a height that is NaN or infinite
    NonFiniteHeight {
        /// World x of the column
        x: i64,
        /// World z of the column
        z: i64,
        /// The offending height
        height: f64,
    },
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyCatalog => write!(f, "Block catalog is empty"),
            GenerationError::NonFiniteHeight { x, z, height } => write!(
                f,
                "Column ({}, {}) has non-finite height {}",
                x, z, height
            ),
        }
    }
}

impl Error for GenerationError {}
