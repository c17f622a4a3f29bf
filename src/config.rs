//! Configuration management for the terrain world.
//!
//! A [`WorldConfig`] is read from a JSON file at startup. Every field has a
//! default, so an empty object (or no file at all) yields the reference
//! configuration: 16x50x16 chunks, a render distance of 2 and a budget of 4
//! new chunks per tick.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::Path;

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::{
    block_type::{default_block_types, BlockType},
    BlockCatalog, TERRAIN_BAND_COUNT,
};

/// Largest number of cells a single chunk may hold.
pub const MAX_CHUNK_VOLUME: usize = 1 << 24;

/// Settings of the streamed world, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Chunk dimensions in voxels, `[x, y, z]`
    #[serde(default = "default_chunk_size")]
    pub chunk_size: [usize; 3],
    /// Chebyshev radius of the streamed window, in chunks
    #[serde(default = "default_render_distance")]
    pub render_distance: u16,
    /// Maximum number of chunks materialized per tick
    #[serde(default = "default_max_chunks_per_tick")]
    pub max_chunks_per_tick: usize,
    /// Terrain height noise
    #[serde(default)]
    pub noise: NoiseParameters,
    /// Number of tiles along each edge of the square texture atlas
    #[serde(default = "default_atlas_size")]
    pub atlas_size: u32,
    /// Ordered block catalog. The first four entries are the terrain bands.
    #[serde(default = "default_block_types")]
    pub block_types: Vec<BlockType>,
    /// Viewer position used for the first window computation
    #[serde(default = "default_viewer_position")]
    pub viewer_position: [f32; 3],
}

/// Parameters of the layered height noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// World-to-noise coordinate scale
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Height in voxels of a unit octave sum
    #[serde(default = "default_height_multiplier")]
    pub height_multiplier: f64,
    /// Number of noise layers summed
    #[serde(default = "default_num_octaves")]
    pub num_octaves: u32,
    /// Amplitude factor between octaves
    #[serde(default = "default_persistence")]
    pub persistence: f64,
    /// Frequency factor between octaves
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f64,
    /// Perlin seed. A random seed is drawn at startup when unset.
    #[serde(default)]
    pub seed: Option<u32>,
}

// Default values
fn default_chunk_size() -> [usize; 3] {
    [16, 50, 16]
}

fn default_render_distance() -> u16 {
    2
}

fn default_max_chunks_per_tick() -> usize {
    4
}

fn default_atlas_size() -> u32 {
    4
}

fn default_viewer_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> f64 {
    0.1
}

fn default_height_multiplier() -> f64 {
    10.0
}

fn default_num_octaves() -> u32 {
    4
}

fn default_persistence() -> f64 {
    0.5
}

fn default_lacunarity() -> f64 {
    2.0
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            render_distance: default_render_distance(),
            max_chunks_per_tick: default_max_chunks_per_tick(),
            noise: NoiseParameters::default(),
            atlas_size: default_atlas_size(),
            block_types: default_block_types(),
            viewer_position: default_viewer_position(),
        }
    }
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            height_multiplier: default_height_multiplier(),
            num_octaves: default_num_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Load and validate configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from `path`, or use the defaults if no file exists
    /// there.
    ///
    /// A file that exists but cannot be read, parsed or validated is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::warn!("No configuration at {}. Using defaults.", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Checks the values that the generator and scheduler rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_extent = i32::MAX as usize;
        let volume = self
            .chunk_size
            .iter()
            .try_fold(1usize, |volume, &extent| volume.checked_mul(extent));
        if self
            .chunk_size
            .iter()
            .any(|&extent| extent == 0 || extent > max_extent)
            || volume.map_or(true, |volume| volume > MAX_CHUNK_VOLUME)
        {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }

        if self.atlas_size == 0 {
            return Err(ConfigError::InvalidAtlasSize(self.atlas_size));
        }

        if self.max_chunks_per_tick == 0 {
            return Err(ConfigError::InvalidChunkBudget(self.max_chunks_per_tick));
        }

        if self.block_types.len() < TERRAIN_BAND_COUNT {
            return Err(ConfigError::CatalogUnderflow {
                len: self.block_types.len(),
                required: TERRAIN_BAND_COUNT,
            });
        }

        Ok(())
    }

    /// `chunk_size` as a vector.
    pub fn chunk_dimensions(&self) -> Vector3<usize> {
        Vector3::from(self.chunk_size)
    }

    /// `viewer_position` as a point.
    pub fn initial_viewer_position(&self) -> Point3<f32> {
        Point3::from(self.viewer_position)
    }

    /// Builds the block catalog described by `block_types`.
    pub fn catalog(&self) -> BlockCatalog {
        BlockCatalog::new(self.block_types.clone())
    }
}

/// Errors raised while loading or validating a [`WorldConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    Io(IoError),
    /// The file is not valid configuration JSON
    Parse(serde_json::Error),
    /// A chunk extent is zero, or the chunk volume is too large
    InvalidChunkSize([usize; 3]),
    /// The atlas has no tiles
    InvalidAtlasSize(u32),
    /// No chunk could ever be generated
    InvalidChunkBudget(usize),
    /// The catalog is shorter than the terrain bands
    CatalogUnderflow {
        /// Number of configured block types
        len: usize,
        /// Number of block types the terrain needs
        required: usize,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(error) => Display::fmt(error, f),
            ConfigError::Parse(error) => write!(f, "Invalid configuration: {}", error),
            ConfigError::InvalidChunkSize(size) => write!(
                f,
                "Chunk size {:?} must be positive on every axis and hold at most {} cells",
                size, MAX_CHUNK_VOLUME
            ),
            ConfigError::InvalidAtlasSize(size) => {
                write!(f, "Atlas size {} must be at least 1", size)
            }
            ConfigError::InvalidChunkBudget(budget) => {
                write!(f, "Chunk budget per tick {} must be at least 1", budget)
            }
            ConfigError::CatalogUnderflow { len, required } => write!(
                f,
                "Block catalog has {} entries but terrain needs at least {}",
                len, required
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(error) => Some(error),
            ConfigError::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<IoError> for ConfigError {
    fn from(x: IoError) -> Self {
        ConfigError::Io(x)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(x: serde_json::Error) -> Self {
        ConfigError::Parse(x)
    }
}
