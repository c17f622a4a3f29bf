//! # Block Type Module
//!
//! This module defines the descriptor for a single kind of block: its name and
//! the texture-atlas tile used by each of its six faces.

use serde::{Deserialize, Serialize};

use super::block_side::BlockSide;

/// A 2D integer coordinate of a tile inside the square texture atlas.
pub type AtlasCoordinate = [u32; 2];

/// Describes one kind of block in the catalog.
///
/// Descriptors are immutable once the catalog is built and are shared by index
/// from every voxel of that type. Faces that are not specified in configuration
/// use the atlas tile at `[0, 0]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    /// Human-readable name, used only for diagnostics.
    pub name: String,

    /// Atlas tile for the +Y face.
    #[serde(default)]
    pub top: AtlasCoordinate,

    /// Atlas tile for the -Y face.
    #[serde(default)]
    pub bottom: AtlasCoordinate,

    /// Atlas tile for the -X face.
    #[serde(default)]
    pub left: AtlasCoordinate,

    /// Atlas tile for the +X face.
    #[serde(default)]
    pub right: AtlasCoordinate,

    /// Atlas tile for the +Z face.
    #[serde(default)]
    pub front: AtlasCoordinate,

    /// Atlas tile for the -Z face.
    #[serde(default)]
    pub back: AtlasCoordinate,
}

impl BlockType {
    /// Creates a block type that uses the same atlas tile on every face.
    pub fn uniform(name: &str, tile: AtlasCoordinate) -> Self {
        BlockType {
            name: name.to_string(),
            top: tile,
            bottom: tile,
            left: tile,
            right: tile,
            front: tile,
            back: tile,
        }
    }

    /// Returns the atlas tile used for the given face.
    pub fn atlas_coordinate(&self, side: BlockSide) -> AtlasCoordinate {
        match side {
            BlockSide::BACK => self.back,
            BlockSide::FRONT => self.front,
            BlockSide::TOP => self.top,
            BlockSide::BOTTOM => self.bottom,
            BlockSide::LEFT => self.left,
            BlockSide::RIGHT => self.right,
        }
    }
}

/// The block types used when no catalog is configured, one per terrain band:
/// bedrock, stone, dirt, grass.
pub fn default_block_types() -> Vec<BlockType> {
    vec![
        BlockType::uniform("bedrock", [0, 0]),
        BlockType::uniform("stone", [1, 0]),
        BlockType::uniform("dirt", [2, 0]),
        BlockType {
            name: "grass".to_string(),
            top: [3, 1],
            bottom: [2, 0],
            left: [3, 0],
            right: [3, 0],
            front: [3, 0],
            back: [3, 0],
        },
    ]
}
