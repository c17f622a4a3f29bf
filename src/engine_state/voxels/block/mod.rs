//! # Block Module
//!
//! This module provides the block-related data of the voxel engine: face
//! directions, block type descriptors, the compact per-voxel block reference and
//! the immutable catalog those references point into.

use block_side::BlockSide;
use block_type::{AtlasCoordinate, BlockType};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to reference block types in memory.
pub type BlockTypeSize = u16;

/// The number of vertical terrain bands (bedrock, stone, dirt, grass) the
/// terrain generator selects from.
pub const TERRAIN_BAND_COUNT: usize = 4;

/// Represents the contents of a single occupied voxel.
///
/// This is a lightweight reference into a [`BlockCatalog`]. The block
/// properties themselves are looked up from the catalog.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps a consistent layout so grids can be handed
/// to a GPU or serialized byte-for-byte.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Index of this block's type in the catalog.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// Creates a block referencing the catalog entry at `index`.
    pub fn new(index: BlockTypeSize) -> Self {
        Block { block_type: index }
    }

    /// The catalog index as a `usize`.
    pub fn index(&self) -> usize {
        self.block_type as usize
    }
}

/// A voxel is either empty (air) or references a block type.
pub type Voxel = Option<Block>;

/// An ordered, immutable list of block types.
///
/// The catalog is built once at startup and then shared read-only (usually
/// behind an `Arc`) by the terrain generator, the mesher and every chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockCatalog {
    block_types: Vec<BlockType>,
}

impl BlockCatalog {
    /// Creates a catalog from an ordered list of block types.
    pub fn new(block_types: Vec<BlockType>) -> Self {
        BlockCatalog { block_types }
    }

    /// Number of block types in the catalog.
    pub fn len(&self) -> usize {
        self.block_types.len()
    }

    /// Whether the catalog has no block types at all.
    pub fn is_empty(&self) -> bool {
        self.block_types.is_empty()
    }

    /// Looks up the descriptor a block refers to.
    pub fn get(&self, block: Block) -> Option<&BlockType> {
        self.block_types.get(block.index())
    }

    /// Whether `block` refers to an entry of this catalog.
    pub fn contains(&self, block: Block) -> bool {
        block.index() < self.block_types.len()
    }

    /// Returns a reference to the catalog entry at `index`, clamped into the
    /// catalog length.
    ///
    /// # Returns
    /// `None` only when the catalog is empty.
    pub fn clamped(&self, index: usize) -> Option<Block> {
        let last = self.block_types.len().checked_sub(1)?;
        Some(Block::new(index.min(last) as BlockTypeSize))
    }

    /// Atlas tile used by the given face of a block. Unknown blocks fall back
    /// to the tile at `[0, 0]`.
    pub fn atlas_coordinate(&self, block: Block, side: BlockSide) -> AtlasCoordinate {
        self.get(block)
            .map(|block_type| block_type.atlas_coordinate(side))
            .unwrap_or([0, 0])
    }

    /// Finds the first block type with the given name.
    pub fn find(&self, name: &str) -> Option<Block> {
        self.block_types
            .iter()
            .position(|block_type| block_type.name == name)
            .map(|index| Block::new(index as BlockTypeSize))
    }

    /// Iterates over all block types in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.block_types.iter()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        BlockCatalog::new(block_type::default_block_types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_never_leaves_the_catalog() {
        let catalog = BlockCatalog::new(vec![
            BlockType::uniform("bedrock", [0, 0]),
            BlockType::uniform("stone", [1, 0]),
        ]);
        assert_eq!(catalog.clamped(0), Some(Block::new(0)));
        assert_eq!(catalog.clamped(3), Some(Block::new(1)));
        assert_eq!(catalog.clamped(usize::MAX), Some(Block::new(1)));
        assert_eq!(BlockCatalog::new(Vec::new()).clamped(0), None);
    }

    #[test]
    fn default_catalog_names_the_terrain_bands() {
        let catalog = BlockCatalog::default();
        assert_eq!(catalog.len(), TERRAIN_BAND_COUNT);
        assert_eq!(catalog.find("bedrock"), Some(Block::new(0)));
        assert_eq!(catalog.find("grass"), Some(Block::new(3)));
        assert_eq!(catalog.find("lava"), None);
    }

    #[test]
    fn unknown_block_uses_origin_tile() {
        let catalog = BlockCatalog::default();
        assert!(!catalog.contains(Block::new(42)));
        assert_eq!(catalog.atlas_coordinate(Block::new(42), BlockSide::TOP), [0, 0]);
    }
}
