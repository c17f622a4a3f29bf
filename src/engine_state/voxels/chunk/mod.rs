//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one fixed-size column of terrain,
//! its voxel grid and the mesh derived from it.
//!
//! ## Mesh Consistency
//!
//! A chunk's mesh always matches its grid once any method returns. Edits go
//! through [`Chunk::destroy_voxel`] and [`Chunk::place_block`], which mutate the
//! grid and rebuild the whole mesh before returning. There is no incremental
//! remeshing and no lookup into neighboring chunks.
//!
//! ### Performance Characteristics
//! - **Solidity Check**: O(1), one bit in the grid's `solid_array`
//! - **Block Lookup**: O(1), direct index into the dense grid
//! - **Edit**: O(chunk volume), a full mesh rebuild

use std::sync::Arc;

use cgmath::{Point3, Vector3};

use super::block::{Block, BlockCatalog, Voxel};
use super::terrain::{GenerationError, TerrainGenerator};
use crate::engine_state::rendering::meshing::{build_mesh, Mesh};
use voxel_grid::VoxelGrid;

pub mod chunk_iteration;
pub mod voxel_grid;

/// A chunk of terrain with its derived mesh.
///
/// Chunks are placed on a horizontal grid: a chunk at coordinate `(cx, 0, cz)`
/// covers world voxels `cx * size.x .. (cx + 1) * size.x` along x, likewise
/// along z, and `0 .. size.y` vertically.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    grid: VoxelGrid,

    /// Cached mesh, replaced on every edit.
    mesh: Mesh,

    catalog: Arc<BlockCatalog>,

    atlas_size: u32,
}

impl Chunk {
    /// Generates the terrain of the chunk at `position` and meshes it.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `dimensions` - Chunk size in voxels
    /// * `generator` - The terrain generator filling the grid
    /// * `catalog` - Shared block catalog
    /// * `atlas_size` - Number of tiles along each edge of the texture atlas
    ///
    /// # Returns
    /// A new `Chunk`, or the generator's error.
    pub fn generate(
        position: Point3<i32>,
        dimensions: Vector3<usize>,
        generator: &TerrainGenerator,
        catalog: Arc<BlockCatalog>,
        atlas_size: u32,
    ) -> Result<Self, GenerationError> {
        let grid = generator.generate(position, dimensions, &catalog)?;
        Ok(Self::from_grid(position, grid, catalog, atlas_size))
    }

    /// Wraps an existing grid in a chunk and builds its mesh.
    pub fn from_grid(
        position: Point3<i32>,
        grid: VoxelGrid,
        catalog: Arc<BlockCatalog>,
        atlas_size: u32,
    ) -> Self {
        let mesh = build_mesh(&grid, &catalog, atlas_size);
        Chunk {
            position,
            grid,
            mesh,
            catalog,
            atlas_size,
        }
    }

    /// World-space position of the chunk's local origin.
    ///
    /// Widened to `i64`, since chunks near the edge of the coordinate range
    /// have origins beyond `i32`.
    pub fn world_origin(&self) -> Vector3<i64> {
        let dimensions = self.grid.dimensions();
        Vector3::new(
            i64::from(self.position.x) * dimensions.x as i64,
            0,
            i64::from(self.position.z) * dimensions.z as i64,
        )
    }

    /// Chunk size in voxels.
    pub fn dimensions(&self) -> Vector3<usize> {
        self.grid.dimensions()
    }

    /// The chunk's voxel grid. Edits go through the chunk so the mesh follows.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The mesh built from the current grid.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Gets the voxel at chunk-local coordinates.
    ///
    /// # Returns
    /// `None` for air and for coordinates outside the chunk.
    pub fn block_at(&self, local: Point3<i32>) -> Voxel {
        self.grid.get(local)
    }

    /// Empties the cell at `local` and rebuilds the mesh.
    ///
    /// Out-of-bounds coordinates are ignored.
    ///
    /// # Returns
    /// `true` if the cell was in bounds and the mesh was rebuilt.
    pub fn destroy_voxel(&mut self, local: Point3<i32>) -> bool {
        if !self.grid.set(local, None) {
            return false;
        }

        self.rebuild_mesh();
        true
    }

    /// Writes `block` into the cell at `local` and rebuilds the mesh.
    ///
    /// Out-of-bounds coordinates and blocks missing from the catalog are
    /// rejected with a warning and leave the chunk untouched.
    ///
    /// # Returns
    /// `true` if the block was placed and the mesh was rebuilt.
    pub fn place_block(&mut self, local: Point3<i32>, block: Block) -> bool {
        if !self.catalog.contains(block) {
            log::warn!(
                "Refusing to place unknown block type {} in chunk {:?}",
                block.block_type,
                self.position
            );
            return false;
        }

        if !self.grid.set(local, Some(block)) {
            log::warn!(
                "Refusing to place block at {:?}, outside chunk {:?} of size {:?}",
                local,
                self.position,
                self.grid.dimensions()
            );
            return false;
        }

        self.rebuild_mesh();
        true
    }

    fn rebuild_mesh(&mut self) {
        self.mesh = build_mesh(&self.grid, &self.catalog, self.atlas_size);
        log::trace!(
            "Rebuilt mesh of chunk {:?}: {} faces",
            self.position,
            self.mesh.face_count()
        );
    }
}
