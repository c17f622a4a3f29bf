//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's voxel grid into a triangle mesh using
//! face-exposure culling:
//!
//! 1. Every occupied cell is visited in the fixed chunk-iteration order
//! 2. For each of the six sides, the neighbor cell in that direction is tested
//! 3. A quad is emitted when the neighbor is empty or lies outside the grid
//!
//! Neighbors outside the grid are never looked up in adjacent chunks, so faces
//! on chunk borders are always emitted.
//!
//! # Performance Considerations
//! - Occupancy tests only read the grid's solidity bit vector
//! - One quad per exposed unit face, with no merging of coplanar faces
//! - The whole mesh is rebuilt on every grid change

use cgmath::Point3;

mod mesh;

pub use mesh::*;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockCatalog},
    chunk::{chunk_iteration::ChunkBlockIterator, voxel_grid::VoxelGrid},
};

/// Builds the mesh of a voxel grid.
///
/// This is a pure function of its inputs: identical grids produce identical
/// meshes, including vertex and index order.
///
/// # Arguments
/// * `grid` - The voxel grid to mesh
/// * `catalog` - The block catalog the grid's blocks refer to, used for UVs
/// * `atlas_size` - Number of tiles along each edge of the square texture atlas
///
/// # Returns
/// A `Mesh` with positions, indices, UVs and recalculated normals.
pub fn build_mesh(grid: &VoxelGrid, catalog: &BlockCatalog, atlas_size: u32) -> Mesh {
    let mut mesh = Mesh::new();

    for (position, block) in ChunkBlockIterator::new(grid) {
        let cell = Point3::new(position.x as i32, position.y as i32, position.z as i32);

        for side in BlockSide::all() {
            if !is_face_exposed(grid, cell, side) {
                continue;
            }

            let face = Face::new(position, side);
            let uvs = Face::uvs(catalog.atlas_coordinate(block, side), atlas_size);
            mesh.add_face(&face, uvs);
        }
    }

    mesh.recalculate_normals();
    mesh
}

/// Whether the `side` face of the voxel at `cell` is visible.
///
/// A face is visible when the neighbor in that direction is air or outside the
/// grid.
pub fn is_face_exposed(grid: &VoxelGrid, cell: Point3<i32>, side: BlockSide) -> bool {
    !grid.is_solid(cell + side.offset())
}
