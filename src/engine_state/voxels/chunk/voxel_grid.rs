//! # Voxel Grid Module
//!
//! This module provides the dense voxel storage owned by a chunk.
//!
//! ## Storage
//!
//! The `VoxelGrid` keeps two structures in lockstep:
//! 1. A vector (`voxels`) holding the optional block reference of every cell
//! 2. A bit vector (`solid_array`) with one bit per cell marking occupancy
//!
//! The bit vector answers the neighbor-occupancy queries of the mesher without
//! touching block data. Every mutation goes through [`VoxelGrid::set`], which
//! updates both structures together.
//!
//! Cells are laid out with x varying fastest, then y, then z.

use bitvec::vec::BitVec;
use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::Voxel;

/// A dense, fixed-size 3D array of voxels.
///
/// The dimensions are fixed at construction and never change.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Number of cells along each axis
    dimensions: Vector3<usize>,
    /// One bit per cell, set when the cell holds a block
    solid_array: BitVec,
    /// The block reference of every cell, `None` for air
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Creates a grid of the given dimensions filled with air.
    pub fn new(dimensions: Vector3<usize>) -> Self {
        let volume = dimensions.x * dimensions.y * dimensions.z;
        VoxelGrid {
            dimensions,
            solid_array: BitVec::repeat(false, volume),
            voxels: vec![None; volume],
        }
    }

    /// Number of cells along each axis.
    pub fn dimensions(&self) -> Vector3<usize> {
        self.dimensions
    }

    /// Total number of cells.
    pub fn volume(&self) -> usize {
        self.voxels.len()
    }

    /// Number of occupied cells.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Whether `position` lies inside `[0, size)` on every axis.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.index_of(position).is_some()
    }

    fn index_of(&self, position: Point3<i32>) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        let z = usize::try_from(position.z).ok()?;
        if x >= self.dimensions.x || y >= self.dimensions.y || z >= self.dimensions.z {
            return None;
        }
        Some(self.local_index(x, y, z))
    }

    #[inline]
    fn local_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dimensions.x * (y + self.dimensions.y * z)
    }

    /// Gets the voxel at `position`.
    ///
    /// # Returns
    /// `None` for air and for positions outside the grid.
    pub fn get(&self, position: Point3<i32>) -> Voxel {
        self.index_of(position).and_then(|index| self.voxels[index])
    }

    /// Gets the voxel at an in-range `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.local_index(x, y, z)]
    }

    /// Checks if the cell at `position` holds a block.
    ///
    /// # Returns
    /// `false` if the cell is air or out of bounds.
    pub fn is_solid(&self, position: Point3<i32>) -> bool {
        self.index_of(position)
            .map(|index| self.solid_array[index])
            .unwrap_or(false)
    }

    /// Writes `voxel` into the cell at `position`.
    ///
    /// # Returns
    /// `false` without touching the grid if `position` is out of bounds.
    pub fn set(&mut self, position: Point3<i32>, voxel: Voxel) -> bool {
        match self.index_of(position) {
            Some(index) => {
                self.write(index, voxel);
                true
            }
            None => false,
        }
    }

    /// Writes `voxel` into an in-range `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        let index = self.local_index(x, y, z);
        self.write(index, voxel);
    }

    fn write(&mut self, index: usize, voxel: Voxel) {
        self.voxels[index] = voxel;
        self.solid_array.set(index, voxel.is_some());
    }
}
