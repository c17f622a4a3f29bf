//! # Chunk Iteration Module
//!
//! This module provides an iterator that walks every occupied cell of a voxel
//! grid in the fixed order the mesher relies on: x outermost, then z, then y
//! innermost. Air cells are skipped.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::voxel_grid::VoxelGrid;

/// An iterator over all non-air cells of a grid.
///
/// The cursor advances through `(x, z, y)` with `y` varying fastest, so the
/// order of yielded cells (and therefore the layout of a mesh built from them)
/// is identical for identical grids.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the grid being iterated over
    grid_ref: &'a VoxelGrid,
    /// Current X position within the grid
    local_x: usize,
    /// Current Y position within the grid
    local_y: usize,
    /// Current Z position within the grid
    local_z: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned at the origin cell.
    pub fn new(grid_ref: &'a VoxelGrid) -> Self {
        ChunkBlockIterator {
            grid_ref,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Moves the cursor one cell forward.
    ///
    /// # Returns
    /// `false` once the cursor has moved past the last cell.
    fn step(&mut self) -> bool {
        let dimensions = self.grid_ref.dimensions();

        self.local_y += 1;
        if self.local_y < dimensions.y {
            return true;
        }

        // End of column
        self.local_y = 0;
        self.local_z += 1;
        if self.local_z < dimensions.z {
            return true;
        }

        // End of slice
        self.local_z = 0;
        self.local_x += 1;
        self.local_x < dimensions.x
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        let dimensions = self.grid_ref.dimensions();
        if dimensions.x == 0 || dimensions.y == 0 || dimensions.z == 0 {
            return None;
        }

        while self.local_x < dimensions.x {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            let voxel = self
                .grid_ref
                .get_local(self.local_x, self.local_y, self.local_z);

            if !self.step() {
                // Park the cursor past the end
                self.local_x = dimensions.x;
            }

            if let Some(block) = voxel {
                return Some((position, block));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn skips_air_and_visits_y_innermost() {
        let mut grid = VoxelGrid::new(Vector3::new(2, 3, 2));
        grid.set_local(1, 0, 0, Some(Block::new(1)));
        grid.set_local(0, 2, 0, Some(Block::new(2)));
        grid.set_local(0, 0, 1, Some(Block::new(3)));
        grid.set_local(0, 1, 0, Some(Block::new(4)));

        let visited: Vec<_> = ChunkBlockIterator::new(&grid).collect();

        assert_eq!(
            visited,
            vec![
                (Point3::new(0, 1, 0), Block::new(4)),
                (Point3::new(0, 2, 0), Block::new(2)),
                (Point3::new(0, 0, 1), Block::new(3)),
                (Point3::new(1, 0, 0), Block::new(1)),
            ]
        );
    }

    #[test]
    fn empty_grid_yields_nothing() {
        let grid = VoxelGrid::new(Vector3::new(3, 3, 3));
        assert_eq!(ChunkBlockIterator::new(&grid).count(), 0);

        let degenerate = VoxelGrid::new(Vector3::new(0, 3, 3));
        assert_eq!(ChunkBlockIterator::new(&degenerate).count(), 0);
    }
}
