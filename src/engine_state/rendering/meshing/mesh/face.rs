use cgmath::{Point3, Vector2, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::AtlasCoordinate};

/// Represents a single unit quad on one side of a voxel.
///
/// The four corners are stored in emission order. Together with the fixed
/// index pattern of [`Face::INDEX_PATTERN`] they form two triangles whose
/// winding faces outward along the side's normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners in chunk-local space
    pub corners: [Vector3<f32>; 4],
    /// Which side of the voxel this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Index pattern of the two triangles over the four corners.
    pub const INDEX_PATTERN: [u32; 6] = [0, 2, 1, 2, 3, 1];

    /// UV offsets of the four corners, in tiles.
    pub const UV_PATTERN: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

    /// Creates the face on `block_side` of the voxel whose minimum corner is at
    /// `position`.
    pub fn new(position: Point3<usize>, block_side: BlockSide) -> Self {
        let origin = Vector3::new(position.x as f32, position.y as f32, position.z as f32);
        let corner = |x: f32, y: f32, z: f32| origin + Vector3::new(x, y, z);

        let corners = match block_side {
            BlockSide::BACK => [
                corner(0.0, 0.0, 0.0),
                corner(1.0, 0.0, 0.0),
                corner(0.0, 1.0, 0.0),
                corner(1.0, 1.0, 0.0),
            ],

            BlockSide::FRONT => [
                corner(1.0, 0.0, 1.0),
                corner(0.0, 0.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(0.0, 1.0, 1.0),
            ],

            BlockSide::TOP => [
                corner(0.0, 1.0, 0.0),
                corner(1.0, 1.0, 0.0),
                corner(0.0, 1.0, 1.0),
                corner(1.0, 1.0, 1.0),
            ],

            BlockSide::BOTTOM => [
                corner(0.0, 0.0, 1.0),
                corner(1.0, 0.0, 1.0),
                corner(0.0, 0.0, 0.0),
                corner(1.0, 0.0, 0.0),
            ],

            BlockSide::LEFT => [
                corner(0.0, 0.0, 1.0),
                corner(0.0, 0.0, 0.0),
                corner(0.0, 1.0, 1.0),
                corner(0.0, 1.0, 0.0),
            ],

            BlockSide::RIGHT => [
                corner(1.0, 0.0, 0.0),
                corner(1.0, 0.0, 1.0),
                corner(1.0, 1.0, 0.0),
                corner(1.0, 1.0, 1.0),
            ],
        };

        Face {
            corners,
            block_side,
        }
    }

    /// Computes the texture coordinates of the four corners.
    ///
    /// # Arguments
    /// * `atlas_coordinate` - The atlas tile of this face
    /// * `atlas_size` - Number of tiles along each edge of the square atlas
    pub fn uvs(atlas_coordinate: AtlasCoordinate, atlas_size: u32) -> [Vector2<f32>; 4] {
        let tile_size = 1.0 / atlas_size.max(1) as f32;
        let offset = Vector2::new(
            atlas_coordinate[0] as f32 * tile_size,
            atlas_coordinate[1] as f32 * tile_size,
        );

        Self::UV_PATTERN.map(|[u, v]| Vector2::new(u, v) * tile_size + offset)
    }
}
