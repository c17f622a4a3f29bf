//! Rendering data for the voxel engine.
//!
//! This module turns chunk voxel grids into meshes. It owns no GPU state: the
//! host hands each chunk's [`meshing::Mesh`] (or its interleaved [`Vertex`]
//! form) to whatever rendering or collision backend it uses.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
