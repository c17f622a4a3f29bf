//! Mesh data structures for voxel rendering.
//!
//! This module provides the building blocks the chunk mesher assembles its
//! output from.
//!
//! # Architecture
//! - [`Mesh`]: vertex positions, triangle indices, UVs and recomputed normals
//! - [`Face`]: a single unit quad on one side of a voxel, with its fixed
//!   corner and index patterns
//!
//! Every exposed unit face becomes its own quad. Adjacent coplanar faces are
//! never merged.

mod face;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::Face;
pub use mesh::*;
