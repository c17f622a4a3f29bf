//! # Voxel Terrain Core
//!
//! This module contains the voxel side of the engine: what a voxel is, how
//! terrain is generated, and which chunks exist around the viewer.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block type descriptors, face directions and the shared catalog
//! * **Chunk**: A fixed-size voxel grid together with its cached mesh and edit API
//! * **Terrain**: Layered-noise height generation that fills new chunk grids
//! * **World**: The streaming scheduler owning every active chunk
//!
//! ## Data Flow
//!
//! 1. The world decides which chunk coordinates should exist
//! 2. The terrain generator fills a new chunk's grid
//! 3. The mesher derives the chunk's mesh from its grid
//! 4. Edits mutate a chunk's grid and rebuild its mesh in place
//! 5. Chunks leaving the window are dropped with their mesh
//!
//! ## Thread Safety
//!
//! Everything here runs on the caller's thread. The block catalog is immutable
//! and shared through an `Arc`; all other state is exclusively owned.

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
