//! Mesh data structures for chunk rendering and collision.
//!
//! A [`Mesh`] stores separate vertex, index, UV and normal streams. Faces are
//! appended one at a time by the mesher; normals are recomputed from the final
//! triangle list rather than authored per face.

use cgmath::{InnerSpace, Vector2, Vector3, Zero};

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// The triangle mesh derived from a chunk's voxel grid.
///
/// Positions are in chunk-local space. Every emitted face contributes exactly
/// four vertices, four UVs and six indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in chunk-local space
    pub positions: Vec<Vector3<f32>>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    /// One atlas texture coordinate per vertex
    pub uvs: Vec<Vector2<f32>>,
    /// One normal per vertex, recomputed from the triangles
    pub normals: Vec<Vector3<f32>>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends a face with its texture coordinates.
    ///
    /// The indices are offset by the number of vertices already in the mesh.
    pub fn add_face(&mut self, face: &Face, uvs: [Vector2<f32>; 4]) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&face.corners);
        self.indices
            .extend(Face::INDEX_PATTERN.iter().map(|index| base + index));
        self.uvs.extend_from_slice(&uvs);
    }

    /// Recomputes per-vertex normals from the triangle list.
    ///
    /// Each vertex normal is the normalized sum of the normals of every
    /// triangle that references it. Vertices referenced by no triangle get a
    /// zero normal.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vector3::zero(); self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|index| index as usize);
            let edge_ab = self.positions[b] - self.positions[a];
            let edge_ac = self.positions[c] - self.positions[a];
            let face_normal = edge_ab.cross(edge_ac);

            normals[a] += face_normal;
            normals[b] += face_normal;
            normals[c] += face_normal;
        }

        for normal in normals.iter_mut() {
            if normal.magnitude2() > 0.0 {
                *normal = normal.normalize();
            }
        }

        self.normals = normals;
    }

    /// Interleaves the position, normal and UV streams for upload.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .zip(self.uvs.iter())
            .map(|((position, normal), uv)| Vertex::new(*position, *normal, *uv))
            .collect()
    }
}
