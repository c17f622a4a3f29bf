//! Vertex data structures for handing chunk meshes to a rendering backend.
//!
//! The mesher produces separate position, normal and UV streams. Backends that
//! want a single interleaved buffer can use [`Vertex`], which is `Pod` and can be
//! uploaded with `bytemuck::cast_slice`.

use cgmath::{Vector2, Vector3};

/// An interleaved chunk-mesh vertex.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward normal
    pub normal: [f32; 3],
    /// UV texture coordinates inside the atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex from its position, normal and texture coordinate.
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tex_coords: uv.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);

        let vertex = Vertex::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector2::new(0.25, 0.5),
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.5]);
    }
}
