//! Zero-copy views of packed xyzw float buffers.
//!
//! Vertex shaders commonly write clip-space output into a flat `f32` buffer.
//! These helpers reinterpret such a buffer as vertices or primitives in place.

use bytemuck::Pod;

use crate::error::TransformError;
use crate::types::{Primitive, Vertex};

const VERTEX_FLOATS: usize = 4;

/// View `[x0, y0, z0, w0, x1, ...]` as vertices.
pub fn vertices_from_floats(floats: &[f32]) -> Result<&[Vertex], TransformError> {
    bytemuck::try_cast_slice(floats).map_err(|_| TransformError::MisalignedBuffer {
        len: floats.len(),
        stride: VERTEX_FLOATS,
    })
}

/// Mutable variant of [`vertices_from_floats`].
pub fn vertices_from_floats_mut(floats: &mut [f32]) -> Result<&mut [Vertex], TransformError> {
    let len = floats.len();
    bytemuck::try_cast_slice_mut(floats).map_err(|_| TransformError::MisalignedBuffer {
        len,
        stride: VERTEX_FLOATS,
    })
}

/// View a packed float buffer as primitives of `N` vertices each.
pub fn primitives_from_floats_mut<const N: usize>(
    floats: &mut [f32],
) -> Result<&mut [[Vertex; N]], TransformError>
where
    [Vertex; N]: Primitive + Pod,
{
    let len = floats.len();
    bytemuck::try_cast_slice_mut(floats).map_err(|_| TransformError::MisalignedBuffer {
        len,
        stride: VERTEX_FLOATS * N,
    })
}

/// View vertices back as packed floats.
pub fn floats_from_vertices(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_view() {
        let floats = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let verts = vertices_from_floats(&floats).unwrap();
        assert_eq!(verts.len(), 2);
        assert_eq!(verts[1], Vertex::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(floats_from_vertices(verts), &floats[..]);
    }

    #[test]
    fn test_vertices_view_rejects_partial_vertex() {
        let floats = [0.0f32; 7];
        assert_eq!(
            vertices_from_floats(&floats),
            Err(TransformError::MisalignedBuffer { len: 7, stride: 4 })
        );
    }

    #[test]
    fn test_mut_view_writes_through() {
        let mut floats = [0.0f32; 4];
        vertices_from_floats_mut(&mut floats).unwrap()[0].w = 2.0;
        assert_eq!(floats[3], 2.0);
    }

    #[test]
    fn test_primitives_view() {
        let mut floats = [0.0f32; 24];
        {
            let tris = primitives_from_floats_mut::<3>(&mut floats).unwrap();
            assert_eq!(tris.len(), 2);
            tris[1][2].x = 9.0;
        }
        assert_eq!(floats[20], 9.0);

        let err = primitives_from_floats_mut::<3>(&mut floats[..16]).unwrap_err();
        assert_eq!(err, TransformError::MisalignedBuffer { len: 16, stride: 12 });

        assert_eq!(primitives_from_floats_mut::<2>(&mut floats).unwrap().len(), 3);
    }
}
