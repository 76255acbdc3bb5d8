//! Portable scalar backend. This is the semantic reference for every other tier.

use super::{Backend, BackendKind};
use crate::fp::{floor_clamp0, fma_f32};
use crate::types::{ClipStatus, Primitive, Vertex, Viewport};

/// Plain `f32` arithmetic, one component at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl Backend for Scalar {
    const KIND: BackendKind = BackendKind::Scalar;

    #[inline]
    fn classify<const N: usize>(prim: &[Vertex; N]) -> ClipStatus
    where
        [Vertex; N]: Primitive,
    {
        let mut fully = true;
        let mut partial = false;
        for v in prim {
            let front = v.in_front();
            fully &= front && v.in_clip_cube();
            partial |= front;
        }
        ClipStatus::from_flags(fully, partial)
    }

    #[inline]
    fn perspective_divide<const N: usize>(prim: &mut [Vertex; N])
    where
        [Vertex; N]: Primitive,
    {
        for v in prim.iter_mut() {
            let r = 1.0 / v.w;
            v.x *= r;
            v.y *= r;
            v.z *= r;
            v.w = r;
        }
    }

    #[inline]
    fn ndc_to_screen<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
    where
        [Vertex; N]: Primitive,
    {
        let (half_w, half_h) = viewport.half_extents();
        for v in prim.iter_mut() {
            v.x = floor_clamp0(fma_f32(v.x + 1.0, half_w, viewport.origin_x));
            v.y = floor_clamp0(fma_f32(v.y + 1.0, half_h, viewport.origin_y));
        }
    }
}
