//! SSE backend (4 lanes).
//!
//! A vertex fits exactly in one `__m128` (x, y, z, w). Division packs the w of
//! every vertex of the primitive into one register so a single reciprocal
//! serves the whole point/line/triangle. Screen mapping packs the x/y of two
//! vertices per register.
//!
//! Tiers within this backend are chosen by `cfg(target_feature)`:
//! FMA fuses the Newton-Raphson step and the viewport multiply-add, SSE4.1
//! provides a native floor, plain SSE2 emulates it.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::{Backend, BackendKind};
use crate::types::{ClipStatus, Primitive, Vertex, Viewport};

/// SSE backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sse;

const KIND: BackendKind = if cfg!(all(feature = "fma", target_feature = "fma")) {
    BackendKind::SseFma
} else if cfg!(target_feature = "sse4.1") {
    BackendKind::Sse41
} else {
    BackendKind::Sse2
};

#[inline(always)]
fn load(v: &Vertex) -> __m128 {
    let a: &[f32; 4] = bytemuck::cast_ref(v);
    unsafe { _mm_loadu_ps(a.as_ptr()) }
}

#[inline(always)]
fn store(v: &mut Vertex, r: __m128) {
    let a: &mut [f32; 4] = bytemuck::cast_mut(v);
    unsafe { _mm_storeu_ps(a.as_mut_ptr(), r) }
}

#[inline(always)]
fn mul_add(a: __m128, b: __m128, c: __m128) -> __m128 {
    #[cfg(all(feature = "fma", target_feature = "fma"))]
    unsafe {
        _mm_fmadd_ps(a, b, c)
    }
    #[cfg(not(all(feature = "fma", target_feature = "fma")))]
    unsafe {
        _mm_add_ps(_mm_mul_ps(a, b), c)
    }
}

/// `1 / w`, lane-wise, as an exact packed divide.
#[cfg(not(feature = "fast-rcp"))]
#[inline(always)]
fn recip(w: __m128) -> __m128 {
    unsafe { _mm_div_ps(_mm_set1_ps(1.0), w) }
}

/// `1 / w`, lane-wise: the ~12-bit hardware estimate refined by one
/// Newton-Raphson step, `r1 = r0 * (2 - w * r0)`.
///
/// `rcpps` flushes to 0 for |w| >= 2^126 and returns inf for subnormal w,
/// and neither can be refined. Those lanes take the exact quotient.
#[cfg(feature = "fast-rcp")]
#[inline(always)]
fn recip(w: __m128) -> __m128 {
    unsafe {
        let r0 = _mm_rcp_ps(w);
        let r1 = refine(w, r0);

        let abs = _mm_and_ps(r0, _mm_castsi128_ps(_mm_set1_epi32(0x7FFF_FFFF)));
        let unrefinable = _mm_or_ps(
            _mm_cmpeq_ps(abs, _mm_setzero_ps()),
            _mm_cmpeq_ps(abs, _mm_set1_ps(f32::INFINITY)),
        );
        if _mm_movemask_ps(unrefinable) == 0 {
            return r1;
        }
        let exact = _mm_div_ps(_mm_set1_ps(1.0), w);
        _mm_or_ps(
            _mm_and_ps(unrefinable, exact),
            _mm_andnot_ps(unrefinable, r1),
        )
    }
}

#[cfg(all(feature = "fast-rcp", feature = "fma", target_feature = "fma"))]
#[inline(always)]
fn refine(w: __m128, r0: __m128) -> __m128 {
    unsafe {
        let e = _mm_fnmadd_ps(w, r0, _mm_set1_ps(1.0));
        _mm_fmadd_ps(r0, e, r0)
    }
}

#[cfg(all(
    feature = "fast-rcp",
    not(all(feature = "fma", target_feature = "fma"))
))]
#[inline(always)]
fn refine(w: __m128, r0: __m128) -> __m128 {
    unsafe { _mm_mul_ps(r0, _mm_sub_ps(_mm_set1_ps(2.0), _mm_mul_ps(w, r0))) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn floor(x: __m128) -> __m128 {
    unsafe { _mm_floor_ps(x) }
}

/// SSE2 floor: truncate through i32, step down where truncation rounded up.
///
/// Lanes with |x| >= 2^23 are already integral (or inf) and would overflow
/// the i32 conversion, so they pass through unchanged. NaN lanes come out as
/// `i32::MIN as f32`; the caller's clamp at 0 absorbs them.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn floor(x: __m128) -> __m128 {
    unsafe {
        let trunc = _mm_cvtepi32_ps(_mm_cvttps_epi32(x));
        let step = _mm_and_ps(_mm_cmplt_ps(x, trunc), _mm_set1_ps(1.0));
        let floored = _mm_sub_ps(trunc, step);

        let abs = _mm_and_ps(x, _mm_castsi128_ps(_mm_set1_epi32(0x7FFF_FFFF)));
        let integral = _mm_cmpge_ps(abs, _mm_set1_ps(8_388_608.0));
        _mm_or_ps(_mm_and_ps(integral, x), _mm_andnot_ps(integral, floored))
    }
}

impl Backend for Sse {
    const KIND: BackendKind = KIND;

    #[inline]
    fn classify<const N: usize>(prim: &[Vertex; N]) -> ClipStatus
    where
        [Vertex; N]: Primitive,
    {
        let mut fully = true;
        let mut partial = false;
        unsafe {
            let zero = _mm_setzero_ps();
            for v in prim {
                let p = load(v);
                let w = _mm_shuffle_ps(p, p, 0xFF);
                let neg_w = _mm_sub_ps(zero, w);
                let inside = _mm_and_ps(_mm_cmple_ps(p, w), _mm_cmpge_ps(p, neg_w));
                let front = _mm_cmpgt_ps(w, zero);
                // Lanes x, y, z must be inside; every lane of `front` is the same bit.
                let inside_front = _mm_movemask_ps(_mm_and_ps(inside, front)) & 0b0111;
                fully &= inside_front == 0b0111;
                partial |= _mm_movemask_ps(front) != 0;
            }
        }
        ClipStatus::from_flags(fully, partial)
    }

    #[inline]
    fn perspective_divide<const N: usize>(prim: &mut [Vertex; N])
    where
        [Vertex; N]: Primitive,
    {
        let mut ws = [1.0f32; 4];
        for (slot, v) in ws.iter_mut().zip(prim.iter()) {
            *slot = v.w;
        }
        let mut rs = [0.0f32; 4];
        unsafe {
            let r = recip(_mm_loadu_ps(ws.as_ptr()));
            _mm_storeu_ps(rs.as_mut_ptr(), r);
        }
        for (v, &r) in prim.iter_mut().zip(rs.iter()) {
            let scaled = unsafe { _mm_mul_ps(load(v), _mm_set1_ps(r)) };
            store(v, scaled);
            v.w = r;
        }
    }

    #[inline]
    fn ndc_to_screen<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
    where
        [Vertex; N]: Primitive,
    {
        let (half_w, half_h) = viewport.half_extents();
        let (ox, oy) = (viewport.origin_x, viewport.origin_y);
        unsafe {
            let half = _mm_setr_ps(half_w, half_h, half_w, half_h);
            let origin = _mm_setr_ps(ox, oy, ox, oy);
            let one = _mm_set1_ps(1.0);
            let zero = _mm_setzero_ps();

            // Two vertices' x/y per register: one pass for a point or line, two for a triangle.
            for pair in prim.chunks_mut(2) {
                let mut xy = [0.0f32; 4];
                for (i, v) in pair.iter().enumerate() {
                    xy[2 * i] = v.x;
                    xy[2 * i + 1] = v.y;
                }
                let ndc = _mm_loadu_ps(xy.as_ptr());
                let screen = mul_add(_mm_add_ps(ndc, one), half, origin);
                // maxps returns the second operand for NaN lanes, so NaN clamps to 0.
                let clamped = _mm_max_ps(floor(screen), zero);
                _mm_storeu_ps(xy.as_mut_ptr(), clamped);
                for (i, v) in pair.iter_mut().enumerate() {
                    v.x = xy[2 * i];
                    v.y = xy[2 * i + 1];
                }
            }
        }
    }
}
