//! Floating-point helpers (feature-gated).
//!
//! Fusion is only enabled when the `fma` feature is on AND the target has
//! hardware FMA, so the scalar and vector backends always round the same way.

/// True when multiply-adds are fused in this build.
pub(crate) const FUSED: bool = cfg!(all(feature = "fma", target_feature = "fma"));

#[inline(always)]
pub(crate) fn fma_f32(a: f32, b: f32, c: f32) -> f32 {
    #[cfg(all(feature = "fma", target_feature = "fma"))]
    {
        a.mul_add(b, c)
    }
    #[cfg(not(all(feature = "fma", target_feature = "fma")))]
    {
        a * b + c
    }
}

/// `max(floor(v), 0)`. NaN maps to 0.
#[inline(always)]
pub(crate) fn floor_clamp0(v: f32) -> f32 {
    v.floor().max(0.0)
}
