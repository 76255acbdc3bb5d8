//! Numerical backends for classification, division and screen mapping.
//!
//! Every backend implements [`Backend`] with associated functions only, so the
//! choice is a type resolved at compile time. [`Active`] names the best backend
//! for the build target, picked in this order:
//!
//! - SSE with hardware FMA (`fma` feature + `target_feature = "fma"`)
//! - SSE4.1 (native packed floor)
//! - SSE2 (emulated packed floor)
//! - [`Scalar`], the portable reference
//!
//! The SSE tiers require the `simd` feature and an x86 target. All tiers produce
//! the same classification and screen mapping, and division results within
//! 1e-5 relative error of the reference (bit-identical unless `fast-rcp` is on).
//!
//! Tiers above SSE2 are chosen from the build's target features, so testing
//! them needs e.g. `RUSTFLAGS="-C target-feature=+sse4.1,+fma"` together with
//! `--features fma`, or `-C target-cpu=native`.

mod scalar;
#[cfg(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
mod sse;

pub use scalar::Scalar;
#[cfg(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub use sse::Sse;

use std::fmt;

use crate::types::{ClipStatus, Primitive, Vertex, Viewport};

/// Backend selected for this build.
#[cfg(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub type Active = Sse;

/// Backend selected for this build.
#[cfg(not(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
)))]
pub type Active = Scalar;

/// Which implementation tier a backend represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Scalar,
    Sse2,
    Sse41,
    SseFma,
}

impl BackendKind {
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Scalar => "scalar",
            BackendKind::Sse2 => "sse2",
            BackendKind::Sse41 => "sse4.1",
            BackendKind::SseFma => "sse+fma",
        }
    }

    /// f32 lanes processed per register.
    pub const fn lanes(self) -> usize {
        match self {
            BackendKind::Scalar => 1,
            BackendKind::Sse2 | BackendKind::Sse41 | BackendKind::SseFma => 4,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tier compiled into [`Active`].
#[inline]
pub const fn active_backend() -> BackendKind {
    Active::KIND
}

/// One implementation of the three post-transform kernels.
///
/// Kernels operate in place on a point, line or triangle. They never allocate
/// or fail; invalid input (w <= 0 into the divider) produces IEEE-754 values.
pub trait Backend {
    const KIND: BackendKind;

    /// Visibility of the primitive against the clip cube.
    fn classify<const N: usize>(prim: &[Vertex; N]) -> ClipStatus
    where
        [Vertex; N]: Primitive;

    /// `x, y, z <- x/w, y/w, z/w` and `w <- 1/w` for every vertex.
    ///
    /// Caller guarantees `w > 0` for every vertex.
    fn perspective_divide<const N: usize>(prim: &mut [Vertex; N])
    where
        [Vertex; N]: Primitive;

    /// NDC x/y to viewport pixels, floored and clamped below at 0.
    fn ndc_to_screen<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
    where
        [Vertex; N]: Primitive;

    /// Division followed by screen mapping.
    #[inline]
    fn project<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
    where
        [Vertex; N]: Primitive,
    {
        Self::perspective_divide(prim);
        Self::ndc_to_screen(prim, viewport);
    }
}

/// Classify a primitive with the [`Active`] backend.
#[inline]
pub fn classify<const N: usize>(prim: &[Vertex; N]) -> ClipStatus
where
    [Vertex; N]: Primitive,
{
    Active::classify(prim)
}

/// Perspective-divide a primitive with the [`Active`] backend.
#[inline]
pub fn perspective_divide<const N: usize>(prim: &mut [Vertex; N])
where
    [Vertex; N]: Primitive,
{
    Active::perspective_divide(prim)
}

/// Map a primitive from NDC to screen space with the [`Active`] backend.
#[inline]
pub fn ndc_to_screen<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
where
    [Vertex; N]: Primitive,
{
    Active::ndc_to_screen(prim, viewport)
}

/// Divide and map a primitive whose vertices all have `w > 0`.
///
/// This is the entry point for primitives coming back from an external
/// clipper. Debug builds assert the `w > 0` precondition.
#[inline]
pub fn project<const N: usize>(prim: &mut [Vertex; N], viewport: &Viewport)
where
    [Vertex; N]: Primitive,
{
    debug_assert!(
        prim.iter().all(Vertex::in_front),
        "perspective divide requires w > 0 for every vertex"
    );
    Active::project(prim, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_kind_matches_build() {
        let kind = active_backend();
        if cfg!(all(
            feature = "simd",
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        )) {
            assert_ne!(kind, BackendKind::Scalar);
            assert_eq!(kind.lanes(), 4);
        } else {
            assert_eq!(kind, BackendKind::Scalar);
        }
        assert_eq!(kind.to_string(), kind.name());
    }

    #[test]
    fn test_fma_tier_only_when_fused() {
        if active_backend() != BackendKind::Scalar {
            assert_eq!(active_backend() == BackendKind::SseFma, crate::fp::FUSED);
        }
    }

    #[test]
    fn test_free_functions_forward() {
        let mut tri = [
            Vertex::new(0.0, 0.0, 0.0, 1.0),
            Vertex::new(0.5, 0.5, 0.5, 2.0),
            Vertex::new(-0.5, 0.25, 0.0, 4.0),
        ];
        assert_eq!(classify(&tri), ClipStatus::FullyVisible);
        perspective_divide(&mut tri);
        assert!((tri[0].w - 1.0).abs() < 1e-6);
        assert!((tri[2].w - 0.25).abs() < 1e-6);
        ndc_to_screen(&mut tri, &Viewport::from_size(100.0, 100.0));
        assert_eq!((tri[0].x, tri[0].y), (50.0, 50.0));
    }
}
