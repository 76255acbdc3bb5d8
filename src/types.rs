//! Core value types: vertices, viewports, clip status and primitive arity.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::TransformError;

/// A homogeneous vertex.
///
/// Holds clip-space coordinates on input. After perspective division x/y/z are
/// in NDC and `w` holds the reciprocal of the original clip-space w, which
/// downstream stages keep for perspective-correct interpolation. After screen
/// mapping x/y are pixel coordinates.
///
/// `#[repr(C)]` with no padding, so packed xyzw float buffers can be viewed as
/// vertex slices without copying (see [`crate::buffer`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn from_array([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// True if this vertex lies inside the symmetric clip cube `-w <= c <= w`
    /// for every c in x, y, z. Does not look at the sign of w.
    #[inline]
    pub fn in_clip_cube(&self) -> bool {
        let w = self.w;
        -w <= self.x && self.x <= w && -w <= self.y && self.y <= w && -w <= self.z && self.z <= w
    }

    /// True if the vertex is in front of the eye (`w > 0`). NaN is not.
    #[inline]
    pub fn in_front(&self) -> bool {
        self.w > 0.0
    }
}

impl From<[f32; 4]> for Vertex {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vertex> for [f32; 4] {
    #[inline]
    fn from(v: Vertex) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec4> for Vertex {
    #[inline]
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vertex> for glam::Vec4 {
    #[inline]
    fn from(v: Vertex) -> glam::Vec4 {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

/// Destination pixel rectangle for screen mapping.
///
/// Half extents are derived per call and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport without validation.
    #[inline]
    pub const fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Create a viewport at the origin covering `width` x `height` pixels.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Create a viewport, rejecting non-finite values and negative extents.
    pub fn try_new(
        origin_x: f32,
        origin_y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, TransformError> {
        let finite = origin_x.is_finite()
            && origin_y.is_finite()
            && width.is_finite()
            && height.is_finite();
        if !finite || width < 0.0 || height < 0.0 {
            return Err(TransformError::InvalidViewport {
                origin_x,
                origin_y,
                width,
                height,
            });
        }
        Ok(Self::new(origin_x, origin_y, width, height))
    }

    /// `(width / 2, height / 2)`.
    #[inline]
    pub fn half_extents(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// True if the pixel coordinate lies in `[origin, origin + size)` on both axes.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.origin_x
            && x < self.origin_x + self.width
            && y >= self.origin_y
            && y < self.origin_y + self.height
    }
}

/// Interprets the vector as `(origin_x, origin_y, width, height)`.
impl From<glam::Vec4> for Viewport {
    #[inline]
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

/// Visibility of a primitive against the clip cube.
///
/// Two flags are OR'ed together: the partial bit (`0b01`, some vertex has
/// `w > 0`) and the full bits (`0b11`, every vertex inside the cube with
/// `w > 0`). Full visibility implies partial visibility, so the value `2` is
/// never produced and cannot be constructed.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClipStatus {
    /// Every vertex is behind the eye or degenerate (`w <= 0`).
    #[default]
    NotVisible = 0,
    /// Some vertex has `w > 0` but the primitive is not wholly inside the cube.
    PartiallyVisible = 1,
    /// Every vertex is inside the cube with `w > 0`.
    FullyVisible = 3,
}

impl ClipStatus {
    pub const PARTIAL_BITS: u8 = 0b01;
    pub const FULL_BITS: u8 = 0b11;

    /// Combine the two independent visibility questions.
    ///
    /// `fully` without `partial` cannot happen for a non-empty primitive; it is
    /// folded into `FullyVisible` since the full flag carries the partial bit.
    #[inline]
    pub fn from_flags(fully: bool, partial: bool) -> Self {
        debug_assert!(!fully || partial, "fully visible implies some w > 0");
        let full = if fully { Self::FULL_BITS } else { 0 };
        let part = if partial { Self::PARTIAL_BITS } else { 0 };
        match full | part {
            0 => ClipStatus::NotVisible,
            Self::PARTIAL_BITS => ClipStatus::PartiallyVisible,
            _ => ClipStatus::FullyVisible,
        }
    }

    /// Raw flag bits: 0, 1 or 3.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Parse raw flag bits. Only 0, 1 and 3 are legal.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(ClipStatus::NotVisible),
            1 => Some(ClipStatus::PartiallyVisible),
            3 => Some(ClipStatus::FullyVisible),
            _ => None,
        }
    }

    /// The primitive straddles the cube or the eye plane and must go through
    /// the geometric clipper before it can be divided.
    #[inline]
    pub const fn needs_clipping(self) -> bool {
        matches!(self, ClipStatus::PartiallyVisible)
    }
}

impl fmt::Display for ClipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipStatus::NotVisible => write!(f, "not visible"),
            ClipStatus::PartiallyVisible => write!(f, "partially visible"),
            ClipStatus::FullyVisible => write!(f, "fully visible"),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for [super::Vertex; 1] {}
    impl Sealed for [super::Vertex; 2] {}
    impl Sealed for [super::Vertex; 3] {}
}

/// Fixed-size vertex groups the pipeline accepts: points, lines and triangles.
///
/// Sealed, so arities outside 1..=3 are rejected at compile time.
pub trait Primitive: sealed::Sealed {
    const ARITY: usize;
}

impl Primitive for [Vertex; 1] {
    const ARITY: usize = 1;
}

impl Primitive for [Vertex; 2] {
    const ARITY: usize = 2;
}

impl Primitive for [Vertex; 3] {
    const ARITY: usize = 3;
}

pub type Point = [Vertex; 1];
pub type Line = [Vertex; 2];
pub type Triangle = [Vertex; 3];
