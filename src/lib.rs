//! Post-vertex-transform stage of a CPU rasterizer.
//!
//! Takes clip-space vertices from a vertex shader and prepares them for
//! triangle setup:
//!
//! 1. [`classify`] a point, line or triangle against the clip cube,
//! 2. [`perspective_divide`] it into NDC (keeping `1/w` in `w`),
//! 3. [`ndc_to_screen`] map x/y into viewport pixels.
//!
//! Every kernel works in place on a `[Vertex; N]` with N in 1..=3 and never
//! allocates. The implementation ([`backend::Active`]) is picked at compile
//! time: an SSE backend on x86 targets with the `simd` feature, otherwise the
//! portable scalar reference.
//!
//! # Example
//!
//! ```
//! use post_transform::{classify, project, ClipStatus, Vertex, Viewport};
//!
//! let mut tri = [
//!     Vertex::new(0.0, 0.0, 0.5, 1.0),
//!     Vertex::new(1.0, 0.0, 0.5, 2.0),
//!     Vertex::new(0.0, 1.0, 0.5, 2.0),
//! ];
//! let viewport = Viewport::from_size(800.0, 600.0);
//!
//! assert_eq!(classify(&tri), ClipStatus::FullyVisible);
//! project(&mut tri, &viewport);
//! assert_eq!((tri[0].x, tri[0].y), (400.0, 300.0));
//! ```

pub mod backend;
pub mod batch;
pub mod buffer;
mod error;
mod fp;
pub mod timing;
mod types;

pub use backend::{
    active_backend, classify, ndc_to_screen, perspective_divide, project, Backend, BackendKind,
};
pub use batch::{process, process_with, BatchConfig, BatchStats};
pub use error::TransformError;
pub use types::{ClipStatus, Line, Point, Primitive, Triangle, Vertex, Viewport};
