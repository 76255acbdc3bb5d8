//! Error types for the fallible entry points.
//!
//! The transform kernels themselves never fail; these cover viewport
//! validation and the batch/buffer adapters around them.

use std::fmt;

/// Errors reported by viewport construction and the batch adapters.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Viewport with a non-finite component or a negative extent.
    InvalidViewport {
        origin_x: f32,
        origin_y: f32,
        width: f32,
        height: f32,
    },

    /// Raw float buffer whose length is not a whole number of `stride`-float records.
    MisalignedBuffer { len: usize, stride: usize },

    /// Status output slice does not have one entry per primitive.
    StatusLengthMismatch { primitives: usize, statuses: usize },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidViewport {
                origin_x,
                origin_y,
                width,
                height,
            } => {
                write!(
                    f,
                    "invalid viewport: origin ({}, {}), size {}x{}",
                    origin_x, origin_y, width, height
                )
            }
            TransformError::MisalignedBuffer { len, stride } => {
                write!(
                    f,
                    "misaligned buffer: {} floats is not a multiple of {}",
                    len, stride
                )
            }
            TransformError::StatusLengthMismatch {
                primitives,
                statuses,
            } => {
                write!(
                    f,
                    "status length mismatch: {} primitives, {} status slots",
                    primitives, statuses
                )
            }
        }
    }
}

impl std::error::Error for TransformError {}
