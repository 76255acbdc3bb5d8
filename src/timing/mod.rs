//! Zero-cost timing instrumentation for the batch driver.
//!
//! When the `timing` feature is enabled, this module collects per-phase
//! durations and primitive counts and can print a report to stderr.
//!
//! When disabled, all types become zero-sized and all methods compile away.

/// Batch phase a duration is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Visibility classification.
    Classify,
    /// Perspective division plus screen mapping.
    Project,
}

#[cfg(feature = "timing")]
mod real;
#[cfg(not(feature = "timing"))]
mod stub;

#[cfg(feature = "timing")]
pub use real::*;
#[cfg(not(feature = "timing"))]
pub use stub::*;
