//! Batch driver: classify and project many primitives of one topology.
//!
//! Each primitive is classified; only fully visible ones are divided and
//! mapped to the screen. Partially visible primitives stay in clip space for
//! the geometric clipper, invisible ones are left for the caller to discard.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::backend;
use crate::error::TransformError;
use crate::timing::{BatchTimings, Phase, Timer};
use crate::types::{ClipStatus, Primitive, Vertex, Viewport};

/// Configuration for the batch driver.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum primitive count before work is split across the rayon pool.
    ///
    /// Ignored without the `parallel` feature.
    pub parallel_threshold: usize,
    /// Primitives per parallel work item.
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 16 * 1024,
            chunk_size: 2048,
        }
    }
}

impl BatchConfig {
    /// Never split work across threads.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }
}

/// Per-status primitive counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub fully_visible: usize,
    pub partially_visible: usize,
    pub not_visible: usize,
}

impl BatchStats {
    #[inline]
    pub fn record(&mut self, status: ClipStatus) {
        match status {
            ClipStatus::FullyVisible => self.fully_visible += 1,
            ClipStatus::PartiallyVisible => self.partially_visible += 1,
            ClipStatus::NotVisible => self.not_visible += 1,
        }
    }

    #[inline]
    pub fn merge(&mut self, other: &BatchStats) {
        self.fully_visible += other.fully_visible;
        self.partially_visible += other.partially_visible;
        self.not_visible += other.not_visible;
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.fully_visible + self.partially_visible + self.not_visible
    }
}

/// Classify every primitive, write its status, and project the fully visible ones.
///
/// `statuses` must have one slot per primitive.
pub fn process<const N: usize>(
    prims: &mut [[Vertex; N]],
    viewport: &Viewport,
    statuses: &mut [ClipStatus],
) -> Result<BatchStats, TransformError>
where
    [Vertex; N]: Primitive,
{
    process_with(prims, viewport, statuses, &BatchConfig::default())
}

/// [`process`] with explicit configuration.
pub fn process_with<const N: usize>(
    prims: &mut [[Vertex; N]],
    viewport: &Viewport,
    statuses: &mut [ClipStatus],
    config: &BatchConfig,
) -> Result<BatchStats, TransformError>
where
    [Vertex; N]: Primitive,
{
    process_timed(prims, viewport, statuses, config).map(|(stats, _)| stats)
}

/// [`process_with`], also returning phase timings (zero-sized unless the
/// `timing` feature is enabled).
pub fn process_timed<const N: usize>(
    prims: &mut [[Vertex; N]],
    viewport: &Viewport,
    statuses: &mut [ClipStatus],
    config: &BatchConfig,
) -> Result<(BatchStats, BatchTimings), TransformError>
where
    [Vertex; N]: Primitive,
{
    if prims.len() != statuses.len() {
        return Err(TransformError::StatusLengthMismatch {
            primitives: prims.len(),
            statuses: statuses.len(),
        });
    }

    #[cfg(feature = "parallel")]
    if prims.len() >= config.parallel_threshold {
        let chunk = config.chunk_size.max(1);
        let result = prims
            .par_chunks_mut(chunk)
            .zip(statuses.par_chunks_mut(chunk))
            .map(|(p, s)| {
                let mut timings = BatchTimings::new();
                let stats = process_chunk(p, s, viewport, &mut timings);
                (stats, timings)
            })
            .reduce(
                || (BatchStats::default(), BatchTimings::new()),
                |(mut stats_a, mut timings_a), (stats_b, timings_b)| {
                    stats_a.merge(&stats_b);
                    timings_a.merge(&timings_b);
                    (stats_a, timings_a)
                },
            );
        return Ok(result);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    let mut timings = BatchTimings::new();
    let stats = process_chunk(prims, statuses, viewport, &mut timings);
    Ok((stats, timings))
}

fn process_chunk<const N: usize>(
    prims: &mut [[Vertex; N]],
    statuses: &mut [ClipStatus],
    viewport: &Viewport,
    timings: &mut BatchTimings,
) -> BatchStats
where
    [Vertex; N]: Primitive,
{
    let t = Timer::start();
    for (prim, status) in prims.iter().zip(statuses.iter_mut()) {
        *status = backend::classify(prim);
    }
    timings.add(Phase::Classify, t.elapsed());

    let t = Timer::start();
    let mut stats = BatchStats::default();
    for (prim, &status) in prims.iter_mut().zip(statuses.iter()) {
        stats.record(status);
        if status == ClipStatus::FullyVisible {
            backend::project(prim, viewport);
        }
    }
    timings.add(Phase::Project, t.elapsed());
    timings.add_primitives(prims.len());

    stats
}
