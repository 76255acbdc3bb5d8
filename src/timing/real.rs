use super::Phase;
use std::time::{Duration, Instant};

/// Timer that tracks elapsed time when timing is enabled.
pub struct Timer(Instant);

impl Timer {
    #[inline]
    pub fn start() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Accumulated phase durations for one or more batches.
///
/// Under the parallel driver each worker keeps its own accumulator; merged
/// durations are summed CPU time, not wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchTimings {
    pub classify: Duration,
    pub project: Duration,
    pub primitives: u64,
    pub chunks: u64,
}

impl BatchTimings {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, phase: Phase, d: Duration) {
        match phase {
            Phase::Classify => self.classify += d,
            Phase::Project => self.project += d,
        }
    }

    #[inline]
    pub fn add_primitives(&mut self, n: usize) {
        self.primitives += n as u64;
        self.chunks += 1;
    }

    #[inline]
    pub fn merge(&mut self, other: &BatchTimings) {
        self.classify += other.classify;
        self.project += other.project;
        self.primitives += other.primitives;
        self.chunks += other.chunks;
    }

    #[inline]
    pub fn total(&self) -> Duration {
        self.classify + self.project
    }

    pub fn report(&self, label: &str) {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        let total = ms(self.total());
        let pct = |d: Duration| {
            if total > 0.0 {
                ms(d) / total * 100.0
            } else {
                0.0
            }
        };
        let ns_per_prim = if self.primitives > 0 {
            self.total().as_nanos() as f64 / self.primitives as f64
        } else {
            0.0
        };

        eprintln!(
            "timing {} (backend={}, primitives={}, chunks={})",
            label,
            crate::backend::active_backend(),
            self.primitives,
            self.chunks
        );
        eprintln!("  classify:  {:7.2}ms ({:4.1}%)", ms(self.classify), pct(self.classify));
        eprintln!("  project:   {:7.2}ms ({:4.1}%)", ms(self.project), pct(self.project));
        eprintln!("  total:     {:7.2}ms ({:.1}ns/primitive)", total, ns_per_prim);
    }
}
