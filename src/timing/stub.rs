use super::Phase;
use std::time::Duration;

/// Dummy timer when `timing` is disabled (zero-sized).
pub struct Timer;

impl Timer {
    #[inline(always)]
    pub fn start() -> Self {
        Self
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        Duration::ZERO
    }
}

/// Dummy batch timings when `timing` is disabled (zero-sized).
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchTimings;

impl BatchTimings {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    pub fn add(&mut self, _phase: Phase, _d: Duration) {}

    #[inline(always)]
    pub fn add_primitives(&mut self, _n: usize) {}

    #[inline(always)]
    pub fn merge(&mut self, _other: &BatchTimings) {}

    #[inline(always)]
    pub fn total(&self) -> Duration {
        Duration::ZERO
    }

    #[inline(always)]
    pub fn report(&self, _label: &str) {}
}
