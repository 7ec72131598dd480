//! Progress reporting for the long-running squaring loops.
//!
//! Observation only: an observer sees step indices and nothing else, so it
//! cannot influence the arithmetic. Reports are throttled to the first step,
//! the last step, and any step more than `PROGRESS_INTERVAL` iterations past
//! the previous report.

use crate::constants::PROGRESS_INTERVAL;

/// Receives progress reports from `evaluate_vdf` and `generate_proof`.
///
/// `step` is the zero-based iteration just completed and `total` is `T`.
/// Any `FnMut(u64, u64)` closure is an observer.
pub trait ProgressObserver {
    fn on_progress(&mut self, step: u64, total: u64);
}

impl<F: FnMut(u64, u64)> ProgressObserver for F {
    #[inline]
    fn on_progress(&mut self, step: u64, total: u64) {
        self(step, total);
    }
}

/// Observer that ignores every report
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    #[inline]
    fn on_progress(&mut self, _step: u64, _total: u64) {}
}

/// Rate-limits reports to an inner observer
pub struct ProgressThrottle<'a, P: ProgressObserver + ?Sized> {
    observer: &'a mut P,
    total: u64,
    interval: u64,
    last: Option<u64>,
}

impl<'a, P: ProgressObserver + ?Sized> ProgressThrottle<'a, P> {
    /// Throttle with the default `PROGRESS_INTERVAL`
    pub fn new(observer: &'a mut P, total: u64) -> Self {
        Self::with_interval(observer, total, PROGRESS_INTERVAL)
    }

    pub fn with_interval(observer: &'a mut P, total: u64, interval: u64) -> Self {
        Self {
            observer,
            total,
            interval,
            last: None,
        }
    }

    /// Record that iteration `step` finished; forwards it when a report is due
    #[inline]
    pub fn tick(&mut self, step: u64) {
        let due = match self.last {
            None => true,
            Some(last) => step + 1 == self.total || step.saturating_sub(last) > self.interval,
        };
        if due {
            self.last = Some(step);
            tracing::trace!(step, total = self.total, "vdf progress");
            self.observer.on_progress(step, self.total);
        }
    }

    /// Step of the most recent report, if any
    pub const fn last_reported(&self) -> Option<u64> {
        self.last
    }
}
