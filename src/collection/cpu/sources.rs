//! The platform-facing contracts the load engine consumes.
//!
//! None of these return errors. Implementations are expected to log their own
//! failures and report them through the documented sentinel instead.

use super::{LoadAvgHarvest, PerCoreTickMatrix, TickVector};

/// Supplies cumulative tick counters.
pub trait TickSource: Send {
    /// System-wide ticks, in [`TickCategory`](super::TickCategory) order.
    /// Returns [`TickVector::ZERO`] if there is no fresh data.
    fn system_ticks(&mut self) -> TickVector;

    /// Per-processor ticks, one row per logical processor. Returns an
    /// all-zero (or empty) matrix if there is no fresh data.
    fn processor_ticks(&mut self) -> PerCoreTickMatrix;
}

/// A platform API reporting the current CPU load directly.
pub trait NativeLoadSource: Send {
    /// The current load as a ratio in `[0.0, 1.0]`, or `None` if the platform
    /// cannot provide one.
    fn instant_load(&mut self) -> Option<f64>;
}

/// Supplies the 1, 5, and 15 minute load averages.
pub trait LoadAverageSource: Send {
    fn load_average(&mut self) -> Option<LoadAvgHarvest>;
}

/// Reports how many processors the machine has. Queried once.
pub trait ProcessorCountProvider {
    fn logical_count(&self) -> usize;

    fn physical_count(&self) -> usize;
}

/// A [`TickSource`] for platforms without tick counters; it never has fresh
/// data.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTicks;

impl TickSource for UnavailableTicks {
    fn system_ticks(&mut self) -> TickVector {
        TickVector::ZERO
    }

    fn processor_ticks(&mut self) -> PerCoreTickMatrix {
        PerCoreTickMatrix::default()
    }
}

/// Fixed processor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCounts {
    pub logical: usize,
    pub physical: usize,
}

impl ProcessorCountProvider for FixedCounts {
    fn logical_count(&self) -> usize {
        self.logical
    }

    fn physical_count(&self) -> usize {
        self.physical
    }
}
