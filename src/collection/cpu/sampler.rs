//! Throttled sampling of tick counters.

use std::time::{Duration, Instant};

use super::{sources::TickSource, PerCoreTickMatrix, TickVector};

/// Which set of tick counters to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    System,
    Processor,
}

/// A previous/current pair of snapshots and when `current` was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPair<T> {
    pub previous: T,
    pub current: T,
    pub captured_at: Option<Instant>,
}

impl<T: Clone> SnapshotPair<T> {
    /// Both snapshots start out as the same bootstrap capture.
    fn bootstrap(initial: T, captured_at: Option<Instant>) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
            captured_at,
        }
    }

    /// Shifts `current` into `previous` and installs `fresh`.
    fn advance(&mut self, fresh: T, now: Instant) {
        self.previous = std::mem::replace(&mut self.current, fresh);
        self.captured_at = Some(now);
    }
}

/// Owns the tick snapshots and decides when they are stale enough to be
/// re-read from the [`TickSource`].
///
/// A sampler never reports errors: a source with nothing to say (an all-zero
/// read) leaves the previous snapshots in place.
pub struct Sampler {
    source: Box<dyn TickSource>,
    logical_processor_count: usize,
    system: SnapshotPair<TickVector>,
    processor: SnapshotPair<PerCoreTickMatrix>,
    /// Set once a row count mismatch has been logged at warn level.
    row_mismatch_reported: bool,
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("logical_processor_count", &self.logical_processor_count)
            .field("system", &self.system)
            .field("processor", &self.processor)
            .finish_non_exhaustive()
    }
}

/// Truncates or zero-pads `matrix` to `len` rows. A mismatch is a warning the
/// first time and a trace after that, since the source won't change its mind.
fn fit_rows(matrix: PerCoreTickMatrix, len: usize, reported: &mut bool) -> PerCoreTickMatrix {
    if matrix.len() != len {
        if *reported {
            crate::trace!("Tick source reported {} processors, expected {len}.", matrix.len());
        } else {
            crate::warn!("Tick source reported {} processors, expected {len}.", matrix.len());
            *reported = true;
        }
    }
    matrix.resized(len)
}

impl Sampler {
    /// Creates a sampler and takes its bootstrap capture, so that `previous`
    /// and `current` are identical and immediately usable.
    pub fn new(
        mut source: Box<dyn TickSource>, logical_processor_count: usize, now: Instant,
    ) -> Self {
        // Per-processor ticks go first; some sources derive the system-wide
        // counters from the same read.
        let mut row_mismatch_reported = false;
        let processor_ticks = source.processor_ticks();
        let processor = if processor_ticks.is_all_zero() {
            crate::debug!("No per-processor ticks available at startup.");
            SnapshotPair::bootstrap(PerCoreTickMatrix::zeroed(logical_processor_count), None)
        } else {
            SnapshotPair::bootstrap(
                fit_rows(
                    processor_ticks,
                    logical_processor_count,
                    &mut row_mismatch_reported,
                ),
                Some(now),
            )
        };

        let system_ticks = source.system_ticks();
        let system = if system_ticks.is_zero() {
            crate::debug!("No system ticks available at startup.");
            SnapshotPair::bootstrap(TickVector::ZERO, None)
        } else {
            SnapshotPair::bootstrap(system_ticks, Some(now))
        };

        Self {
            source,
            logical_processor_count,
            system,
            processor,
            row_mismatch_reported,
        }
    }

    /// Re-reads the system-wide ticks. An all-zero read is ignored.
    pub fn refresh_system_ticks(&mut self, now: Instant) {
        crate::trace!("Updating system ticks");
        let ticks = self.source.system_ticks();

        if ticks.is_zero() {
            crate::trace!("Skipping system tick update, source returned all zeros.");
            return;
        }

        self.system.advance(ticks, now);
    }

    /// Re-reads the per-processor ticks. The read is ignored only if every
    /// tick of every processor is zero; otherwise the whole matrix is
    /// replaced, zero rows included.
    pub fn refresh_processor_ticks(&mut self, now: Instant) {
        crate::trace!("Updating processor ticks");
        let ticks = self.source.processor_ticks();

        if ticks.is_all_zero() {
            crate::trace!("Skipping processor tick update, source returned all zeros.");
            return;
        }

        let ticks = fit_rows(
            ticks,
            self.logical_processor_count,
            &mut self.row_mismatch_reported,
        );
        self.processor.advance(ticks, now);
    }

    /// Refreshes `kind` if more than `threshold` has passed since its last
    /// capture. Returns whether a refresh was attempted.
    pub fn maybe_refresh(&mut self, kind: TickKind, threshold: Duration, now: Instant) -> bool {
        let last = self.last_capture(kind);
        crate::trace!("Current time: {now:?}  Last tick time: {last:?}");

        let stale = match last {
            Some(last) => now.saturating_duration_since(last) > threshold,
            None => true,
        };

        if stale {
            match kind {
                TickKind::System => self.refresh_system_ticks(now),
                TickKind::Processor => self.refresh_processor_ticks(now),
            }
        }

        stale
    }

    /// When `kind` was last successfully captured, if ever.
    pub fn last_capture(&self, kind: TickKind) -> Option<Instant> {
        match kind {
            TickKind::System => self.system.captured_at,
            TickKind::Processor => self.processor.captured_at,
        }
    }

    #[inline]
    pub fn system(&self) -> &SnapshotPair<TickVector> {
        &self.system
    }

    #[inline]
    pub fn processor(&self) -> &SnapshotPair<PerCoreTickMatrix> {
        &self.processor
    }

    #[inline]
    pub fn logical_processor_count(&self) -> usize {
        self.logical_processor_count
    }
}
