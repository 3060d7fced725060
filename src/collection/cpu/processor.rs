//! The entry point for CPU load queries.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use super::{
    identity::ProcessorIdentity,
    load::{load_between, per_core_load_between},
    sampler::{Sampler, TickKind},
    sources::{LoadAverageSource, NativeLoadSource, ProcessorCountProvider, TickSource},
    LoadAvgHarvest, LoadSettings, PerCoreTickMatrix, TickVector,
};
use crate::utils::clock::{Clock, SystemClock};

/// Where [`CentralProcessor::system_cpu_load`] gets its answer from. Decided
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// A native load source answered the startup probe.
    NativeAvailable,
    /// Load is computed from tick deltas.
    TickFallback,
}

impl LoadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::NativeAvailable => "native",
            LoadMode::TickFallback => "ticks",
        }
    }
}

/// The last native reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeLoadCache {
    pub ratio: f64,
    pub captured_at: Instant,
}

/// The collaborators a [`CentralProcessor`] reads from.
pub struct CpuSources {
    pub ticks: Box<dyn TickSource>,
    pub native: Option<Box<dyn NativeLoadSource>>,
    pub load_average: Option<Box<dyn LoadAverageSource>>,
    pub counts: Box<dyn ProcessorCountProvider>,
    pub identity: ProcessorIdentity,
}

struct NativeLoad {
    source: Box<dyn NativeLoadSource>,
    cache: NativeLoadCache,
}

/// Everything that changes after construction. Only ever touched under
/// [`CentralProcessor::state`].
struct ProcessorState {
    sampler: Sampler,
    native: Option<NativeLoad>,
    load_average: Option<Box<dyn LoadAverageSource>>,
}

/// A CPU, as far as load is concerned.
///
/// Every query returns a number: unreadable counters, throttled calls, and
/// degenerate tick math all resolve to the last known value or `0.0` rather
/// than an error. All queries are safe to call from multiple threads.
pub struct CentralProcessor {
    identity: ProcessorIdentity,
    logical_processor_count: usize,
    physical_processor_count: usize,
    mode: LoadMode,
    settings: LoadSettings,
    clock: Box<dyn Clock>,
    state: Mutex<ProcessorState>,
}

impl std::fmt::Debug for CentralProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentralProcessor")
            .field("identity", &self.identity)
            .field("logical_processor_count", &self.logical_processor_count)
            .field("physical_processor_count", &self.physical_processor_count)
            .field("mode", &self.mode)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CentralProcessor {
    /// Creates a processor using the system clock.
    pub fn new(sources: CpuSources, settings: LoadSettings) -> Self {
        Self::with_clock(sources, settings, Box::new(SystemClock))
    }

    /// Creates a processor. Processor counts are read, the native source is
    /// probed, and the first tick snapshots are taken before this returns.
    pub fn with_clock(
        sources: CpuSources, settings: LoadSettings, clock: Box<dyn Clock>,
    ) -> Self {
        let CpuSources {
            ticks,
            native,
            load_average,
            counts,
            identity,
        } = sources;

        let logical_processor_count = match counts.logical_count() {
            0 => {
                crate::warn!("Couldn't find any logical processors, assuming 1.");
                1
            }
            count => count,
        };
        let physical_processor_count = match counts.physical_count() {
            0 => {
                crate::warn!("Couldn't find any physical processors, assuming 1.");
                1
            }
            count => count,
        };

        let native = if settings.use_native {
            native.and_then(|mut source| {
                let ratio = source.instant_load()?;
                Some(NativeLoad {
                    source,
                    cache: NativeLoadCache {
                        ratio,
                        captured_at: clock.now(),
                    },
                })
            })
        } else {
            None
        };

        let mode = if native.is_some() {
            crate::debug!("Native load source detected.");
            LoadMode::NativeAvailable
        } else {
            crate::debug!("Native load source not detected, using ticks.");
            LoadMode::TickFallback
        };

        let sampler = Sampler::new(ticks, logical_processor_count, clock.now());

        Self {
            identity,
            logical_processor_count,
            physical_processor_count,
            mode,
            settings,
            clock,
            state: Mutex::new(ProcessorState {
                sampler,
                native,
                load_average,
            }),
        }
    }

    /// A poisoned lock still holds a consistent snapshot pair, since pairs
    /// are only ever replaced whole; keep going with it.
    fn lock_state(&self) -> MutexGuard<'_, ProcessorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Refreshes the system ticks if stale and returns a copy of the pair.
    fn system_pair(&self) -> (TickVector, TickVector) {
        let mut state = self.lock_state();
        state.sampler.maybe_refresh(
            TickKind::System,
            self.settings.tick_refresh_threshold,
            self.clock.now(),
        );

        let pair = state.sampler.system();
        (pair.previous, pair.current)
    }

    fn processor_pair(&self) -> (PerCoreTickMatrix, PerCoreTickMatrix) {
        let mut state = self.lock_state();
        state.sampler.maybe_refresh(
            TickKind::Processor,
            self.settings.tick_refresh_threshold,
            self.clock.now(),
        );

        let pair = state.sampler.processor();
        (pair.previous.clone(), pair.current.clone())
    }

    /// The current system-wide load in `[0.0, 1.0]`.
    ///
    /// Uses the native source if one was detected, re-querying it at most once
    /// per native throttle window. Otherwise this is
    /// [`Self::system_cpu_load_between_ticks`].
    pub fn system_cpu_load(&self) -> f64 {
        if self.mode == LoadMode::TickFallback {
            return self.system_cpu_load_between_ticks();
        }

        let now = self.clock.now();
        let mut state = self.lock_state();
        let Some(native) = state.native.as_mut() else {
            drop(state);
            return self.system_cpu_load_between_ticks();
        };

        if now.saturating_duration_since(native.cache.captured_at) < self.settings.native_throttle {
            return native.cache.ratio;
        }

        match native.source.instant_load() {
            Some(ratio) => {
                native.cache = NativeLoadCache {
                    ratio,
                    captured_at: now,
                };
            }
            None => {
                crate::debug!("Native load source returned nothing, reusing the last value.");
            }
        }

        native.cache.ratio
    }

    /// The system-wide load between the last two tick snapshots, always
    /// computed from ticks. Snapshots are re-read at most once per tick
    /// refresh threshold.
    pub fn system_cpu_load_between_ticks(&self) -> f64 {
        let (previous, current) = self.system_pair();
        load_between(&previous, &current)
    }

    /// Per-processor loads between the last two tick snapshots, indexed by
    /// logical processor number. Always has
    /// [`Self::logical_processor_count`] entries.
    pub fn processor_cpu_load_between_ticks(&self) -> Vec<f64> {
        let (previous, current) = self.processor_pair();
        per_core_load_between(&previous, &current)
    }

    /// The most recent system-wide tick snapshot.
    pub fn system_cpu_load_ticks(&self) -> TickVector {
        self.system_pair().1
    }

    /// The most recent per-processor tick snapshot.
    pub fn processor_cpu_load_ticks(&self) -> PerCoreTickMatrix {
        self.processor_pair().1
    }

    /// The 1, 5, and 15 minute load averages, if the platform has them.
    pub fn system_load_average(&self) -> Option<LoadAvgHarvest> {
        self.lock_state()
            .load_average
            .as_mut()
            .and_then(|source| source.load_average())
    }

    /// The 1 minute load average, if the platform has one.
    pub fn system_load_average_one(&self) -> Option<f64> {
        self.system_load_average().map(|[one, _, _]| one)
    }

    /// The last native reading, if a native source is in use.
    pub fn native_load_cache(&self) -> Option<NativeLoadCache> {
        self.lock_state().native.as_ref().map(|native| native.cache)
    }

    #[inline]
    pub fn load_mode(&self) -> LoadMode {
        self.mode
    }

    #[inline]
    pub fn settings(&self) -> &LoadSettings {
        &self.settings
    }

    #[inline]
    pub fn identity(&self) -> &ProcessorIdentity {
        &self.identity
    }

    #[inline]
    pub fn logical_processor_count(&self) -> usize {
        self.logical_processor_count
    }

    #[inline]
    pub fn physical_processor_count(&self) -> usize {
        self.physical_processor_count
    }
}

impl std::fmt::Display for CentralProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.identity.fmt(f)
    }
}
