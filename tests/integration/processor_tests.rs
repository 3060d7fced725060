//! Tests for the load engine through its public API, with hand-rolled sources
//! and a manual clock.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use cpuload::{
    collection::cpu::sources::FixedCounts,
    utils::clock::ManualClock,
    CentralProcessor, CpuSources, LoadMode, LoadSettings, NativeLoadSource, PerCoreTickMatrix,
    ProcessorIdentity, TickSource, TickVector,
};

/// Replays system-wide readings, repeating the last one. Per-processor reads
/// mirror the system read onto every processor.
struct Replay {
    readings: VecDeque<[u64; 7]>,
    last: [u64; 7],
    processors: usize,
}

impl Replay {
    fn new(readings: &[[u64; 7]], processors: usize) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            last: [0; 7],
            processors,
        }
    }

    fn next(&mut self) -> TickVector {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        TickVector::new(self.last)
    }
}

impl TickSource for Replay {
    fn system_ticks(&mut self) -> TickVector {
        self.next()
    }

    fn processor_ticks(&mut self) -> PerCoreTickMatrix {
        let ticks = TickVector::new(self.last);
        std::iter::repeat(ticks).take(self.processors).collect()
    }
}

struct Counter(Arc<Mutex<f64>>);

impl NativeLoadSource for Counter {
    fn instant_load(&mut self) -> Option<f64> {
        let mut value = self.0.lock().unwrap();
        *value += 0.1;
        Some(*value)
    }
}

fn build(
    ticks: impl TickSource + 'static, native: Option<Box<dyn NativeLoadSource>>, logical: usize,
) -> (CentralProcessor, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let sources = CpuSources {
        ticks: Box::new(ticks),
        native,
        load_average: None,
        counts: Box::new(FixedCounts {
            logical,
            physical: logical,
        }),
        identity: ProcessorIdentity::default()
            .with_vendor("GenuineIntel")
            .with_name("Intel(R) Core(TM) i7-3720QM CPU @ 2.60GHz"),
    };

    let processor =
        CentralProcessor::with_clock(sources, LoadSettings::default(), Box::new(clock.clone()));
    (processor, clock)
}

#[test]
fn test_tick_load_example() {
    let (processor, clock) = build(
        Replay::new(&[[0, 0, 0, 0, 0, 0, 1], [50, 0, 30, 20, 0, 0, 1]], 2),
        None,
        2,
    );

    assert_eq!(processor.load_mode(), LoadMode::TickFallback);
    assert_eq!(processor.system_cpu_load(), 0.0);

    clock.advance(Duration::from_millis(951));
    assert_eq!(processor.system_cpu_load(), 0.8);
}

#[test]
fn test_no_elapsed_ticks() {
    let (processor, clock) = build(Replay::new(&[[10, 0, 5, 100, 0, 0, 0]], 1), None, 1);

    clock.advance(Duration::from_secs(2));
    assert_eq!(processor.system_cpu_load_between_ticks(), 0.0);
}

#[test]
fn test_native_cached_within_window() {
    let value = Arc::new(Mutex::new(0.0));
    let (processor, clock) = build(
        Replay::new(&[], 1),
        Some(Box::new(Counter(value.clone()))),
        1,
    );

    assert_eq!(processor.load_mode(), LoadMode::NativeAvailable);
    let first = processor.system_cpu_load();

    clock.advance(Duration::from_millis(50));
    assert_eq!(processor.system_cpu_load(), first);

    clock.advance(Duration::from_millis(200));
    assert!(processor.system_cpu_load() > first);
}

#[test]
fn test_per_core_shape() {
    let (processor, clock) = build(
        Replay::new(&[[1, 0, 0, 1, 0, 0, 0], [3, 0, 0, 3, 0, 0, 0]], 8),
        None,
        8,
    );

    assert_eq!(processor.processor_cpu_load_between_ticks().len(), 8);
    clock.advance(Duration::from_secs(1));
    assert_eq!(processor.processor_cpu_load_between_ticks().len(), 8);
    assert_eq!(processor.processor_cpu_load_ticks().len(), 8);
}

#[test]
fn test_identity_passthrough() {
    let (processor, _) = build(Replay::new(&[], 4), None, 4);

    assert_eq!(processor.logical_processor_count(), 4);
    assert_eq!(processor.identity().vendor_freq(), Some(2_600_000_000));
    assert_eq!(processor.to_string(), "Intel(R) Core(TM) i7-3720QM CPU @ 2.60GHz");
    assert_eq!(processor.system_load_average(), None);
}

#[test]
fn test_platform_processor() {
    let processor = CentralProcessor::platform(LoadSettings::default());

    assert!(processor.logical_processor_count() >= 1);
    assert!(processor.physical_processor_count() >= 1);

    let load = processor.system_cpu_load();
    assert!((0.0..=1.0).contains(&load));
    assert_eq!(
        processor.processor_cpu_load_between_ticks().len(),
        processor.logical_processor_count()
    );
}
