//! Data collection for CPU load, and wiring up the right sources for the
//! platform we're running on.

#[cfg(target_os = "linux")]
pub mod linux {
    pub mod cpuinfo;
    pub mod proc_stat;
    pub mod utils;
}

pub mod cpu;
pub mod error;

use cpu::{
    identity::ProcessorIdentity,
    processor::{CentralProcessor, CpuSources},
    sources::{LoadAverageSource, NativeLoadSource, ProcessorCountProvider, TickSource},
    LoadSettings,
};

/// The tick source for this platform.
fn platform_ticks() -> Box<dyn TickSource> {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            Box::new(linux::proc_stat::ProcStatTicks::new())
        } else {
            crate::debug!("No tick counters on this platform.");
            Box::new(cpu::sources::UnavailableTicks)
        }
    }
}

fn platform_identity() -> ProcessorIdentity {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            linux::cpuinfo::get_identity()
        } else {
            cpu::sysinfo::get_identity()
        }
    }
}

fn platform_load_average() -> Option<Box<dyn LoadAverageSource>> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            Some(Box::new(cpu::sysinfo::SysinfoLoadAverage))
        } else {
            None
        }
    }
}

fn platform_native(settings: &LoadSettings) -> Option<Box<dyn NativeLoadSource>> {
    if !settings.use_native {
        return None;
    }

    cpu::sysinfo::SysinfoLoad::probe().map(|source| Box::new(source) as Box<dyn NativeLoadSource>)
}

fn listed_processors() -> usize {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            linux::cpuinfo::processor_count()
        } else {
            cpu::sysinfo::logical_count()
        }
    }
}

/// Counts every processor on the machine, not just the ones this process is
/// allowed to run on. Tick sources report a row for each of them.
#[derive(Debug, Default, Clone, Copy)]
pub struct MachineCounts;

impl ProcessorCountProvider for MachineCounts {
    fn logical_count(&self) -> usize {
        let count = listed_processors();
        if count == 0 {
            crate::debug!("Could not list the processors, using the scheduler's count.");
            num_cpus::get()
        } else {
            count
        }
    }

    fn physical_count(&self) -> usize {
        num_cpus::get_physical()
    }
}

impl CpuSources {
    /// The sources available on the current platform.
    pub fn platform(settings: &LoadSettings) -> Self {
        Self {
            ticks: platform_ticks(),
            native: platform_native(settings),
            load_average: platform_load_average(),
            counts: Box::new(MachineCounts),
            identity: platform_identity(),
        }
    }
}

impl CentralProcessor {
    /// Creates a processor reading from the current platform.
    pub fn platform(settings: LoadSettings) -> Self {
        Self::new(CpuSources::platform(&settings), settings)
    }
}
