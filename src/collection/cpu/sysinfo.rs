//! CPU sources through sysinfo.

use sysinfo::{CpuRefreshKind, RefreshKind, System};

use super::{
    identity::ProcessorIdentity,
    sources::{LoadAverageSource, NativeLoadSource},
    LoadAvgHarvest,
};

/// Global CPU usage as computed by sysinfo.
pub struct SysinfoLoad {
    system: System,
}

impl SysinfoLoad {
    /// Returns a source if sysinfo supports this platform.
    ///
    /// sysinfo computes usage between two refreshes, and the first one happens
    /// here. A query made right after this (such as the startup probe in
    /// [`CentralProcessor`](super::processor::CentralProcessor)) covers only a
    /// few microseconds, so that first reading is not meaningful. It is
    /// replaced once the native throttle window has passed.
    pub fn probe() -> Option<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            crate::debug!("sysinfo does not support this platform.");
            return None;
        }

        let mut system = System::new();
        system.refresh_cpu_usage();

        Some(Self { system })
    }
}

impl NativeLoadSource for SysinfoLoad {
    fn instant_load(&mut self) -> Option<f64> {
        self.system.refresh_cpu_usage();
        let usage = f64::from(self.system.global_cpu_usage()) / 100.0;

        if usage.is_finite() {
            Some(usage.clamp(0.0, 1.0))
        } else {
            crate::warn!("sysinfo reported a non-finite CPU usage: {usage}");
            None
        }
    }
}

/// Load averages through sysinfo.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoLoadAverage;

impl LoadAverageSource for SysinfoLoadAverage {
    fn load_average(&mut self) -> Option<LoadAvgHarvest> {
        // The API for sysinfo apparently wants you to call it like this, rather than
        // using a &System.
        let sysinfo::LoadAvg { one, five, fifteen } = System::load_average();

        if one < 0.0 || five < 0.0 || fifteen < 0.0 {
            None
        } else {
            Some([one, five, fifteen])
        }
    }
}

/// A [`System`] that only knows the CPU list, without any usage data.
fn cpu_list() -> System {
    System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()))
}

/// The number of logical processors sysinfo sees. This is every processor on
/// the machine, not just the ones this process may run on.
pub fn logical_count() -> usize {
    cpu_list().cpus().len()
}

/// Vendor and brand of the first CPU as reported by sysinfo.
pub fn get_identity() -> ProcessorIdentity {
    let system = cpu_list();

    let cpu64 = cfg!(target_pointer_width = "64");
    match system.cpus().first() {
        Some(cpu) => ProcessorIdentity::default()
            .with_vendor(cpu.vendor_id().trim())
            .with_name(cpu.brand().trim())
            .with_cpu64(cpu64),
        None => ProcessorIdentity::default().with_cpu64(cpu64),
    }
}
