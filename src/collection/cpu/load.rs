//! Turning tick snapshots into load ratios.

use super::{PerCoreTickMatrix, TickCategory, TickVector};

/// Ticks spent idle, including time waiting on IO.
#[inline]
fn idle_ticks(ticks: &TickVector) -> i128 {
    i128::from(ticks[TickCategory::Idle]) + i128::from(ticks[TickCategory::IoWait])
}

/// Returns the fraction of ticks between `previous` and `current` that were
/// spent non-idle.
///
/// Returns `0.0` if no ticks elapsed, or if the idle delta went negative (a
/// counter rollback or otherwise inconsistent source).
pub fn load_between(previous: &TickVector, current: &TickVector) -> f64 {
    let total: i128 = TickCategory::ALL
        .iter()
        .map(|&category| i128::from(current[category]) - i128::from(previous[category]))
        .sum();
    let idle = idle_ticks(current) - idle_ticks(previous);

    crate::trace!("Total ticks: {total}  Idle ticks: {idle}");

    if total > 0 && idle >= 0 {
        (total - idle) as f64 / total as f64
    } else {
        0.0
    }
}

/// [`load_between`] applied row by row. The result is aligned with processor
/// number and always has as many entries as `current` has rows; a processor
/// missing from `previous` is compared against zero.
pub fn per_core_load_between(
    previous: &PerCoreTickMatrix, current: &PerCoreTickMatrix,
) -> Vec<f64> {
    current
        .iter()
        .enumerate()
        .map(|(cpu, current)| {
            let previous = previous.rows().get(cpu).unwrap_or(&TickVector::ZERO);
            crate::trace!("CPU: {cpu}");
            load_between(previous, current)
        })
        .collect()
}
