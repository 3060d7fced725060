//! Processor identity and count from `/proc/cpuinfo`.

use std::path::Path;

use super::utils::read_lines;
use crate::collection::cpu::identity::ProcessorIdentity;

const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// Reads the identity of the first processor listed in `/proc/cpuinfo`.
pub fn get_identity() -> ProcessorIdentity {
    identity_from_file(Path::new(PROC_CPUINFO))
}

pub fn identity_from_file(path: &Path) -> ProcessorIdentity {
    parse_cpuinfo(&read_lines(path, true))
}

/// The number of logical processors listed in `/proc/cpuinfo`, whatever this
/// process's affinity or cgroup limits are.
pub fn processor_count() -> usize {
    count_processors(&read_lines(Path::new(PROC_CPUINFO), true))
}

/// Counts the `processor` entries of `/proc/cpuinfo` contents. Offline
/// processors are not listed, so the highest processor number also counts:
/// entries `0`, `1`, and `3` mean four processors.
pub fn count_processors<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .filter_map(|line| line.as_ref().split_once(':'))
        .filter(|(key, _)| key.trim() == "processor")
        .enumerate()
        .map(|(seen, (_, number))| {
            let slots = number.trim().parse::<usize>().map_or(0, |n| n.saturating_add(1));
            slots.max(seen + 1)
        })
        .max()
        .unwrap_or(0)
}

/// Parses the first processor block of `/proc/cpuinfo` contents.
///
/// x86 kernels report `vendor_id`, `cpu family`, `model`, and `stepping`;
/// ARM kernels report `CPU implementer`, `CPU architecture`, `CPU part`, and
/// `CPU revision` instead. Either set is accepted.
pub fn parse_cpuinfo<S: AsRef<str>>(lines: &[S]) -> ProcessorIdentity {
    let mut identity = ProcessorIdentity::default();
    let mut cpu64 = None;
    let mut seen_processor = false;

    for line in lines.iter().map(AsRef::as_ref) {
        let Some((key, value)) = line.split_once(':') else {
            if line.trim().is_empty() && seen_processor {
                // End of the first block.
                break;
            }
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "processor" => seen_processor = true,
            "vendor_id" | "CPU implementer" => identity = identity.with_vendor(value),
            "model name" | "Processor" => identity = identity.with_name(value),
            "cpu family" | "CPU architecture" => identity = identity.with_family(value),
            "model" | "CPU part" => identity = identity.with_model(value),
            "stepping" | "CPU revision" => identity = identity.with_stepping(value),
            "flags" => cpu64 = Some(value.split_whitespace().any(|flag| flag == "lm")),
            _ => {}
        }
    }

    identity.with_cpu64(cpu64.unwrap_or(cfg!(target_pointer_width = "64")))
}
