//! Tick counters from `/proc/stat`.

use std::{fs, path::PathBuf};

use crate::collection::{
    cpu::{sources::TickSource, PerCoreTickMatrix, TickCategory, TickVector},
    error::{CollectionError, CollectionResult},
};

const PROC_STAT: &str = "/proc/stat";

/// The fewest fields a `cpu` line can have and still be useful.
const MIN_FIELDS: usize = 4;

/// Processor numbers at or past this are rejected rather than allocated for.
/// Matches the kernel's largest `NR_CPUS`.
pub const MAX_PROCESSORS: usize = 8192;

/// Reads ticks from `/proc/stat`, or another file in the same format.
#[derive(Debug, Clone)]
pub struct ProcStatTicks {
    path: PathBuf,
}

impl Default for ProcStatTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcStatTicks {
    pub fn new() -> Self {
        Self::with_path(PROC_STAT)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> CollectionResult<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Parses one `cpu` or `cpuN` line of `/proc/stat`, returning the processor
/// number (`None` for the aggregate line) and its ticks.
///
/// Categories past the end of the line (older kernels omit `iowait`, `irq`,
/// and `softirq`) are read as zero. `steal` and the guest columns are
/// ignored.
pub fn parse_cpu_line(line: &str) -> CollectionResult<(Option<usize>, TickVector)> {
    let mut fields = line.split_whitespace();

    let label = fields
        .next()
        .ok_or_else(|| CollectionError::parsing("empty cpu line"))?;
    let Some(suffix) = label.strip_prefix("cpu") else {
        return Err(CollectionError::parsing(format!("'{label}' is not a cpu line")));
    };
    let cpu = if suffix.is_empty() {
        None
    } else {
        let cpu = suffix.parse::<usize>()?;
        if cpu >= MAX_PROCESSORS {
            return Err(CollectionError::parsing(format!(
                "'{label}' is past the {MAX_PROCESSORS} processor limit"
            )));
        }
        Some(cpu)
    };

    let values: Vec<u64> = fields
        .take(TickCategory::COUNT)
        .map(str::parse)
        .collect::<Result<_, _>>()?;

    if values.len() < MIN_FIELDS {
        return Err(CollectionError::parsing(format!(
            "'{label}' has {} tick fields, expected at least {MIN_FIELDS}",
            values.len()
        )));
    }

    let mut ticks = TickVector::ZERO;
    for (category, value) in TickCategory::ALL.into_iter().zip(values) {
        ticks[category] = value;
    }

    Ok((cpu, ticks))
}

/// Parses the aggregate `cpu` line out of the contents of `/proc/stat`.
pub fn parse_system_ticks(content: &str) -> CollectionResult<TickVector> {
    let line = content
        .lines()
        .find(|line| line.starts_with("cpu "))
        .ok_or_else(|| CollectionError::parsing("no aggregate cpu line"))?;

    let (_, ticks) = parse_cpu_line(line)?;
    Ok(ticks)
}

/// Parses every `cpuN` line out of the contents of `/proc/stat`. Processors
/// are placed by number, so offline processors leave zeroed gaps.
pub fn parse_processor_ticks(content: &str) -> CollectionResult<PerCoreTickMatrix> {
    let mut matrix = PerCoreTickMatrix::default();

    for line in content.lines() {
        if !line.starts_with("cpu") || line.starts_with("cpu ") {
            continue;
        }

        if let (Some(cpu), ticks) = parse_cpu_line(line)? {
            matrix.set_row(cpu, ticks);
        }
    }

    Ok(matrix)
}

impl TickSource for ProcStatTicks {
    fn system_ticks(&mut self) -> TickVector {
        let ticks = self.read().and_then(|content| parse_system_ticks(&content));
        ticks.unwrap_or_else(|err| {
            crate::error!("Failed to read system ticks from {}: {err}", self.path.display());
            TickVector::ZERO
        })
    }

    fn processor_ticks(&mut self) -> PerCoreTickMatrix {
        let matrix = self.read().and_then(|content| parse_processor_ticks(&content));
        matrix.unwrap_or_else(|err| {
            crate::error!(
                "Failed to read processor ticks from {}: {err}",
                self.path.display()
            );
            PerCoreTickMatrix::default()
        })
    }
}
