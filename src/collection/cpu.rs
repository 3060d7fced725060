//! Data collection for CPU usage and load average.
//!
//! Usage is derived from cumulative tick counters: a [`sampler::Sampler`]
//! keeps a previous/current pair of snapshots, [`load`] turns a pair into a
//! ratio, and [`processor::CentralProcessor`] decides whether to answer from
//! those ticks or from a cheaper native source.

pub mod identity;
pub mod load;
pub mod processor;
pub mod sampler;
pub mod sources;
pub mod sysinfo;

use std::{
    ops::{Index, IndexMut},
    time::Duration,
};

/// The 1, 5, and 15 minute load averages.
pub type LoadAvgHarvest = [f64; 3];

/// A CPU time accounting category. The declaration order is the layout of
/// every [`TickVector`], so do not reorder these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickCategory {
    User,
    Nice,
    System,
    Idle,
    IoWait,
    Irq,
    SoftIrq,
}

impl TickCategory {
    /// The number of categories, and so the width of a [`TickVector`].
    pub const COUNT: usize = 7;

    /// All categories, in layout order.
    pub const ALL: [TickCategory; Self::COUNT] = [
        TickCategory::User,
        TickCategory::Nice,
        TickCategory::System,
        TickCategory::Idle,
        TickCategory::IoWait,
        TickCategory::Irq,
        TickCategory::SoftIrq,
    ];

    /// The position of this category within a [`TickVector`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Cumulative ticks (or milliseconds, depending on the platform) spent in
/// each [`TickCategory`] since some arbitrary epoch.
///
/// An all-zero vector is how a [`sources::TickSource`] says it has nothing
/// new to report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickVector([u64; TickCategory::COUNT]);

impl TickVector {
    pub const ZERO: TickVector = TickVector([0; TickCategory::COUNT]);

    pub const fn new(ticks: [u64; TickCategory::COUNT]) -> Self {
        Self(ticks)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&tick| tick == 0)
    }

    #[inline]
    pub fn as_array(&self) -> &[u64; TickCategory::COUNT] {
        &self.0
    }

    /// Sum over every category.
    pub fn total(&self) -> u128 {
        self.0.iter().map(|&tick| u128::from(tick)).sum()
    }
}

impl From<[u64; TickCategory::COUNT]> for TickVector {
    fn from(ticks: [u64; TickCategory::COUNT]) -> Self {
        Self(ticks)
    }
}

impl Index<TickCategory> for TickVector {
    type Output = u64;

    #[inline]
    fn index(&self, category: TickCategory) -> &Self::Output {
        &self.0[category.index()]
    }
}

impl IndexMut<TickCategory> for TickVector {
    #[inline]
    fn index_mut(&mut self, category: TickCategory) -> &mut Self::Output {
        &mut self.0[category.index()]
    }
}

/// One [`TickVector`] per logical processor, indexed by processor number.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerCoreTickMatrix {
    rows: Vec<TickVector>,
}

impl PerCoreTickMatrix {
    /// A matrix of `len` zeroed rows.
    pub fn zeroed(len: usize) -> Self {
        Self {
            rows: vec![TickVector::ZERO; len],
        }
    }

    /// The number of rows (logical processors).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if every tick in every row is zero. A single nonzero tick
    /// anywhere makes the whole matrix count as fresh data.
    pub fn is_all_zero(&self) -> bool {
        self.rows.iter().all(TickVector::is_zero)
    }

    #[inline]
    pub fn rows(&self) -> &[TickVector] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TickVector> {
        self.rows.iter()
    }

    /// Truncates or zero-pads to exactly `len` rows.
    pub fn resized(mut self, len: usize) -> Self {
        self.rows.resize(len, TickVector::ZERO);
        self
    }

    /// Sets the row for processor `index`, growing the matrix with zeroed
    /// rows if needed.
    pub fn set_row(&mut self, index: usize, ticks: TickVector) {
        if index >= self.rows.len() {
            self.rows.resize(index + 1, TickVector::ZERO);
        }
        self.rows[index] = ticks;
    }
}

impl From<Vec<TickVector>> for PerCoreTickMatrix {
    fn from(rows: Vec<TickVector>) -> Self {
        Self { rows }
    }
}

impl FromIterator<TickVector> for PerCoreTickMatrix {
    fn from_iter<I: IntoIterator<Item = TickVector>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PerCoreTickMatrix {
    type Item = &'a TickVector;
    type IntoIter = std::slice::Iter<'a, TickVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Minimum time between re-reads of the tick counters.
pub const DEFAULT_TICK_REFRESH_THRESHOLD: Duration = Duration::from_millis(950);

/// Minimum time between queries to a native load source.
pub const DEFAULT_NATIVE_THROTTLE: Duration = Duration::from_millis(200);

/// Tunables for a [`processor::CentralProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSettings {
    /// Tick snapshots younger than this are reused instead of re-read.
    pub tick_refresh_threshold: Duration,
    /// Native readings younger than this are returned from cache.
    pub native_throttle: Duration,
    /// Whether to probe for a native load source at all.
    pub use_native: bool,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            tick_refresh_threshold: DEFAULT_TICK_REFRESH_THRESHOLD,
            native_throttle: DEFAULT_NATIVE_THROTTLE,
            use_native: true,
        }
    }
}
