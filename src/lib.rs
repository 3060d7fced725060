//! A library for measuring CPU load from cumulative tick counters, with an
//! optional fast path through a native load source.
//!
//! Most users want [`CentralProcessor::platform`], which wires up the right
//! sources for the current OS.

#![warn(rust_2018_idioms)]

pub mod utils {
    pub mod cancellation_token;
    pub mod clock;
    pub mod logging;
}
pub mod collection;
pub mod options;

pub use collection::cpu::{
    identity::ProcessorIdentity,
    processor::{CentralProcessor, CpuSources, LoadMode, NativeLoadCache},
    sources::{LoadAverageSource, NativeLoadSource, ProcessorCountProvider, TickSource},
    LoadAvgHarvest, LoadSettings, PerCoreTickMatrix, TickCategory, TickVector,
};
