pub mod cpu;
pub mod flags;

use serde::Deserialize;

use self::{cpu::CpuConfig, flags::FlagConfig};

/// The contents of a config file.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct Config {
    pub(crate) flags: Option<FlagConfig>,
    #[serde(default)]
    pub(crate) cpu: CpuConfig,
}

/// A duration in a config file; either a number of milliseconds or a
/// human-readable string like `"5s"`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum StringOrNum {
    String(String),
    Num(u64),
}

impl From<String> for StringOrNum {
    fn from(value: String) -> Self {
        StringOrNum::String(value)
    }
}

impl From<u64> for StringOrNum {
    fn from(value: u64) -> Self {
        StringOrNum::Num(value)
    }
}
