use serde::Deserialize;

use super::StringOrNum;

/// CPU load engine settings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct CpuConfig {
    /// How old tick snapshots can get before they are re-read.
    pub(crate) tick_refresh_threshold: Option<StringOrNum>,
    /// How old a native reading can get before it is re-queried.
    pub(crate) native_throttle: Option<StringOrNum>,
    pub(crate) disable_native: Option<bool>,
}
