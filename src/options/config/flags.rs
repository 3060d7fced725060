use serde::Deserialize;

use super::StringOrNum;

/// Output flags, mirroring the command-line arguments of the same name.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub(crate) struct FlagConfig {
    pub(crate) rate: Option<StringOrNum>,
    pub(crate) per_core: Option<bool>,
    pub(crate) ticks_only: Option<bool>,
    pub(crate) load_average: Option<bool>,
}
