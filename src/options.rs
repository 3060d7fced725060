//! How to handle command-line arguments and config files, and merge them into
//! the options cpuload runs with.
//!
//! Arguments take precedence over the config file, which takes precedence
//! over the defaults.

pub mod args;
pub mod config;
mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;

pub use self::{
    args::Args,
    config::Config,
    error::OptionError,
};
use self::{config::StringOrNum, error::OptionResult};
use crate::collection::cpu::LoadSettings;

const DEFAULT_CONFIG_FILE_LOCATION: &str = "cpuload/cpuload.toml";

/// The default time between samples.
pub const DEFAULT_RATE: Duration = Duration::from_millis(1000);

/// The smallest allowed time between samples.
pub const MINIMUM_RATE: Duration = Duration::from_millis(250);

/// Everything the binary needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuLoadOptions {
    pub rate: Duration,
    pub samples: Option<u64>,
    pub per_core: bool,
    pub ticks_only: bool,
    pub load_average: bool,
    pub settings: LoadSettings,
}

/// Returns the config path to use. An explicit location always wins; otherwise
/// this is the default location under the user's config directory, if there
/// is one.
pub fn get_config_path(override_config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(conf_loc) = override_config_path {
        return Some(conf_loc.to_path_buf());
    }

    dirs::config_dir().map(|path| path.join(DEFAULT_CONFIG_FILE_LOCATION))
}

/// Reads the config file at `path`.
///
/// A file at the default location is optional, and a missing one just means
/// the default config. A file that was asked for explicitly must exist.
pub fn read_config(path: Option<&Path>, explicit: bool) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !explicit && !path.exists() {
        crate::debug!("No config file at {}, using defaults.", path.display());
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Unable to read the config file at '{}'.", path.display()))?;
    let config = toml_edit::de::from_str(&contents).map_err(OptionError::from)?;

    Ok(config)
}

/// Loads the config file for the given arguments.
pub fn get_config(args: &Args) -> anyhow::Result<Config> {
    let explicit = args.general_args.config_location.as_deref().map(Path::new);
    let path = get_config_path(explicit);

    read_config(path.as_deref(), explicit.is_some())
}

/// Parses a duration given either as a number of milliseconds or as a
/// human-readable string.
fn try_parse_ms(value: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => humantime::parse_duration(value).ok(),
    }
}

fn duration_from_config(value: &StringOrNum) -> Option<Duration> {
    match value {
        StringOrNum::Num(ms) => Some(Duration::from_millis(*ms)),
        StringOrNum::String(value) => try_parse_ms(value),
    }
}

fn get_rate(args: &Args, config: &Config) -> OptionResult<Duration> {
    let rate = if let Some(rate) = &args.general_args.rate {
        let rate = try_parse_ms(rate).ok_or_else(|| OptionError::invalid_arg_value("rate"))?;
        if rate < MINIMUM_RATE {
            return Err(OptionError::arg("'--rate' must be at least 250 milliseconds."));
        }

        rate
    } else if let Some(rate) = config.flags.as_ref().and_then(|flags| flags.rate.as_ref()) {
        let rate =
            duration_from_config(rate).ok_or_else(|| OptionError::invalid_config_value("rate"))?;
        if rate < MINIMUM_RATE {
            return Err(OptionError::config("'rate' must be at least 250 milliseconds."));
        }

        rate
    } else {
        DEFAULT_RATE
    };

    Ok(rate)
}

/// Builds the load engine settings. Only the config file can change the
/// thresholds; `--disable_native` can only turn the native source off.
pub fn get_load_settings(args: &Args, config: &Config) -> OptionResult<LoadSettings> {
    let defaults = LoadSettings::default();
    let cpu = &config.cpu;

    let tick_refresh_threshold = match &cpu.tick_refresh_threshold {
        Some(value) => duration_from_config(value)
            .ok_or_else(|| OptionError::invalid_config_value("tick_refresh_threshold"))?,
        None => defaults.tick_refresh_threshold,
    };

    let native_throttle = match &cpu.native_throttle {
        Some(value) => duration_from_config(value)
            .ok_or_else(|| OptionError::invalid_config_value("native_throttle"))?,
        None => defaults.native_throttle,
    };

    let disable_native = args.cpu_args.disable_native || cpu.disable_native.unwrap_or(false);

    Ok(LoadSettings {
        tick_refresh_threshold,
        native_throttle,
        use_native: !disable_native,
    })
}

/// Whether a flag is set, either as an argument or in the config's `[flags]`.
macro_rules! is_flag_enabled {
    ($flag_name:ident, $args:expr, $config:expr) => {
        $args.cpu_args.$flag_name
            || $config
                .flags
                .as_ref()
                .and_then(|flags| flags.$flag_name)
                .unwrap_or(false)
    };
}

impl CpuLoadOptions {
    /// Merges arguments and the config file.
    pub fn new(args: &Args, config: &Config) -> OptionResult<Self> {
        Ok(Self {
            rate: get_rate(args, config)?,
            samples: args.general_args.samples,
            per_core: is_flag_enabled!(per_core, args, config),
            ticks_only: is_flag_enabled!(ticks_only, args, config),
            load_average: is_flag_enabled!(load_average, args, config),
            settings: get_load_settings(args, config)?,
        })
    }
}
