use std::borrow::Cow;

use thiserror::Error;

/// An error around some option-setting, and the reason.
///
/// These are user-facing, so say what is wrong and how to fix it. Use
/// _single quotes_ (e.g. `'bad'`) when quoting the offending value or option.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("Configuration file error: {0}")]
    Config(Cow<'static, str>),
    #[error("Argument error: {0}")]
    Argument(Cow<'static, str>),
}

impl OptionError {
    pub(crate) fn config<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Config(reason.into())
    }

    /// A config value that could not be understood.
    pub(crate) fn invalid_config_value(key: &str) -> Self {
        OptionError::Config(Cow::Owned(format!(
            "'{key}' was set with an invalid value, please update it in your config file."
        )))
    }

    pub(crate) fn arg<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Argument(reason.into())
    }

    /// An argument value that could not be understood.
    pub(crate) fn invalid_arg_value(arg: &str) -> Self {
        OptionError::Argument(Cow::Owned(format!(
            "'--{arg}' was set with an invalid value, please update your arguments."
        )))
    }
}

pub(crate) type OptionResult<T> = Result<T, OptionError>;

impl From<toml_edit::de::Error> for OptionError {
    fn from(err: toml_edit::de::Error) -> Self {
        OptionError::Config(err.to_string().into())
    }
}
