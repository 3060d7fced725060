//! Error code related to data collection.

use std::{borrow::Cow, num::ParseIntError};

use thiserror::Error;

/// A type alias for handling collection-related errors.
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// The errors that can happen with data collection. These never escape the
/// load queries themselves; sources log them and fall back to "no data".
#[derive(Debug, Error)]
pub enum CollectionError {
    /// An error when there is an IO exception.
    #[error(transparent)]
    InvalidIo(#[from] std::io::Error),
    #[error("Parsing error, {0}")]
    /// An error to represent errors around parsing.
    Parsing(Cow<'static, str>),
}

impl CollectionError {
    /// A parsing error.
    pub fn parsing<C: Into<Cow<'static, str>>>(reason: C) -> Self {
        Self::Parsing(reason.into())
    }
}

impl From<ParseIntError> for CollectionError {
    fn from(err: ParseIntError) -> Self {
        CollectionError::Parsing(err.to_string().into())
    }
}
