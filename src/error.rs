//! Error types for identifier generation.

use thiserror::Error;

/// Errors raised when the options passed to a generator are invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No prefix was supplied where one is required.
    #[error("prefix must be a string")]
    MissingPrefix,

    /// The prefix is longer than eight characters.
    #[error("prefix must be no more than 8 characters, got {len}")]
    PrefixTooLong { len: usize },

    /// The prefix contains something other than hexadecimal digits.
    #[error("prefix must be only hexadecimal characters, got '{prefix}'")]
    PrefixNotHex { prefix: String },

    /// The timestamp option could not be resolved to non-negative Unix seconds.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The fixed fields do not fit in the 32-digit frame.
    #[error("prefix, timestamp, and markers need {needed} digits but only 32 are available")]
    LayoutOverflow { needed: usize },
}

impl Error {
    /// Returns true if this error was raised by prefix validation.
    pub fn is_prefix_error(&self) -> bool {
        matches!(
            self,
            Error::MissingPrefix | Error::PrefixTooLong { .. } | Error::PrefixNotHex { .. }
        )
    }
}
