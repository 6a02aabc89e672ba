// SPDX-License-Identifier: MIT

//! Error taxonomy shared by every generator.
use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a generation request can fail.
///
/// Every variant except [`Error::EntropyUnavailable`] is a validation
/// error, raised before any entropy is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operating system entropy facility could not be reached.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// A length of zero was requested.
    #[error("invalid length: must be greater than zero")]
    InvalidLength,

    /// The requested bit width is zero or exceeds the output type.
    #[error("invalid bit width {bits}: must be between 1 and {max}")]
    InvalidBitWidth {
        /// Requested width.
        bits: u32,
        /// Largest width the operation supports.
        max: u32,
    },

    /// The charset has fewer than two distinct symbols.
    #[error("invalid charset: {distinct} distinct symbol(s), at least 2 required")]
    InvalidCharset {
        /// Number of distinct symbols supplied.
        distinct: usize,
    },

    /// The charset name is not recognized.
    #[error("unknown charset `{0}`")]
    UnknownCharset(String),

    /// The security level name is not recognized.
    #[error("unknown security level `{0}`")]
    UnknownSecurityLevel(String),

    /// Password minimums cannot fit in the requested length.
    #[error(
        "infeasible constraints: {min_digits} digit(s) + {min_special} special \
         exceed length {length}"
    )]
    InfeasibleConstraints {
        /// Requested password length.
        length: usize,
        /// Minimum digit count.
        min_digits: usize,
        /// Minimum special character count.
        min_special: usize,
    },
}

impl Error {
    /// Wrap an underlying entropy source error.
    ///
    /// # Example
    /// ```
    /// use cryptostrings::Error;
    ///
    /// fn fill_bytes(bytes: &mut [u8]) -> Result<(), Error> {
    ///    getrandom::getrandom(bytes).map_err(Error::entropy)
    /// }
    /// ```
    pub fn entropy<E>(error: E) -> Self
    where
        E: Display,
    {
        Self::EntropyUnavailable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_offending_values() {
        let err = Error::InfeasibleConstraints {
            length: 2,
            min_digits: 3,
            min_special: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("length 2"));
        assert!(msg.contains("3 digit"));

        let err = Error::InvalidBitWidth { bits: 0, max: 128 };
        assert_eq!(err.to_string(), "invalid bit width 0: must be between 1 and 128");
    }

    #[test]
    fn entropy_wraps_display() {
        let err = Error::entropy("no device");
        assert_eq!(err, Error::EntropyUnavailable("no device".into()));
    }
}
