//! Error types for ISBN operations.
//!
//! This module provides the [`IsbnError`] type for all ISBN library operations,
//! the [`RangeDataError`] type describing why range data could not be loaded,
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all ISBN library operations.
///
/// Each variant carries enough context (offending length, character, position or
/// check digit) to be handled programmatically without parsing the message.
#[derive(Error, Debug)]
pub enum IsbnError {
    /// The normalized ISBN is neither 10 nor 13 characters long.
    #[error("ISBN length is incorrect: expected 10 or 13 characters, found {length}")]
    InvalidLength {
        /// Number of characters after normalization
        length: usize,
    },

    /// A character other than a digit (or a trailing `X`) was found.
    #[error("Invalid character {character:?} found in ISBN at position {position}")]
    InvalidCharacter {
        /// Zero-based position in the normalized ISBN
        position: usize,
        /// The offending character
        character: char,
    },

    /// The supplied check digit does not match the calculated one.
    #[error("ISBN check digit is incorrect: expected '{expected}', found '{found}'")]
    InvalidCheckDigit {
        /// Check digit calculated from the preceding digits
        expected: char,
        /// Check digit supplied in the ISBN
        found: char,
    },

    /// No range data is loaded, so the ISBN elements cannot be resolved.
    #[error("No range data for parsing ISBNs (perhaps range data was not loaded)")]
    NoRangeData,

    /// The range message could not be read or decoded.
    #[error("Failed to load range data: {0}")]
    RangeDataLoad(#[from] RangeDataError),
}

/// Reasons a range message failed to load.
#[derive(Error, Debug)]
pub enum RangeDataError {
    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a well-formed range message.
    #[error("XML error: {0}")]
    Xml(String),

    /// A registration group record could not be interpreted.
    ///
    /// Only surfaced when loading in [`RecoveryMode::Strict`](crate::RecoveryMode::Strict).
    #[error("Malformed registration group {prefix:?}: {reason}")]
    MalformedGroup {
        /// The raw `Prefix` value of the group
        prefix: String,
        /// What was wrong with it
        reason: String,
    },

    /// A registrant rule could not be interpreted.
    ///
    /// Only surfaced when loading in [`RecoveryMode::Strict`](crate::RecoveryMode::Strict).
    #[error("Malformed rule in group {group:?}: {reason}")]
    MalformedRule {
        /// The raw `Prefix` value of the group owning the rule
        group: String,
        /// What was wrong with it
        reason: String,
    },
}

impl From<std::io::Error> for IsbnError {
    fn from(err: std::io::Error) -> Self {
        IsbnError::RangeDataLoad(RangeDataError::Io(err))
    }
}

/// Convenience type alias for [`std::result::Result`] with [`IsbnError`].
pub type Result<T> = std::result::Result<T, IsbnError>;
