//! Normalization and structural validation of ISBN strings.
//!
//! ISBNs arrive in many shapes (`978-0-547-92824-1`, `0 547 92824 6`,
//! `089686281x`). Before anything else they are normalized to a bare,
//! uppercase string and checked for length and character set. These checks
//! run in a fixed order and fail fast:
//!
//! 1. [`normalize`] - uppercase, drop whitespace and hyphens
//! 2. [`check_length`] - exactly 10 or 13 characters
//! 3. [`check_characters`] - digits, with an optional trailing `X`

use crate::error::{IsbnError, Result};

/// Length of an ISBN-10, check digit included.
pub const ISBN10_LEN: usize = 10;

/// Length of an ISBN-13, check digit included.
pub const ISBN13_LEN: usize = 13;

/// Strip all whitespace and hyphens from an ISBN and uppercase it.
///
/// # Examples
///
/// ```
/// use chk_isbn::validation::normalize;
///
/// assert_eq!(normalize("978-0-306-40615-7"), "9780306406157");
/// assert_eq!(normalize(" 0-8968 6281-x "), "089686281X");
/// ```
#[must_use]
pub fn normalize(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Check that a normalized ISBN is 10 or 13 characters long.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`] for any other length.
pub fn check_length(isbn: &str) -> Result<()> {
    match isbn.chars().count() {
        ISBN10_LEN | ISBN13_LEN => Ok(()),
        length => Err(IsbnError::InvalidLength { length }),
    }
}

/// Check that every character but the last is an ASCII digit and the last is
/// an ASCII digit or `X`.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidCharacter`] naming the first offending character.
pub fn check_characters(isbn: &str) -> Result<()> {
    let last = isbn.chars().count().saturating_sub(1);
    for (position, character) in isbn.chars().enumerate() {
        let ok = character.is_ascii_digit() || (position == last && character == 'X');
        if !ok {
            return Err(IsbnError::InvalidCharacter {
                position,
                character,
            });
        }
    }
    Ok(())
}

/// Normalize an ISBN and run the structural checks on it.
///
/// On success the returned string is pure ASCII, 10 or 13 bytes long.
///
/// # Errors
///
/// Returns the first failing check's error.
pub fn validate_structure(isbn: &str) -> Result<String> {
    let normalized = normalize(isbn);
    check_length(&normalized)?;
    check_characters(&normalized)?;
    Ok(normalized)
}
