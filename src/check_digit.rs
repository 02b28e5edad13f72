//! Check-digit arithmetic for ISBN-10 and ISBN-13.
//!
//! - **ISBN-10**: the first nine digits are weighted 10 down to 2 and summed;
//!   the check digit is `(11 - sum mod 11) mod 11`, with 10 written as `X`.
//! - **ISBN-13**: the first twelve digits are weighted alternately 1 and 3 and
//!   summed; the check digit is `(10 - sum mod 10) mod 10`.
//!
//! # Examples
//!
//! ```
//! use chk_isbn::check_digit::{calc_check_digit, validate_check_digit};
//!
//! assert_eq!(calc_check_digit("0-8968-6281-?").ok(), None); // bad character
//! assert_eq!(calc_check_digit("089686281x").unwrap(), 'X');
//! assert!(validate_check_digit("978-0-547-92824-1"));
//! ```

use crate::error::{IsbnError, Result};
use crate::validation::{validate_structure, ISBN10_LEN};

/// Read the first `N` characters of `isbn` as decimal digits.
fn leading_digits<const N: usize>(isbn: &str) -> Result<[u32; N]> {
    let mut digits = [0; N];
    let mut chars = isbn.chars().enumerate();
    for slot in &mut digits {
        let (position, character) = chars.next().ok_or_else(|| IsbnError::InvalidLength {
            length: isbn.chars().count(),
        })?;
        *slot = character
            .to_digit(10)
            .ok_or(IsbnError::InvalidCharacter {
                position,
                character,
            })?;
    }
    Ok(digits)
}

/// Calculate the ISBN-10 check digit over the first nine digits of `isbn`.
///
/// Anything after the ninth character is ignored, so both a complete ISBN-10
/// and its nine-digit body are accepted.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`] if fewer than nine characters are
/// supplied, or [`IsbnError::InvalidCharacter`] if one of them is not a digit.
pub fn calc_check_digit10(isbn: &str) -> Result<char> {
    let digits = leading_digits::<9>(isbn)?;
    let sum: u32 = digits
        .iter()
        .zip((2..=10).rev())
        .map(|(d, weight)| d * weight)
        .sum();
    let rem = (11 - sum % 11) % 11;
    Ok(if rem == 10 {
        'X'
    } else {
        char::from_digit(rem, 10).unwrap_or('0')
    })
}

/// Calculate the ISBN-13 check digit over the first twelve digits of `isbn`.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`] if fewer than twelve characters are
/// supplied, or [`IsbnError::InvalidCharacter`] if one of them is not a digit.
pub fn calc_check_digit13(isbn: &str) -> Result<char> {
    let digits = leading_digits::<12>(isbn)?;
    let sum: u32 = digits
        .chunks_exact(2)
        .map(|pair| pair[0] + 3 * pair[1])
        .sum();
    let rem = (10 - sum % 10) % 10;
    Ok(char::from_digit(rem, 10).unwrap_or('0'))
}

/// Calculate the check digit for an ISBN-10 or ISBN-13.
///
/// The ISBN is normalized and structurally validated first; the check digit is
/// then computed over everything but the last character, which is ignored.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`] or [`IsbnError::InvalidCharacter`]
/// for malformed input.
pub fn calc_check_digit(isbn: &str) -> Result<char> {
    let normalized = validate_structure(isbn)?;
    calc_for_normalized(&normalized)
}

/// Test whether the check digit of an ISBN matches the calculated one.
///
/// Any malformation is reported as `false` rather than as an error.
#[must_use]
pub fn validate_check_digit(isbn: &str) -> bool {
    let normalized = crate::validation::normalize(isbn);
    match (normalized.chars().last(), calc_check_digit(&normalized)) {
        (Some(provided), Ok(calculated)) => provided == calculated,
        _ => false,
    }
}

/// Compare the supplied check digit of a structurally valid ISBN with the
/// calculated one.
pub(crate) fn verify_check_digit(normalized: &str) -> Result<char> {
    let expected = calc_for_normalized(normalized)?;
    let found = normalized.chars().last().unwrap_or_default();
    if found == expected {
        Ok(found)
    } else {
        Err(IsbnError::InvalidCheckDigit { expected, found })
    }
}

fn calc_for_normalized(normalized: &str) -> Result<char> {
    if normalized.len() == ISBN10_LEN {
        calc_check_digit10(normalized)
    } else {
        calc_check_digit13(normalized)
    }
}
