//! The parsed ISBN value and its ISBN-10 / ISBN-13 renderings.
//!
//! An ISBN-13 is made of five elements:
//!
//! ```text
//! 978-88-04-47328-2
//!  |   |  |    |   +-- check digit
//!  |   |  |    +------ publication
//!  |   |  +----------- registrant
//!  |   +-------------- registration group
//!  +------------------ EAN.UCC prefix
//! ```
//!
//! An ISBN-10 is the same number without the `978` prefix and with its own
//! check digit. ISBNs under any other prefix (e.g. `979`) have no ISBN-10 form.

use std::fmt;

use serde::Serialize;

/// The EAN.UCC prefix shared by every ISBN that also has an ISBN-10 form.
pub const BOOKLAND_PREFIX: &str = "978";

/// The elements of a parsed ISBN.
///
/// Values are produced by [`parse_isbn`](crate::parse_isbn) or
/// [`RangeStore::parse_isbn`](crate::RangeStore::parse_isbn) and never change
/// afterwards. An element the range data could not resolve is left empty and
/// its digits are carried by `publication`, so
/// `prefix + registration_group + registrant + publication` always spells out
/// every digit before the check digit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Isbn {
    /// EAN.UCC prefix (`978`, `979`)
    pub prefix: String,
    /// Registration group (language area or country)
    pub registration_group: String,
    /// Registrant (publisher or imprint)
    pub registrant: String,
    /// Publication (edition and format of a title)
    pub publication: String,
    /// Agency responsible for the registration group
    pub agency: String,
    /// ISBN-10 check digit, when an ISBN-10 form exists
    pub check_digit10: Option<char>,
    /// ISBN-13 check digit
    pub check_digit13: Option<char>,
    /// Whether the supplied check digit matched the calculated one
    pub is_valid: bool,
}

impl Isbn {
    /// Whether this ISBN has an ISBN-10 form.
    #[must_use]
    pub fn is_bookland(&self) -> bool {
        self.prefix == BOOKLAND_PREFIX
    }

    /// Whether the prefix, registration group and registrant were all found
    /// in the range data.
    ///
    /// A `false` here does not make the ISBN invalid; it means the number is
    /// outside every range currently assigned.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        !self.prefix.is_empty() && !self.registration_group.is_empty() && !self.registrant.is_empty()
    }

    /// The ISBN as a bare ISBN-13 string.
    ///
    /// # Examples
    ///
    /// ```
    /// use chk_isbn::Isbn;
    ///
    /// let isbn = Isbn {
    ///     prefix: "978".into(),
    ///     registration_group: "0".into(),
    ///     registrant: "547".into(),
    ///     publication: "92824".into(),
    ///     check_digit10: Some('6'),
    ///     check_digit13: Some('1'),
    ///     is_valid: true,
    ///     ..Isbn::default()
    /// };
    /// assert_eq!(isbn.to_isbn13().as_deref(), Some("9780547928241"));
    /// assert_eq!(isbn.to_isbn10().as_deref(), Some("0547928246"));
    /// ```
    #[must_use]
    pub fn to_isbn13(&self) -> Option<String> {
        let check = self.check_digit13.filter(|_| self.is_valid)?;
        Some(format!(
            "{}{}{}{}{check}",
            self.prefix, self.registration_group, self.registrant, self.publication
        ))
    }

    /// The ISBN as a bare ISBN-10 string, if it has one.
    #[must_use]
    pub fn to_isbn10(&self) -> Option<String> {
        let check = self.isbn10_check_digit()?;
        Some(format!(
            "{}{}{}{check}",
            self.registration_group, self.registrant, self.publication
        ))
    }

    /// The hyphenated ISBN-13, e.g. `978-0-547-92824-1`.
    #[must_use]
    pub fn hyphenated13(&self) -> Option<String> {
        let check = self.check_digit13.filter(|_| self.is_valid)?;
        Some(format!(
            "{}-{}-{}-{}-{check}",
            self.prefix, self.registration_group, self.registrant, self.publication
        ))
    }

    /// The hyphenated ISBN-10, e.g. `0-547-92824-6`, if it has one.
    #[must_use]
    pub fn hyphenated10(&self) -> Option<String> {
        let check = self.isbn10_check_digit()?;
        Some(format!(
            "{}-{}-{}-{check}",
            self.registration_group, self.registrant, self.publication
        ))
    }

    fn isbn10_check_digit(&self) -> Option<char> {
        if self.is_valid && self.is_bookland() {
            self.check_digit10
        } else {
            None
        }
    }
}

/// Formats as `978-0-547-92824-1 (0-547-92824-6)`; the ISBN-10 part is only
/// present for `978` ISBNs. An invalid ISBN formats as an empty string.
impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(isbn13) = self.hyphenated13() else {
            return Ok(());
        };
        f.write_str(&isbn13)?;
        if let Some(isbn10) = self.hyphenated10() {
            write!(f, " ({isbn10})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn italian() -> Isbn {
        Isbn {
            prefix: "978".to_string(),
            registration_group: "88".to_string(),
            registrant: "912".to_string(),
            publication: "3019".to_string(),
            agency: "Italy".to_string(),
            check_digit10: Some('7'),
            check_digit13: Some('5'),
            is_valid: true,
        }
    }

    fn french() -> Isbn {
        Isbn {
            prefix: "979".to_string(),
            registration_group: "10".to_string(),
            registrant: "90636".to_string(),
            publication: "07".to_string(),
            agency: "France".to_string(),
            check_digit10: None,
            check_digit13: Some('1'),
            is_valid: true,
        }
    }

    #[test]
    fn test_display_bookland() {
        assert_eq!(italian().to_string(), "978-88-912-3019-5 (88-912-3019-7)");
    }

    #[test]
    fn test_display_979_has_no_isbn10() {
        assert_eq!(french().to_string(), "979-10-90636-07-1");
        assert_eq!(french().to_isbn10(), None);
        assert_eq!(french().to_isbn13().as_deref(), Some("9791090636071"));
    }

    #[test]
    fn test_conversions() {
        let isbn = italian();
        assert_eq!(isbn.to_isbn13().as_deref(), Some("9788891230195"));
        assert_eq!(isbn.to_isbn10().as_deref(), Some("8891230197"));
        assert_eq!(isbn.hyphenated10().as_deref(), Some("88-912-3019-7"));
    }

    #[test]
    fn test_invalid_renders_nothing() {
        let isbn = Isbn {
            is_valid: false,
            ..italian()
        };
        assert_eq!(isbn.to_string(), "");
        assert_eq!(isbn.to_isbn13(), None);
        assert_eq!(isbn.to_isbn10(), None);
        assert_eq!(Isbn::default().to_string(), "");
    }

    #[test]
    fn test_resolution_flags() {
        assert!(italian().is_fully_resolved());
        assert!(italian().is_bookland());
        assert!(!french().is_bookland());

        let unresolved = Isbn {
            registrant: String::new(),
            publication: "9123019".to_string(),
            ..italian()
        };
        assert!(!unresolved.is_fully_resolved());
        assert_eq!(unresolved.to_string(), "978-88--9123019-5 (88--9123019-7)");
    }
}
