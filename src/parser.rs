//! Splitting an ISBN into its elements using range data.
//!
//! The prefix, registration group and registrant are all variable width, so
//! their boundaries can only be found by consulting the range table. The
//! digits before the check digit are consumed left to right, one at a time:
//!
//! 1. **Prefix** - extend the candidate until it is a known EAN.UCC prefix.
//!    ISBN-10s skip this step and take the `978` prefix.
//! 2. **Registration group** - extend until it is a known group of that prefix.
//! 3. **Registrant** - extend until some range of the group has the same
//!    length as the candidate and contains its value.
//! 4. **Publication** - everything left over.
//!
//! Each element is settled by the first match and never revisited. When the
//! digits run out before an element settles, that element stays empty and
//! the digits it had collected become the publication; the ISBN is still
//! valid if its check digit is.
//!
//! For example, `8804473282` parses as `978` / `88` (Italy) / `04` /
//! `47328` / `2`, and `9780670013951` as `978` / `0` (English language) /
//! `670` / `01395` / `1`.

use std::mem;

use tracing::debug;

use crate::check_digit::{calc_check_digit10, calc_check_digit13, verify_check_digit};
use crate::error::{IsbnError, Result};
use crate::isbn::{Isbn, BOOKLAND_PREFIX};
use crate::range_table::{GroupTrie, RangeTable, RuleSet};
use crate::trie::DigitTrie;
use crate::validation::{validate_structure, ISBN10_LEN};

/// Which element the next digit belongs to, with the position reached in
/// the range table so far. `None` trie positions mean no key can match any more.
#[derive(Debug, Clone, Copy)]
enum Stage<'t> {
    Prefix(Option<&'t DigitTrie<GroupTrie>>),
    Group(Option<&'t GroupTrie>),
    Registrant(&'t RuleSet, u64),
    Publication,
}

#[derive(Debug)]
struct ElementScanner<'t> {
    stage: Stage<'t>,
    pending: String,
    isbn: Isbn,
}

impl<'t> ElementScanner<'t> {
    /// Scanner for an ISBN-13 body, starting from the prefix.
    fn new(table: &'t RangeTable) -> Self {
        ElementScanner {
            stage: Stage::Prefix(Some(table.prefix_trie())),
            pending: String::new(),
            isbn: Isbn::default(),
        }
    }

    /// Scanner for an ISBN-10 body, whose prefix is implied.
    fn with_prefix(table: &'t RangeTable, prefix: &str) -> Self {
        ElementScanner {
            stage: Stage::Group(table.groups(prefix)),
            pending: String::new(),
            isbn: Isbn {
                prefix: prefix.to_string(),
                ..Isbn::default()
            },
        }
    }

    fn push(&mut self, digit: u8) {
        self.pending.push(char::from(digit));
        self.stage = match self.stage {
            Stage::Prefix(node) => {
                let node = node.and_then(|n| n.child(digit));
                match node.and_then(DigitTrie::value) {
                    Some(groups) => {
                        self.isbn.prefix = mem::take(&mut self.pending);
                        Stage::Group(Some(groups))
                    },
                    None => Stage::Prefix(node),
                }
            },
            Stage::Group(node) => {
                let node = node.and_then(|n| n.child(digit));
                match node.and_then(DigitTrie::value) {
                    Some(rules) => {
                        self.isbn.registration_group = mem::take(&mut self.pending);
                        self.isbn.agency.clone_from(&rules.agency);
                        Stage::Registrant(rules, 0)
                    },
                    None => Stage::Group(node),
                }
            },
            Stage::Registrant(rules, value) => {
                let value = value * 10 + u64::from(digit - b'0');
                if rules.matches(self.pending.len(), value) {
                    self.isbn.registrant = mem::take(&mut self.pending);
                    Stage::Publication
                } else {
                    Stage::Registrant(rules, value)
                }
            },
            Stage::Publication => Stage::Publication,
        };
    }

    fn scan(mut self, digits: &str) -> Isbn {
        for digit in digits.bytes() {
            self.push(digit);
        }
        self.isbn.publication = self.pending;
        self.isbn
    }
}

/// Parse an ISBN-10 or ISBN-13 into its elements.
///
/// The input may contain spaces and hyphens and a lowercase `x`. It is
/// checked for length, characters and check digit, in that order, before the
/// range table is consulted.
///
/// # Examples
///
/// ```
/// use chk_isbn::{parse_isbn, RangeTable, RegistrantRange, RuleSet};
///
/// let mut table = RangeTable::new();
/// table.insert("978", "88", RuleSet::new("Italy", vec![
///     RegistrantRange::new(0, 19, 2),
///     RegistrantRange::new(910, 926, 3),
/// ]))?;
///
/// let isbn = parse_isbn("978-8891230195", &table)?;
/// assert_eq!(isbn.registrant, "912");
/// assert_eq!(isbn.to_string(), "978-88-912-3019-5 (88-912-3019-7)");
/// # Ok::<(), chk_isbn::IsbnError>(())
/// ```
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`], [`IsbnError::InvalidCharacter`] or
/// [`IsbnError::InvalidCheckDigit`] for a malformed ISBN, and
/// [`IsbnError::NoRangeData`] if `table` is empty.
pub fn parse_isbn(isbn: &str, table: &RangeTable) -> Result<Isbn> {
    let normalized = validate_structure(isbn)?;
    let check_digit = verify_check_digit(&normalized)?;
    if table.is_empty() {
        return Err(IsbnError::NoRangeData);
    }

    let (body, _) = normalized.split_at(normalized.len() - 1);
    let is_isbn10 = normalized.len() == ISBN10_LEN;
    let scanner = if is_isbn10 {
        ElementScanner::with_prefix(table, BOOKLAND_PREFIX)
    } else {
        ElementScanner::new(table)
    };

    let mut parsed = scanner.scan(body);
    parsed.is_valid = true;
    if is_isbn10 {
        parsed.check_digit10 = Some(check_digit);
        parsed.check_digit13 = Some(calc_check_digit13(&format!("{BOOKLAND_PREFIX}{body}"))?);
    } else {
        parsed.check_digit13 = Some(check_digit);
        if parsed.is_bookland() {
            let isbn10_body = format!(
                "{}{}{}",
                parsed.registration_group, parsed.registrant, parsed.publication
            );
            parsed.check_digit10 = Some(calc_check_digit10(&isbn10_body)?);
        }
    }

    if !parsed.is_fully_resolved() {
        debug!(isbn = %normalized, "ISBN elements not fully resolved by range data");
    }
    Ok(parsed)
}
