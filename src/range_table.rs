//! The in-memory table of internationally assigned ISBN ranges.
//!
//! A [`RangeTable`] maps an EAN.UCC prefix (`978`, `979`) to its registration
//! groups, and each registration group to a [`RuleSet`]: the agency name plus
//! the registrant ranges and the number of digits a registrant in each range
//! occupies. Tables are usually built from the International ISBN Agency's
//! `RangeMessage.xml` (see [`crate::range_message`]) but can also be assembled
//! by hand.
//!
//! # Examples
//!
//! ```
//! use chk_isbn::{RangeTable, RegistrantRange, RuleSet};
//!
//! let mut table = RangeTable::new();
//! table.insert(
//!     "978",
//!     "0",
//!     RuleSet::new("English language", vec![RegistrantRange::new(0, 19, 2)]),
//! )?;
//!
//! let rules = table.rule_set("978", "0").unwrap();
//! assert!(rules.matches(2, 4));
//! assert!(!rules.matches(2, 20));
//! # Ok::<(), chk_isbn::IsbnError>(())
//! ```

use std::path::Path;

use serde::Serialize;

use crate::error::{RangeDataError, Result};
use crate::trie::DigitTrie;

/// One registrant range: values `lower..=upper` written with `length` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrantRange {
    /// Smallest registrant value in the range
    pub lower: u32,
    /// Largest registrant value in the range
    pub upper: u32,
    /// Number of digits a registrant in this range occupies
    pub length: usize,
}

impl RegistrantRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(lower: u32, upper: u32, length: usize) -> Self {
        RegistrantRange {
            lower,
            upper,
            length,
        }
    }

    /// Whether a registrant candidate of `length` digits with numeric `value`
    /// falls in this range.
    #[must_use]
    pub fn contains(&self, length: usize, value: u64) -> bool {
        self.length == length && (u64::from(self.lower)..=u64::from(self.upper)).contains(&value)
    }
}

/// The agency and registrant ranges of one registration group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// Name of the registration group agency
    pub agency: String,
    /// Registrant ranges in document order
    pub ranges: Vec<RegistrantRange>,
}

impl RuleSet {
    /// Create a rule set.
    #[must_use]
    pub fn new(agency: impl Into<String>, ranges: Vec<RegistrantRange>) -> Self {
        RuleSet {
            agency: agency.into(),
            ranges,
        }
    }

    /// Whether any range accepts a registrant of `length` digits with numeric `value`.
    #[must_use]
    pub fn matches(&self, length: usize, value: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(length, value))
    }
}

/// Header information of the range message a table was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeMessageInfo {
    /// Issuer of the message (normally "International ISBN Agency")
    pub source: String,
    /// Serial number identifying this edition of the message
    pub serial_number: String,
    /// Date the message was generated, as written in the document
    pub date: String,
}

/// Registration groups of one prefix, keyed by group digits.
pub type GroupTrie = DigitTrie<RuleSet>;

/// Table of assigned ranges: prefix, then registration group, then [`RuleSet`].
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    prefixes: DigitTrie<GroupTrie>,
    group_count: usize,
    info: RangeMessageInfo,
}

impl RangeTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a range message on disk, skipping malformed rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a range message.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        crate::range_message::load_path(path.as_ref(), &crate::LoadOptions::default())
    }

    /// Build a table from a range message held in memory, skipping malformed rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a range message.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        crate::range_message::load_str(xml, &crate::LoadOptions::default())
    }

    /// Add (or replace) the rule set for `prefix`-`group`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeDataError::MalformedGroup`] if either key is empty or
    /// contains anything but ASCII digits.
    pub fn insert(
        &mut self,
        prefix: &str,
        group: &str,
        rules: RuleSet,
    ) -> std::result::Result<(), RangeDataError> {
        for key in [prefix, group] {
            if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RangeDataError::MalformedGroup {
                    prefix: format!("{prefix}-{group}"),
                    reason: format!("{key:?} is not a digit string"),
                });
            }
        }

        let groups = self.prefixes.get_or_insert_with(prefix, GroupTrie::new);
        if groups.insert(group, rules).is_none() {
            self.group_count += 1;
        }
        Ok(())
    }

    /// Whether the table holds no registration groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group_count == 0
    }

    /// Number of registration groups across all prefixes.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Number of distinct prefixes.
    #[must_use]
    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether `prefix` is a known EAN.UCC prefix.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefixes.get(prefix).is_some()
    }

    /// The registration groups under `prefix`.
    #[must_use]
    pub fn groups(&self, prefix: &str) -> Option<&GroupTrie> {
        self.prefixes.get(prefix)
    }

    /// The rule set for `prefix`-`group`.
    #[must_use]
    pub fn rule_set(&self, prefix: &str, group: &str) -> Option<&RuleSet> {
        self.groups(prefix)?.get(group)
    }

    /// Root of the prefix trie, for digit-at-a-time walks.
    #[must_use]
    pub fn prefix_trie(&self) -> &DigitTrie<GroupTrie> {
        &self.prefixes
    }

    /// Header of the range message this table was built from.
    #[must_use]
    pub fn info(&self) -> &RangeMessageInfo {
        &self.info
    }

    pub(crate) fn set_info(&mut self, info: RangeMessageInfo) {
        self.info = info;
    }
}
