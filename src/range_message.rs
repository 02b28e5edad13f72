//! Deserialization of the International ISBN Agency range message.
//!
//! The agency publishes the assigned ranges as `RangeMessage.xml`
//! (<https://www.isbn-international.org/range_file_generation>). Only the
//! `RegistrationGroups` section is needed to split an ISBN into its elements:
//!
//! ```xml
//! <ISBNRangeMessage>
//!   <MessageSource>International ISBN Agency</MessageSource>
//!   <MessageSerialNumber>...</MessageSerialNumber>
//!   <MessageDate>...</MessageDate>
//!   <RegistrationGroups>
//!     <Group>
//!       <Prefix>978-0</Prefix>
//!       <Agency>English language</Agency>
//!       <Rules>
//!         <Rule>
//!           <Range>0000000-1999999</Range>
//!           <Length>2</Length>
//!         </Rule>
//!       </Rules>
//!     </Group>
//!   </RegistrationGroups>
//! </ISBNRangeMessage>
//! ```
//!
//! A rule's bounds are the first `Length` digits of each side of its `Range`.
//! Rules with a length of `0`, or whose upper bound works out to `0`, mark
//! unassigned ranges and are dropped.

use std::path::Path;

use quick_xml::de::from_str as xml_from_str;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{LoadOptions, RecoveryMode};
use crate::error::{RangeDataError, Result};
use crate::range_table::{RangeMessageInfo, RangeTable, RegistrantRange, RuleSet};

/// Root of a range message document.
#[derive(Debug, Deserialize)]
#[serde(rename = "ISBNRangeMessage")]
pub struct RangeMessage {
    /// Issuer of the message
    #[serde(rename = "MessageSource", default)]
    pub message_source: String,
    /// Serial number of this edition of the message
    #[serde(rename = "MessageSerialNumber", default)]
    pub message_serial_number: String,
    /// Generation date, as written
    #[serde(rename = "MessageDate", default)]
    pub message_date: String,
    /// Registration groups and their registrant rules
    #[serde(rename = "RegistrationGroups")]
    pub registration_groups: RegistrationGroups,
}

/// The `RegistrationGroups` section.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationGroups {
    /// Group records in document order
    #[serde(rename = "Group", default)]
    pub groups: Vec<GroupRecord>,
}

/// A `Group` record.
#[derive(Debug, Deserialize)]
pub struct GroupRecord {
    /// Prefix and group joined by a hyphen, e.g. `978-88`
    #[serde(rename = "Prefix")]
    pub prefix: String,
    /// Registration group agency
    #[serde(rename = "Agency", default)]
    pub agency: String,
    /// Registrant rules
    #[serde(rename = "Rules", default)]
    pub rules: Rules,
}

/// A `Rules` list.
#[derive(Debug, Default, Deserialize)]
pub struct Rules {
    /// Rules in document order
    #[serde(rename = "Rule", default)]
    pub rules: Vec<RuleRecord>,
}

/// A `Rule`: a seven-digit range and the registrant length it implies.
#[derive(Debug, Default, Deserialize)]
pub struct RuleRecord {
    /// Lower and upper bound joined by a hyphen, e.g. `0000000-1999999`
    #[serde(rename = "Range", default)]
    pub range: String,
    /// Registrant length in digits, as text
    #[serde(rename = "Length", default)]
    pub length: String,
}

impl RuleRecord {
    /// Interpret this rule as a registrant range.
    ///
    /// Returns `Ok(None)` for rules that mark unassigned ranges.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the rule is malformed.
    pub fn to_range(&self) -> std::result::Result<Option<RegistrantRange>, String> {
        let length: usize = self
            .length
            .trim()
            .parse()
            .map_err(|e| format!("invalid length {:?}: {e}", self.length))?;
        if length == 0 {
            return Ok(None);
        }

        let (lower, upper) = self
            .range
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("range {:?} is not of the form lower-upper", self.range))?;
        let bound = |side: &str| -> std::result::Result<u32, String> {
            let digits = side
                .get(..length)
                .ok_or_else(|| format!("bound {side:?} is shorter than length {length}"))?;
            digits
                .parse()
                .map_err(|e| format!("bound {digits:?} is not a number: {e}"))
        };
        let lower = bound(lower)?;
        let upper = bound(upper)?;

        if upper == 0 {
            return Ok(None);
        }
        Ok(Some(RegistrantRange::new(lower, upper, length)))
    }
}

/// Decode a range message without building a table.
///
/// # Errors
///
/// Returns [`RangeDataError::Xml`] if the document cannot be decoded.
pub fn parse_range_message(xml: &str) -> Result<RangeMessage> {
    xml_from_str(xml)
        .map_err(|e| RangeDataError::Xml(format!("Failed to parse range message: {e}")).into())
}

/// Build a [`RangeTable`] from a decoded range message.
///
/// # Errors
///
/// In [`RecoveryMode::Strict`], returns the first malformed group or rule.
pub fn build_table(message: &RangeMessage, options: &LoadOptions) -> Result<RangeTable> {
    let mut table = RangeTable::new();
    let mut skipped = 0usize;

    for group in &message.registration_groups.groups {
        let Some((prefix, group_digits)) = group.prefix.trim().split_once('-') else {
            recover(
                options,
                RangeDataError::MalformedGroup {
                    prefix: group.prefix.clone(),
                    reason: "expected <prefix>-<group>".to_string(),
                },
            )?;
            skipped += 1;
            continue;
        };

        let mut ranges = Vec::with_capacity(group.rules.rules.len());
        for rule in &group.rules.rules {
            match rule.to_range() {
                Ok(Some(range)) => ranges.push(range),
                Ok(None) => {},
                Err(reason) => {
                    recover(
                        options,
                        RangeDataError::MalformedRule {
                            group: group.prefix.clone(),
                            reason,
                        },
                    )?;
                    skipped += 1;
                },
            }
        }

        let rules = RuleSet::new(group.agency.trim(), ranges);
        if let Err(err) = table.insert(prefix, group_digits, rules) {
            recover(options, err)?;
            skipped += 1;
        }
    }

    table.set_info(RangeMessageInfo {
        source: message.message_source.trim().to_string(),
        serial_number: message.message_serial_number.trim().to_string(),
        date: message.message_date.trim().to_string(),
    });

    info!(
        serial = %table.info().serial_number,
        date = %table.info().date,
        prefixes = table.prefix_count(),
        groups = table.group_count(),
        skipped,
        "Loaded ISBN range data"
    );
    Ok(table)
}

/// Decode a range message held in memory and build its table.
///
/// # Errors
///
/// Returns an error if the document cannot be decoded, or in strict mode if
/// it contains a malformed group or rule.
pub fn load_str(xml: &str, options: &LoadOptions) -> Result<RangeTable> {
    let message = parse_range_message(xml)?;
    build_table(&message, options)
}

/// Read a range message from disk and build its table.
///
/// # Errors
///
/// Returns [`RangeDataError::Io`] if the file cannot be read, otherwise as
/// [`load_str`].
pub fn load_path(path: &Path, options: &LoadOptions) -> Result<RangeTable> {
    debug!(path = %path.display(), mode = %options.mode, "Reading ISBN range message");
    let xml = std::fs::read_to_string(path).map_err(RangeDataError::Io)?;
    load_str(&xml, options)
}

fn recover(options: &LoadOptions, error: RangeDataError) -> Result<()> {
    match options.mode {
        RecoveryMode::Strict => Err(error.into()),
        RecoveryMode::Lenient => {
            warn!(%error, "Skipping malformed range data");
            Ok(())
        },
    }
}
