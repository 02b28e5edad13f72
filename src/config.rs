//! Options controlling how range data is loaded.
//!
//! The International ISBN Agency's range message is large and hand-maintained.
//! By default a rule that cannot be interpreted is skipped with a warning so the
//! rest of the table still loads; [`RecoveryMode::Strict`] turns that warning
//! into an error for callers who would rather refuse a suspicious file.

use std::fmt;

/// Strategy for handling malformed groups and rules in a range message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Abort the load on the first malformed group or rule
    Strict,
    /// Skip malformed groups and rules, logging a warning for each (default)
    #[default]
    Lenient,
}

impl fmt::Display for RecoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// Configuration for loading a range message.
///
/// # Examples
///
/// ```
/// use chk_isbn::{LoadOptions, RecoveryMode};
///
/// let lenient = LoadOptions::default();
/// assert_eq!(lenient.mode, RecoveryMode::Lenient);
///
/// let strict = LoadOptions::strict();
/// assert_eq!(strict.mode, RecoveryMode::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// How malformed groups and rules are treated.
    pub mode: RecoveryMode,
}

impl LoadOptions {
    /// Options that reject any malformed group or rule.
    #[must_use]
    pub fn strict() -> Self {
        LoadOptions {
            mode: RecoveryMode::Strict,
        }
    }

    /// Options that skip malformed groups and rules.
    #[must_use]
    pub fn lenient() -> Self {
        LoadOptions {
            mode: RecoveryMode::Lenient,
        }
    }
}
