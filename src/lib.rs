#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # chk-isbn: ISBN validation and parsing
//!
//! Validate, parse and convert International Standard Book Numbers using the
//! range data published by the International ISBN Agency.
//!
//! ## Quick Start
//!
//! ### Check digits only
//!
//! ```
//! use chk_isbn::{calc_check_digit, validate_check_digit};
//!
//! assert_eq!(calc_check_digit("0-547-92824-?").ok(), None);
//! assert_eq!(calc_check_digit("0547928246").unwrap(), '6');
//! assert!(validate_check_digit("978-0-547-92824-1"));
//! ```
//!
//! ### Parsing with range data
//!
//! ```no_run
//! use chk_isbn::RangeStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RangeStore::new();
//! store.load_range_data("RangeMessage.xml")?;
//!
//! let isbn = store.parse_isbn("978-8891230195")?;
//! assert_eq!(isbn.to_string(), "978-88-912-3019-5 (88-912-3019-7)");
//! assert_eq!(isbn.to_isbn10().as_deref(), Some("8891230197"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Normalization, length and character checks
//! - [`check_digit`] - ISBN-10 and ISBN-13 check-digit arithmetic
//! - [`range_table`] - In-memory table of assigned ranges
//! - [`range_message`] - Loading `RangeMessage.xml`
//! - [`parser`] - Splitting an ISBN into its elements
//! - [`isbn`] - The parsed value and its renderings
//! - [`range_store`] - Reloadable, thread-safe handle on a range table
//! - [`config`] - Load options
//! - [`error`] - Error types and result type

pub mod check_digit;
pub mod config;
pub mod error;
pub mod isbn;
pub mod parser;
pub mod range_message;
pub mod range_store;
pub mod range_table;
pub mod trie;
pub mod validation;

pub use check_digit::{calc_check_digit, calc_check_digit10, calc_check_digit13, validate_check_digit};
pub use config::{LoadOptions, RecoveryMode};
pub use error::{IsbnError, RangeDataError, Result};
pub use isbn::{Isbn, BOOKLAND_PREFIX};
pub use parser::parse_isbn;
pub use range_store::RangeStore;
pub use range_table::{RangeMessageInfo, RangeTable, RegistrantRange, RuleSet};
pub use trie::DigitTrie;
