//! A shareable, reloadable handle on the range table.
//!
//! [`RangeStore`] owns one [`RangeTable`] behind a read-write lock. Parses
//! take the read lock, so any number can run at once; loading and unloading
//! take the write lock. A load builds the new table before taking the lock,
//! so parses never observe a half-loaded table and a failed load leaves the
//! previous table in place.
//!
//! # Examples
//!
//! ```no_run
//! use chk_isbn::RangeStore;
//!
//! let store = RangeStore::new();
//! assert!(!store.has_range_data());
//!
//! store.load_range_data("RangeMessage.xml")?;
//! let isbn = store.parse_isbn("978-0-547-92824-1")?;
//! println!("{isbn}");
//! # Ok::<(), chk_isbn::IsbnError>(())
//! ```

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::config::LoadOptions;
use crate::error::Result;
use crate::isbn::Isbn;
use crate::range_message;
use crate::range_table::{RangeMessageInfo, RangeTable};

/// Caller-owned range data with an explicit load/unload lifecycle.
#[derive(Debug, Default)]
pub struct RangeStore {
    table: RwLock<RangeTable>,
    options: LoadOptions,
}

impl RangeStore {
    /// Create a store with no range data and default (lenient) load options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with no range data that loads with `options`.
    #[must_use]
    pub fn with_options(options: LoadOptions) -> Self {
        RangeStore {
            table: RwLock::default(),
            options,
        }
    }

    /// Create a store around an already built table.
    #[must_use]
    pub fn from_table(table: RangeTable) -> Self {
        RangeStore {
            table: RwLock::new(table),
            options: LoadOptions::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RangeTable> {
        // A panic while holding the lock cannot leave a table half-replaced
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RangeTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether non-empty range data is loaded.
    #[must_use]
    pub fn has_range_data(&self) -> bool {
        !self.read().is_empty()
    }

    /// Header of the loaded range message.
    #[must_use]
    pub fn info(&self) -> RangeMessageInfo {
        self.read().info().clone()
    }

    /// Replace the range data with the contents of a range message file.
    ///
    /// Returns the number of registration groups loaded.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::RangeDataLoad`](crate::IsbnError::RangeDataLoad) if the
    /// file cannot be read or decoded; the previous data stays loaded.
    pub fn load_range_data(&self, path: impl AsRef<Path>) -> Result<usize> {
        let table = range_message::load_path(path.as_ref(), &self.options)?;
        Ok(self.replace(table))
    }

    /// Replace the range data with a range message held in memory.
    ///
    /// # Errors
    ///
    /// As [`load_range_data`](Self::load_range_data).
    pub fn load_range_data_from_str(&self, xml: &str) -> Result<usize> {
        let table = range_message::load_str(xml, &self.options)?;
        Ok(self.replace(table))
    }

    /// Replace the range data with `table`, returning its group count.
    pub fn replace(&self, table: RangeTable) -> usize {
        let groups = table.group_count();
        *self.write() = table;
        groups
    }

    /// Drop all range data, returning the number of groups that were loaded.
    pub fn unload_range_data(&self) -> usize {
        let old = std::mem::take(&mut *self.write());
        debug!(groups = old.group_count(), "Unloaded ISBN range data");
        old.group_count()
    }

    /// Parse an ISBN against the loaded range data.
    ///
    /// # Errors
    ///
    /// See [`parse_isbn`](crate::parse_isbn); returns
    /// [`IsbnError::NoRangeData`](crate::IsbnError::NoRangeData) before any data
    /// has been loaded.
    pub fn parse_isbn(&self, isbn: &str) -> Result<Isbn> {
        crate::parser::parse_isbn(isbn, &self.read())
    }

    /// Parse many ISBNs in parallel, one result per input in input order.
    ///
    /// All workers share a single read lock, so a concurrent load waits for the
    /// whole batch and every result comes from the same table.
    pub fn parse_batch<S>(&self, inputs: &[S]) -> Vec<Result<Isbn>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let table = self.read();
        let table: &RangeTable = &table;
        inputs
            .par_iter()
            .map(|input| crate::parser::parse_isbn(input.as_ref(), table))
            .collect()
    }
}
