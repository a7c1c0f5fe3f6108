//! # Storage Layer
//!
//! The [`DataStore`] trait abstracts the flat file that holds the stock, so the
//! command layer never touches a path directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one `;`-delimited text file
//! - [`memory::InMemoryStore`]: keeps the file text in memory, for tests
//!
//! Both go through [`codec`] so that what the tests read back is exactly what
//! would land on disk.
//!
//! ## Storage Format
//!
//! ```text
//! brand;model;quantity;price;storage_gb;release_year
//! Samsung;Galaxy S23;10;900;256;2023
//! Apple;iPhone 13;4;750;128;2021
//! ```
//!
//! The first line is a header and is carried through rewrites untouched.
//! Every mutation rewrites the whole file; new records are appended instead.

use crate::error::Result;
use crate::model::{Record, StockKey, DEFAULT_HEADER};
use std::collections::HashSet;

pub mod codec;
pub mod fs;
pub mod memory;

/// The in-memory mirror of the data file: header row plus records in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub header: Vec<String>,
    pub records: Vec<Record>,
    /// Set when the backing file did not exist at load time.
    pub missing: bool,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            header: default_header(),
            records: Vec::new(),
            missing: false,
        }
    }
}

impl Inventory {
    pub fn new(header: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            header,
            records,
            missing: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keys that appear more than once, in order of their second appearance.
    pub fn duplicate_keys(&self) -> Vec<StockKey> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for record in &self.records {
            let key = record.key();
            if !seen.insert(key.clone()) && !dupes.contains(&key) {
                dupes.push(key);
            }
        }
        dupes
    }
}

pub fn default_header() -> Vec<String> {
    DEFAULT_HEADER.iter().map(|s| s.to_string()).collect()
}

/// Abstract interface for the stock datastore.
pub trait DataStore {
    /// Read the whole datastore. A missing file is not an error: it yields an
    /// empty inventory with `missing` set.
    fn load(&self) -> Result<Inventory>;

    /// Replace the whole datastore with `inventory`, header included.
    fn rewrite(&mut self, inventory: &Inventory) -> Result<()>;

    /// Add one record at the end without touching existing content.
    fn append(&mut self, record: &Record) -> Result<()>;

    /// Human-readable location, used in messages.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, model: &str, storage: &str) -> Record {
        Record {
            brand: brand.into(),
            model: model.into(),
            quantity: 1,
            price: 100,
            storage: storage.into(),
            release_year: 2020,
        }
    }

    #[test]
    fn reports_each_duplicate_key_once() {
        let inventory = Inventory::new(
            default_header(),
            vec![
                record("Apple", "iPhone 12", "64"),
                record("Apple", "iPhone 12", "64"),
                record("Apple", "iPhone 12", "128"),
                record("Apple", "iPhone 12", "64"),
            ],
        );
        assert_eq!(
            inventory.duplicate_keys(),
            vec![StockKey::new("Apple", "iPhone 12", "64")]
        );
    }

    #[test]
    fn missing_inventory_keeps_default_header() {
        let inventory = Inventory::missing();
        assert!(inventory.missing);
        assert!(inventory.is_empty());
        assert_eq!(inventory.header.len(), DEFAULT_HEADER.len());
    }
}
