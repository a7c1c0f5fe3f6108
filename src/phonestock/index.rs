//! # Selection Menus
//!
//! Operators pick brands and storage sizes from numbered lists rather than
//! typing them. A [`SelectionMenu`] maps the numbers `1..=len` onto the sorted
//! distinct values of one field.
//!
//! Values sort as plain text. Storage sizes are text too, so they come out as
//! `1024, 128, 256, 512, 64` rather than in numeric order.

use crate::error::{Result, StockError};
use crate::model::{Field, Record};
use std::collections::BTreeSet;
use std::fmt;

/// A dense, 1-based numbered list of distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMenu {
    values: Vec<String>,
}

impl SelectionMenu {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Numbered entries, as displayed.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i + 1, v.as_str()))
    }

    /// Resolves a menu number. Numbers outside `1..=len` are rejected.
    pub fn select(&self, choice: usize) -> Result<&str> {
        choice
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .ok_or(StockError::InvalidSelection {
                choice,
                max: self.values.len(),
            })
    }
}

impl fmt::Display for SelectionMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .entries()
            .map(|(n, v)| format!("{} - {}", n, v))
            .collect::<Vec<_>>()
            .join(" | ");
        write!(f, "{}", line)
    }
}

/// Sorted distinct values of `field` across `records`.
pub fn distinct_values(records: &[Record], field: Field) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| field.value(r).to_string())
        .collect()
}

/// Builds the numbered menu for `field`.
pub fn index_by(records: &[Record], field: Field) -> SelectionMenu {
    SelectionMenu::new(distinct_values(records, field).into_iter().collect())
}
