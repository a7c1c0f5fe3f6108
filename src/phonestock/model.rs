use crate::error::{Result, StockError};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ceiling for the quantity of any single record.
pub const MAX_QUANTITY: i32 = 50;
/// Ceiling for a price set through a price adjustment.
pub const MAX_PRICE: u32 = 10_000;
pub const MIN_RELEASE_YEAR: u16 = 1983;
pub const MAX_RELEASE_YEAR: u16 = 2024;
/// Accepted storage sizes, in GB, as they appear in the data file.
pub const STORAGE_OPTIONS: [&str; 5] = ["64", "128", "256", "512", "1024"];

pub const FIELD_COUNT: usize = 6;

/// Characters no field may hold: the delimiter and line terminators.
pub const RESERVED_CHARS: [char; 3] = [';', '\r', '\n'];
/// Header written when a data file is created from scratch.
pub const DEFAULT_HEADER: [&str; FIELD_COUNT] = [
    "brand",
    "model",
    "quantity",
    "price",
    "storage_gb",
    "release_year",
];

/// The (brand, model, storage) triple that identifies a stock record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub brand: String,
    pub model: String,
    pub storage: String,
}

impl StockKey {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        storage: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            storage: storage.into(),
        }
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}GB)", self.brand, self.model, self.storage)
    }
}

/// One phone-stock entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub brand: String,
    pub model: String,
    // Signed so that files written by older tools with negative stock still load.
    pub quantity: i32,
    pub price: u32,
    pub storage: String,
    pub release_year: u16,
}

impl Record {
    pub fn key(&self) -> StockKey {
        StockKey::new(&self.brand, &self.model, &self.storage)
    }

    pub fn matches(&self, key: &StockKey) -> bool {
        self.brand == key.brand && self.model == key.model && self.storage == key.storage
    }

    /// Builds a record from the raw fields of one data line.
    ///
    /// `line` is the 1-based line number, used only for error reporting.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<Self> {
        if fields.len() != FIELD_COUNT {
            return Err(StockError::MalformedRow {
                line,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }
        let raw = |i: usize| fields[i].as_ref();

        Ok(Self {
            brand: raw(0).to_string(),
            model: raw(1).to_string(),
            quantity: parse_number(raw(2), "quantity", line)?,
            price: parse_number(raw(3), "price", line)?,
            storage: raw(4).to_string(),
            release_year: parse_number(raw(5), "release_year", line)?,
        })
    }

    /// The six fields in file order.
    pub fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.brand.clone(),
            self.model.clone(),
            self.quantity.to_string(),
            self.price.to_string(),
            self.storage.clone(),
            self.release_year.to_string(),
        ]
    }
}

fn parse_number<T: FromStr>(raw: &str, field: &str, line: usize) -> Result<T> {
    raw.trim().parse().map_err(|_| StockError::MalformedRow {
        line,
        reason: format!("{} is not a number: {:?}", field, raw),
    })
}

/// Fields that can be indexed into a selection menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Brand,
    Model,
    Storage,
}

impl Field {
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Field::Brand => &record.brand,
            Field::Model => &record.model,
            Field::Storage => &record.storage,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Brand => write!(f, "brand"),
            Field::Model => write!(f, "model"),
            Field::Storage => write!(f, "storage"),
        }
    }
}

/// Which way a stock adjustment moves the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Direction::Increase),
            "-" => Ok(Direction::Decrease),
            other => Err(ValidationError::Direction(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increase => write!(f, "+"),
            Direction::Decrease => write!(f, "-"),
        }
    }
}
