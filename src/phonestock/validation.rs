//! Field validation for new stock records.
//!
//! Rules applied to operator input before a record is appended:
//! - Brand: alphabetic only, normalized to initial-capital form (`sAMSUNG` -> `Samsung`)
//! - Model: any non-empty text
//! - Quantity: whole number between 1 and 50
//! - Price: whole number greater than 0
//! - Storage: one of 64, 128, 256, 512, 1024
//! - Release year: between 1983 and 2024

use crate::model::{
    Record, MAX_QUANTITY, MAX_RELEASE_YEAR, MIN_RELEASE_YEAR, RESERVED_CHARS, STORAGE_OPTIONS,
};
use std::str::FromStr;
use thiserror::Error;

/// Error type for field validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("brand cannot be empty")]
    EmptyBrand,

    #[error("brand must contain only letters, found {0:?}")]
    NonAlphabeticBrand(String),

    #[error("model cannot be empty")]
    EmptyModel,

    #[error("model cannot contain ';' or line breaks, found {0:?}")]
    ReservedCharacter(String),

    #[error("quantity must be a whole number between 1 and {max}, found {found:?}", max = MAX_QUANTITY)]
    Quantity { found: String },

    #[error("price must be a whole number greater than 0, found {0:?}")]
    Price(String),

    #[error("storage must be one of 64, 128, 256, 512, 1024, found {0:?}")]
    Storage(String),

    #[error("release year must be between {min} and {max}, found {found:?}", min = MIN_RELEASE_YEAR, max = MAX_RELEASE_YEAR)]
    ReleaseYear { found: String },

    #[error("use '+' to add stock or '-' to remove it, found {0:?}")]
    Direction(String),

    #[error("expected a number, found {0:?}")]
    NotANumber(String),
}

/// Normalizes a brand to initial-capital form: first character upper case,
/// the rest lower case.
///
/// ```
/// use phonestock::validation::normalize_brand;
///
/// assert_eq!(normalize_brand("sAMSUNG"), "Samsung");
/// assert_eq!(normalize_brand("  apple "), "Apple");
/// assert_eq!(normalize_brand(""), "");
/// ```
pub fn normalize_brand(input: &str) -> String {
    let mut chars = input.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn validate_brand(input: &str) -> Result<String, ValidationError> {
    let brand = normalize_brand(input);
    if brand.is_empty() {
        return Err(ValidationError::EmptyBrand);
    }
    if !brand.chars().all(char::is_alphabetic) {
        return Err(ValidationError::NonAlphabeticBrand(brand));
    }
    Ok(brand)
}

pub fn validate_model(input: &str) -> Result<String, ValidationError> {
    let model = input.trim();
    if model.is_empty() {
        return Err(ValidationError::EmptyModel);
    }
    if model.contains(RESERVED_CHARS) {
        return Err(ValidationError::ReservedCharacter(model.to_string()));
    }
    Ok(model.to_string())
}

pub fn validate_quantity(input: &str) -> Result<i32, ValidationError> {
    parse_digits(input)
        .filter(|q| (1..=MAX_QUANTITY).contains(q))
        .ok_or_else(|| ValidationError::Quantity {
            found: input.trim().to_string(),
        })
}

pub fn validate_price(input: &str) -> Result<u32, ValidationError> {
    parse_digits(input)
        .filter(|p| *p > 0)
        .ok_or_else(|| ValidationError::Price(input.trim().to_string()))
}

pub fn validate_storage(input: &str) -> Result<String, ValidationError> {
    let storage = input.trim();
    if STORAGE_OPTIONS.contains(&storage) {
        Ok(storage.to_string())
    } else {
        Err(ValidationError::Storage(storage.to_string()))
    }
}

pub fn validate_release_year(input: &str) -> Result<u16, ValidationError> {
    parse_digits(input)
        .filter(|y| (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(y))
        .ok_or_else(|| ValidationError::ReleaseYear {
            found: input.trim().to_string(),
        })
}

/// Parses input made only of ASCII digits. Signs and blanks are refused.
fn parse_digits<T: FromStr>(input: &str) -> Option<T> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// A record whose every field passed validation, ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord(Record);

impl NewRecord {
    pub fn parse(
        brand: &str,
        model: &str,
        quantity: &str,
        price: &str,
        storage: &str,
        release_year: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self(Record {
            brand: validate_brand(brand)?,
            model: validate_model(model)?,
            quantity: validate_quantity(quantity)?,
            price: validate_price(price)?,
            storage: validate_storage(storage)?,
            release_year: validate_release_year(release_year)?,
        }))
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }
}
