//! # Payment Simulation
//!
//! A sale goes through three steps:
//!
//! 1. [`crate::commands::purchase::quote`] resolves the phone and its price into a [`Quote`]
//! 2. The quote is settled in cash or by card, producing an [`Approval`]
//! 3. [`crate::commands::purchase::run`] consumes the approval, takes one unit
//!    out of stock and returns the [`Invoice`]
//!
//! Stock can only be decremented with an `Approval` in hand, and approvals
//! can only be built here.
//!
//! No money moves: cash checks that the tendered amount covers the price, card
//! checks the shape of the card data.

use crate::model::StockKey;
use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

pub const CARD_NUMBER_LEN: usize = 16;
pub const SECURITY_CODE_LEN: usize = 3;
pub const MIN_NATIONAL_ID: u64 = 10_000_000;
pub const MAX_NATIONAL_ID: u64 = 47_000_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("{tendered:.2} does not cover the price of {price}")]
    InsufficientCash { tendered: f64, price: u32 },

    #[error("not a valid amount: {0:?}")]
    InvalidAmount(String),

    #[error("card number must be exactly {} characters", CARD_NUMBER_LEN)]
    CardNumber,

    #[error("security code must be exactly {} digits", SECURITY_CODE_LEN)]
    SecurityCode,

    #[error("national ID must be a number between {min} and {max}, found {0:?}", min = MIN_NATIONAL_ID, max = MAX_NATIONAL_ID)]
    NationalId(String),
}

/// Parses a cash amount. Decimals are allowed; negatives and non-numbers are not.
pub fn parse_amount(input: &str) -> Result<f64, PaymentError> {
    let trimmed = input.trim().trim_start_matches('$');
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a >= 0.0)
        .ok_or_else(|| PaymentError::InvalidAmount(input.trim().to_string()))
}

/// A phone and the price it sells for, waiting to be paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    key: StockKey,
    price: u32,
}

impl Quote {
    pub(crate) fn new(key: StockKey, price: u32) -> Self {
        Self { key, price }
    }

    pub fn key(&self) -> &StockKey {
        &self.key
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn pay_cash(&self, tendered: f64) -> Result<Approval, PaymentError> {
        let price = f64::from(self.price);
        if !tendered.is_finite() || tendered < price {
            return Err(PaymentError::InsufficientCash {
                tendered,
                price: self.price,
            });
        }
        Ok(Approval::new(
            self.clone(),
            PaymentMethod::Cash {
                tendered,
                change: tendered - price,
            },
        ))
    }

    pub fn pay_card(&self, card: &CardDetails) -> Result<Approval, PaymentError> {
        card.validate()?;
        Ok(Approval::new(
            self.clone(),
            PaymentMethod::Card {
                last_digits: card.last_digits(),
            },
        ))
    }
}

/// Card data as typed by the customer.
#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub number: String,
    pub security_code: String,
    pub national_id: String,
}

impl CardDetails {
    /// Number and security code are checked as typed. Only the national id,
    /// being a number, may carry surrounding spaces.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.number.chars().count() != CARD_NUMBER_LEN {
            return Err(PaymentError::CardNumber);
        }

        let code = self.security_code.as_str();
        if code.len() != SECURITY_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::SecurityCode);
        }

        let id = self.national_id.trim();
        match id.parse::<u64>() {
            Ok(n) if (MIN_NATIONAL_ID..=MAX_NATIONAL_ID).contains(&n) => Ok(()),
            _ => Err(PaymentError::NationalId(id.to_string())),
        }
    }

    fn last_digits(&self) -> String {
        let chars: Vec<char> = self.number.chars().collect();
        chars[chars.len().saturating_sub(4)..].iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PaymentMethod {
    Cash { tendered: f64, change: f64 },
    Card { last_digits: String },
}

/// Proof that a quote was paid.
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    quote: Quote,
    method: PaymentMethod,
    approved_at: DateTime<Local>,
}

impl Approval {
    fn new(quote: Quote, method: PaymentMethod) -> Self {
        Self {
            quote,
            method,
            approved_at: Local::now(),
        }
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }

    pub fn into_invoice(self) -> Invoice {
        Invoice {
            brand: self.quote.key.brand,
            model: self.quote.key.model,
            storage: self.quote.key.storage,
            price: self.quote.price,
            method: self.method,
            issued_at: self.approved_at,
        }
    }
}

/// What the customer takes home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub brand: String,
    pub model: String,
    pub storage: String,
    pub price: u32,
    pub method: PaymentMethod,
    pub issued_at: DateTime<Local>,
}
