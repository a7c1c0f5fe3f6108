use crate::model::StockKey;
use crate::payment::PaymentError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("No phone found for {0}")]
    NotFound(StockKey),

    #[error("{0} is out of stock")]
    OutOfStock(StockKey),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Invalid selection {choice}: pick a number between 1 and {max}")]
    InvalidSelection { choice: usize, max: usize },

    #[error("Invalid value: {0}")]
    Validation(#[from] ValidationError),

    #[error("Payment declined: {0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    OutOfBounds(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stock from {0} is not loaded; changes are disabled until it loads")]
    NotLoaded(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StockError>;
