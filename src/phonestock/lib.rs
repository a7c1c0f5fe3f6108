//! # Phonestock Architecture
//!
//! Phonestock keeps the stock of a small mobile phone shop in a single
//! `;`-delimited text file. The library does the record keeping; the `phonestock`
//! binary is one client of it, driving the library from an interactive menu or
//! one-shot subcommands.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts, argument parsing, terminal output    │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the inventory loaded for the session  │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Locate, validate, mutate, rewrite                        │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records and Keys
//!
//! A [`model::Record`] is one line of the data file: brand, model, quantity,
//! price, storage and release year. Records are addressed by the
//! [`model::StockKey`] triple (brand, model, storage). The file does not enforce
//! uniqueness of that triple; lookups always act on the first match.
//!
//! ## Writes
//!
//! Stock, price and purchase changes rewrite the whole file through a temporary
//! file and a rename. New records are appended. Either way the in-memory
//! inventory is only changed once the write has succeeded.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction, line codec and implementations
//! - [`model`]: Core data types (`Record`, `StockKey`, `Field`, `Direction`)
//! - [`index`]: Numbered selection menus over distinct field values
//! - [`validation`]: Input rules for new records
//! - [`payment`]: Cash and card payment simulation, invoices
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod payment;
pub mod store;
pub mod validation;
