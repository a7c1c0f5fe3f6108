//! # Command Line Interface
//!
//! The `phonestock` binary: an interactive menu for the shop floor plus
//! one-shot subcommands for scripting. See [`commands`] for the dispatch logic.

mod commands;
mod menu;
mod print;
mod prompt;
mod setup;

pub use commands::run;
