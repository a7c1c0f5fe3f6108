use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phonestock", bin_name = "phonestock", version)]
#[command(about = "Stock manager for a small mobile phone shop", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Stock data file (defaults to the configured data-file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (the default)
    #[command(alias = "m")]
    Menu,

    /// List every phone in stock
    #[command(alias = "ls")]
    List,

    /// Show the models of a brand with a given storage size
    Show {
        /// Brand, e.g. samsung
        brand: String,

        /// Storage in GB, e.g. 128
        storage: String,
    },

    /// Add a new phone to the stock file
    Add {
        brand: String,
        model: String,
        /// Units in stock (1-50)
        quantity: String,
        /// Price, a whole number greater than 0
        price: String,
        /// Storage in GB: 64, 128, 256, 512 or 1024
        storage: String,
        /// Release year (1983-2024)
        year: String,
    },

    /// Add (+) or remove (-) units of a phone
    Stock {
        brand: String,
        model: String,
        storage: String,

        /// '+' to add, '-' to remove
        #[arg(allow_hyphen_values = true)]
        direction: String,

        amount: u32,
    },

    /// Set the price of a phone
    Price {
        brand: String,
        model: String,
        storage: String,

        /// New price (0-10000)
        #[arg(allow_hyphen_values = true)]
        price: i64,
    },

    /// Phones of a brand within a budget, most expensive first
    #[command(alias = "b")]
    Budget {
        /// Highest price to show
        ceiling: u32,

        brand: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, currency)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
