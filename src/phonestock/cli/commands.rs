//! # CLI Layer
//!
//! This module is **one possible UI client** for phonestock; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Uses `std::process::exit` (through `main.rs`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data file, load it into a `StockApi`
//! 3. **API Dispatch**: Call the appropriate `StockApi` method, or hand over to the menu
//! 4. **Output Formatting**: Convert `CmdResult` into terminal output
//! 5. **Error Handling**: Convert errors to user-friendly messages and exit codes
//!
//! ## Data File Resolution
//!
//! The first of these wins: `--file`, `$PHONESTOCK_FILE`, the `data-file` config
//! key, and finally `stock_celulares.csv` in the working directory.

use super::menu;
use super::print::{print_messages, render_config, render_result, style_message};
use super::prompt::Prompter;
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use phonestock::api::{CmdMessage, CmdResult, ConfigAction, StockApi};
use phonestock::commands;
use phonestock::config::StockConfig;
use phonestock::error::{Result, StockError};
use phonestock::model::{Direction, StockKey};
use phonestock::store::fs::FileStore;
use phonestock::validation::{normalize_brand, NewRecord};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DATA_FILE_ENV: &str = "PHONESTOCK_FILE";
const CONFIG_DIR_ENV: &str = "PHONESTOCK_CONFIG_DIR";

struct AppContext {
    api: StockApi<FileStore>,
    config: StockConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config_dir = config_dir()?;

    // Config does not touch the data file
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&config_dir, key.clone(), value.clone());
    }

    let config = StockConfig::load(&config_dir)?;
    let interactive = matches!(cli.command, None | Some(Commands::Menu));
    let data_file = resolve_data_file(cli.file, std::env::var_os(DATA_FILE_ENV), &config);
    let mut ctx = init_context(config, data_file, interactive)?;

    match cli.command {
        None | Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::List) => {
            let result = ctx.api.list();
            print_result(&ctx, &result);
            Ok(())
        }
        Some(Commands::Show { brand, storage }) => {
            let result = ctx.api.browse(&normalize_brand(&brand), storage.trim());
            print_result(&ctx, &result);
            Ok(())
        }
        Some(Commands::Add {
            brand,
            model,
            quantity,
            price,
            storage,
            year,
        }) => {
            let record = NewRecord::parse(&brand, &model, &quantity, &price, &storage, &year)?;
            let result = ctx.api.append_record(record)?;
            print_result(&ctx, &result);
            Ok(())
        }
        Some(Commands::Stock {
            brand,
            model,
            storage,
            direction,
            amount,
        }) => {
            let key = stock_key(&brand, &model, &storage);
            let direction: Direction = direction.parse()?;
            let result = ctx.api.adjust_stock(&key, direction, amount)?;
            print_result(&ctx, &result);
            Ok(())
        }
        Some(Commands::Price {
            brand,
            model,
            storage,
            price,
        }) => {
            let key = stock_key(&brand, &model, &storage);
            let result = ctx.api.adjust_price(&key, price)?;
            print_result(&ctx, &result);
            Ok(())
        }
        Some(Commands::Budget { ceiling, brand }) => handle_budget(&ctx, ceiling, &brand),
        Some(Commands::Config { .. }) => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "error" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "phonestock", "phonestock")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| StockError::Store("Could not determine config dir".to_string()))
}

fn resolve_data_file(
    flag: Option<PathBuf>,
    env: Option<OsString>,
    config: &StockConfig,
) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config.data_file.clone())
}

/// Loads the data file. In the menu a broken file is reported and the session
/// continues with empty stock; one-shot commands fail instead.
fn init_context(config: StockConfig, data_file: PathBuf, interactive: bool) -> Result<AppContext> {
    debug!(path = %data_file.display(), "using data file");

    let mut api = StockApi::new(FileStore::new(data_file));
    match api.load() {
        Ok(result) => print_messages(&result.messages),
        Err(e) if interactive => {
            let message = CmdMessage::error(format!("Could not load stock: {}", e));
            eprintln!("{}", style_message(&message));
        }
        Err(e) => return Err(e),
    }

    Ok(AppContext { api, config })
}

fn stock_key(brand: &str, model: &str, storage: &str) -> StockKey {
    StockKey::new(normalize_brand(brand), model.trim(), storage.trim())
}

fn print_result(ctx: &AppContext, result: &CmdResult) {
    print!("{}", render_result(result, &ctx.config));
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout());
    menu::run(&mut ctx.api, &ctx.config, prompter)
}

fn handle_budget(ctx: &AppContext, ceiling: u32, brand: &str) -> Result<()> {
    if ceiling == 0 {
        return Err(StockError::OutOfBounds(
            "The budget must be greater than 0".to_string(),
        ));
    }
    let result = ctx.api.filter_by_budget(ceiling, brand);
    print_result(ctx, &result);
    Ok(())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = commands::config::run(config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
