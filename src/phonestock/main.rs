//! Phonestock binary entry point.
//!
//! All the work happens in the [`cli`] module; this file only maps a failed run
//! to a message on stderr and a non-zero exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
