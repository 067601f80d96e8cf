//! gomodpin CLI entry point
//!
//! Parses arguments, runs the pinning pipeline and reports failures. Any error
//! is shown with context and suggestions, and the process exits with status 1.

use clap::Parser;
use gomodpin::cli;
use gomodpin::core::error::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
