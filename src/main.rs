//! deprecheck CLI entry point.

use clap::Parser;
use colored::*;
use deprecheck::cli::{self, Cli, EXIT_ERROR};
use std::io::IsTerminal;

fn main() {
    deprecheck::logging::init();
    // Notices share stdout with the warnings
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    let cli = Cli::parse();

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
