//! Main entry point for recondiff CLI

use clap::Parser;
use recondiff::cli::Cli;
use recondiff::commands::execute_command;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; the filter must be chosen before init
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    // Execute the command
    if let Err(e) = execute_command(cli.command, cli.store.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
