//! hostprep - scraper host provisioner and launcher
//!
//! Gets a clean host into a runnable state for the GeoCentralis scraper
//! (OS packages, headless browser, isolated Python environment), then
//! launches the scraper by process replacement so an external service
//! supervisor observes the real application lifecycle.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod launch;
mod manifest;
mod pipeline;
mod progress;
mod runner;
mod steps;
mod systemd;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(cli.app_dir, args),
        Commands::Launch(args) => commands::launch::run(cli.app_dir, args),
        Commands::ServiceUnit => commands::service_unit::run(cli.app_dir),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
