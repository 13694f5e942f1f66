mod cli;
mod config;
mod location;
mod models;
mod prayer_times;
mod state;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Declining to locate behaves exactly like a denied permission prompt
    if cli.no_locate {
        config.geolocation.allow = false;
    }

    match cli.command {
        Some(Commands::Times) => handlers::handle_times(&config)?,
        Some(Commands::Next { at }) => handlers::handle_next(&config, at.as_deref())?,
        Some(Commands::Locate) => handlers::handle_locate(&config)?,
        Some(Commands::Config { init }) => handlers::handle_config(&config, init)?,

        // No subcommand → launch TUI
        None => tui::app::run(config)?,
    }

    Ok(())
}
