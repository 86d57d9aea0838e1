//! gigbook CLI - venue, artist and show booking directory
//!
//! Subcommands:
//! - `serve`: run the HTTP server (Postgres or in-memory)
//! - `migrate`: create the schema
//! - `seed`: load the demo directory
//! - `config`: show the config file path or effective settings

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gigbook_core::GigbookConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gigbook",
    author,
    version,
    about = "Booking directory for venues, artists and the shows between them"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.gigbook/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create any missing tables and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Load the demo venues, artists and shows
    Seed(commands::seed::SeedArgs),
    /// Inspect configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let settings = GigbookConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, settings).await?,
        Commands::Migrate(args) => commands::run_migrate(args, settings).await?,
        Commands::Seed(args) => commands::run_seed(args, settings).await?,
        Commands::Config(args) => config::run_config(args, cli.config.as_deref(), &settings)?,
    }
    Ok(())
}
