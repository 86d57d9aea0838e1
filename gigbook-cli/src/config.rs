use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gigbook_core::GigbookConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>, settings: &GigbookConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(GigbookConfig::config_path);
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            // DATABASE_URL overrides the file, so show what would actually be used
            let mut effective = settings.clone();
            effective.database.url = Some(settings.database_url(None));
            print!("{}", effective.to_toml()?);
        }
    }
    Ok(())
}
