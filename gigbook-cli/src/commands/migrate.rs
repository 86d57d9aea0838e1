//! Schema bootstrap command

use anyhow::Result;
use clap::Parser;

use gigbook_core::GigbookConfig;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, settings: GigbookConfig) -> Result<()> {
    let pool = super::connect(&settings, args.database_url.as_deref()).await?;
    pool.close().await;
    println!("Schema is up to date");
    Ok(())
}
