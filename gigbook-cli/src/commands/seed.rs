//! Demo data command

use anyhow::{Context, Result};
use clap::Parser;

use gigbook_core::GigbookConfig;
use gigbook_server::{seed, PgStore};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_seed(args: SeedArgs, settings: GigbookConfig) -> Result<()> {
    let pool = super::connect(&settings, args.database_url.as_deref()).await?;
    let store = PgStore::new(pool);

    let summary = seed::load(&store)
        .await
        .context("Failed to load demo data")?;
    store.pool().close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Seeded {} venues, {} artists, {} shows",
            summary.venues, summary.artists, summary.shows
        );
    }
    Ok(())
}
