//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use gigbook_core::GigbookConfig;
use gigbook_server::http::{run_server, AppState, ServerConfig};
use gigbook_server::{seed, MemoryStore, PgStore, Store};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep everything in memory instead of Postgres
    #[arg(long)]
    pub in_memory: bool,

    /// Load the demo directory before serving
    #[arg(long)]
    pub seed: bool,
}

impl ServeArgs {
    fn server_config(&self, settings: &GigbookConfig) -> ServerConfig {
        let mut config = ServerConfig::from(settings);
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = std::time::Duration::from_secs(secs);
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, settings: GigbookConfig) -> Result<()> {
    let config = args.server_config(&settings);

    let store: Arc<dyn Store> = if args.in_memory {
        tracing::info!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let pool = super::connect(&settings, args.database_url.as_deref()).await?;
        Arc::new(PgStore::new(pool))
    };

    if args.seed {
        seed::load(store.as_ref())
            .await
            .context("Failed to load demo data")?;
    }

    tracing::info!("Starting gigbook server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(AppState::new(store), config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_settings() {
        let args = ServeArgs::parse_from([
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--timeout",
            "3",
            "--in-memory",
        ]);
        let config = args.server_config(&GigbookConfig::default());
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.request_timeout.as_secs(), 3);
        assert!(!config.cors_permissive);
        assert!(args.in_memory);
    }

    #[test]
    fn file_settings_apply_without_flags() {
        let args = ServeArgs::parse_from(["serve"]);
        let config = args.server_config(&GigbookConfig::default());
        assert_eq!(config.bind_addr.port(), 5000);
    }
}
