//! Start the CertiTrack server.

use anyhow::Context;
use clap::Args;
use tracing::info;

use certitrack_core::config::AppConfig;
use certitrack_database::DatabasePool;
use certitrack_database::migration::run_migrations;

/// Arguments for the serve command
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Skip applying migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting CertiTrack");

    let pool = DatabasePool::connect(&config.database)
        .await
        .context("database connection failed")?;

    if args.no_migrate {
        info!("Skipping database migrations");
    } else {
        run_migrations(pool.pool())
            .await
            .context("migration failed")?;
    }

    certitrack_api::run_server(config, pool)
        .await
        .context("server terminated with an error")
}
