//! Apply database migrations.

use anyhow::Context;
use tracing::info;

use certitrack_core::config::AppConfig;
use certitrack_database::DatabasePool;
use certitrack_database::migration::run_migrations;

/// Execute the migrate command
pub async fn execute(config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabasePool::connect(&config.database)
        .await
        .context("database connection failed")?;

    run_migrations(pool.pool())
        .await
        .context("migration failed")?;

    info!("Migrations applied");
    Ok(())
}
