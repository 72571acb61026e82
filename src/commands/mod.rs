//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use certitrack_core::config::AppConfig;

/// CertiTrack authentication server
#[derive(Debug, Parser)]
#[command(name = "certitrack-server", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(short, long, env = "CERTITRACK_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    /// Execute the selected command with the loaded configuration.
    pub async fn execute(&self, config: AppConfig) -> anyhow::Result<()> {
        match &self.command {
            Some(Commands::Serve(args)) => serve::execute(args, config).await,
            Some(Commands::Migrate) => migrate::execute(config).await,
            None => serve::execute(&serve::ServeArgs::default(), config).await,
        }
    }
}
