//! Kurator CLI binary.
//!
//! - `run`: connect to Discord and serve the bot
//! - `migrate`: apply database migrations
//! - `check-config`: print the effective configuration

use clap::Parser;
use kurator::KuratorConfig;
use kurator::cli::{Cli, Commands, migrate, run_bot};
use kurator::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = KuratorConfig::load(cli.config.as_deref())?;
    init_tracing(config.logging(), cli.verbose)?;

    match cli.command {
        Commands::Run { skip_migrations } => run_bot(&config, skip_migrations).await?,
        Commands::Migrate => migrate(&config).await?,
        Commands::CheckConfig => print!("{}", config.redacted().to_toml()?),
    }

    Ok(())
}
