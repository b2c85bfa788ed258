//! Bot startup and migrations.

use crate::config::KuratorConfig;
use kurator_database::{PgPool, PostgresProjectStore, create_pool};
use kurator_discord::{BotOptions, KuratorBot};
use kurator_error::{GatewayError, KuratorResult};
use std::sync::Arc;
use tracing::{info, instrument, warn};

fn pool(config: &KuratorConfig) -> KuratorResult<PgPool> {
    Ok(create_pool(
        config.database_url()?,
        *config.database().pool_size(),
    )?)
}

async fn apply_migrations(pool: PgPool) -> KuratorResult<Vec<String>> {
    Ok(kurator_database::migrate(pool).await?)
}

/// Apply pending migrations and report them.
#[instrument(skip_all)]
pub async fn migrate(config: &KuratorConfig) -> KuratorResult<()> {
    let applied = apply_migrations(pool(config)?).await?;
    if applied.is_empty() {
        info!("Database is up to date");
    }
    for version in &applied {
        info!(%version, "Applied migration");
    }
    Ok(())
}

/// Run the bot until the connection closes or Ctrl+C is pressed.
#[instrument(skip_all)]
pub async fn run_bot(config: &KuratorConfig, skip_migrations: bool) -> KuratorResult<()> {
    let token = config.token()?;
    let pool = pool(config)?;

    if *config.database().run_migrations() && !skip_migrations {
        let applied = apply_migrations(pool.clone()).await?;
        info!(count = applied.len(), "Migrations checked");
    }

    let store = Arc::new(PostgresProjectStore::new(pool));
    let options = BotOptions {
        collector_ttl: config.collector_ttl(),
        dev_guild: *config.discord().dev_guild(),
    };
    let mut bot = KuratorBot::new(token, store, None, options)
        .await
        .map_err(GatewayError::from)?;

    let shards = bot.shard_manager();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutting down");
                shards.shutdown_all().await;
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    bot.start().await.map_err(GatewayError::from)?;
    info!("Bot stopped");
    Ok(())
}
