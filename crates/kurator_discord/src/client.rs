//! Discord bot client setup and lifecycle management.

use crate::app::Kurator;
use crate::handler::KuratorHandler;
use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use kurator_core::{DEFAULT_COLLECTOR_TTL, ImageProbe, ProjectStore};
use serenity::Client;
use serenity::all::{Http, ShardManager};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Runtime options of the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotOptions {
    /// Lifetime of every panel and wizard collector
    pub collector_ttl: Duration,
    /// Guild to register commands in instead of globally
    pub dev_guild: Option<u64>,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            collector_ttl: DEFAULT_COLLECTOR_TTL,
            dev_guild: None,
        }
    }
}

/// Main Discord bot client for Kurator.
///
/// # Example
/// ```no_run
/// use kurator_core::InMemoryProjectStore;
/// use kurator_discord::{BotOptions, KuratorBot};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let store = Arc::new(InMemoryProjectStore::new());
///
///     let mut bot = KuratorBot::new(&token, store, None, BotOptions::default()).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct KuratorBot {
    client: Client,
    app: Kurator,
}

impl KuratorBot {
    /// Build the serenity client.
    ///
    /// Without a `probe`, poster URLs are checked over HTTP.
    ///
    /// # Errors
    /// Returns an error if the HTTP client for poster probing or the serenity
    /// client cannot be built.
    #[instrument(skip(token, store, probe), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        store: Arc<dyn ProjectStore>,
        probe: Option<Arc<dyn ImageProbe>>,
        options: BotOptions,
    ) -> DiscordResult<Self> {
        info!("Initializing Kurator Discord bot");

        let http = Arc::new(Http::new(token));
        let app = match probe {
            Some(probe) => Kurator::with_probe(store, http, probe, options.collector_ttl),
            None => Kurator::new(store, http, options.collector_ttl).map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build poster probe: {e}"
                )))
            })?,
        };

        let handler = KuratorHandler::new(app.clone(), options.dev_guild);
        let intents = KuratorHandler::intents();
        info!(?intents, "Building Serenity client");

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {e}"
                )))
            })?;

        Ok(Self { client, app })
    }

    /// Run until the connection closes or the shards are shut down.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {e}"
            )))
        })
    }

    /// Handle for shutting the shards down from another task.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        self.client.shard_manager.clone()
    }

    /// Shared services.
    pub fn app(&self) -> &Kurator {
        &self.app
    }
}
