//! Serenity event handler routing gateway events to commands and collectors.

use crate::app::Kurator;
use crate::commands::{self, definitions};
use crate::conversions::message_id;
use crate::views::BotIdentity;
use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use kurator_error::KuratorResult;
use serenity::all::{
    ChannelId, Command, Context, EventHandler, GatewayIntents, GuildId, Interaction, MessageId,
    Ready,
};
use serenity::async_trait;
use tracing::{debug, error, info, trace, warn};

/// Event handler of the Kurator bot.
pub struct KuratorHandler {
    app: Kurator,
    dev_guild: Option<GuildId>,
}

impl KuratorHandler {
    /// Handler over the shared services.
    ///
    /// With a development guild, commands are registered there only, which
    /// takes effect immediately instead of after global propagation.
    pub fn new(app: Kurator, dev_guild: Option<u64>) -> Self {
        Self {
            app,
            dev_guild: dev_guild.map(GuildId::new),
        }
    }

    /// Gateway intents the bot needs.
    ///
    /// Interactions arrive without intents; message deletions need `GUILD_MESSAGES`.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES
    }

    async fn register_commands(&self, ctx: &Context) -> DiscordResult<usize> {
        let registered = match self.dev_guild {
            Some(guild) => guild.set_commands(&ctx.http, definitions()).await,
            None => Command::set_global_commands(&ctx.http, definitions()).await,
        }
        .map_err(|e| DiscordError::new(DiscordErrorKind::RegistrationFailed(e.to_string())))?;
        Ok(registered.len())
    }
}

fn log_failure(result: KuratorResult<()>, what: &str) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_recoverable() => warn!(error = %e, "{what} rejected"),
        Err(e) => error!(error = %e, "{what} failed"),
    }
}

#[async_trait]
impl EventHandler for KuratorHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "Kurator connected"
        );
        self.app.gateway.set_identity(BotIdentity {
            name: ready.user.name.clone(),
            avatar: ready.user.avatar_url(),
        });

        match self.register_commands(&ctx).await {
            Ok(count) => info!(count, dev_guild = ?self.dev_guild, "Registered commands"),
            Err(e) => error!(error = %e, "Failed to register commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => log_failure(
                commands::handle_command(&ctx, &self.app, &command).await,
                "Command",
            ),
            Interaction::Autocomplete(command) => log_failure(
                commands::handle_autocomplete(&ctx, &self.app, &command).await,
                "Autocomplete",
            ),
            Interaction::Modal(modal) => log_failure(
                commands::handle_modal(&ctx, &self.app, &modal).await,
                "Modal",
            ),
            // Panel collectors consume component interactions.
            Interaction::Component(component) => {
                trace!(custom_id = %component.data.custom_id, "Component interaction")
            }
            other => debug!(kind = ?other.kind(), "Ignoring interaction"),
        }
    }

    async fn message_delete(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        _guild_id: Option<GuildId>,
    ) {
        let message = message_id(deleted_message_id);
        match self.app.projects.unlink_message(message).await {
            Ok(0) => trace!(%channel_id, %message, "Deleted message was not a summary"),
            Ok(unlinked) => {
                info!(%channel_id, %message, unlinked, "Summary deleted, projects unlinked")
            }
            Err(e) => error!(error = %e, %message, "Failed to unlink deleted summary"),
        }
    }
}
