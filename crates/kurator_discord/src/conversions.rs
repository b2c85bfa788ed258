//! Conversions between serenity models and domain types.

use kurator_core::{
    Actor, ChannelId, CollectedEvent, GuildId, MessageId, RoleId, SelectedUser, Selection, UserId,
};
use kurator_error::{KuratorResult, ValidationError, ValidationErrorKind};
use serenity::all::{
    self as discord, ActionRowComponent, ComponentInteraction, ComponentInteractionDataKind,
    Context, Member,
};
use tracing::warn;

/// Domain guild id of a serenity guild id.
pub fn guild_id(id: discord::GuildId) -> GuildId {
    GuildId(id.get())
}

/// Domain user id of a serenity user id.
pub fn user_id(id: discord::UserId) -> UserId {
    UserId(id.get())
}

/// Domain message id of a serenity message id.
pub fn message_id(id: discord::MessageId) -> MessageId {
    MessageId(id.get())
}

/// Domain channel id of a serenity channel id.
pub fn channel_id(id: discord::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Serenity channel id of a domain channel id.
pub fn to_channel(id: ChannelId) -> discord::ChannelId {
    discord::ChannelId::new(id.get())
}

/// Serenity message id of a domain message id.
pub fn to_message(id: MessageId) -> discord::MessageId {
    discord::MessageId::new(id.get())
}

/// Actor of an interaction. Interactions outside a guild are rejected.
pub fn actor(
    guild: Option<discord::GuildId>,
    user: &discord::User,
    member: Option<&Member>,
) -> KuratorResult<Actor> {
    let guild = guild.ok_or_else(|| ValidationError::new(ValidationErrorKind::NotInGuild))?;
    let roles: Vec<RoleId> = member
        .map(|m| m.roles.iter().map(|r| RoleId(r.get())).collect())
        .unwrap_or_default();
    Ok(Actor::new(guild_id(guild), user_id(user.id), roles))
}

/// Selection carried by component data, without resolving user details.
///
/// Users are reported as non-bots; [`PanelEvent::resolve`] fills in the flag.
pub fn selection(kind: &ComponentInteractionDataKind) -> Selection {
    match kind {
        ComponentInteractionDataKind::StringSelect { values } => Selection::Strings(values.clone()),
        ComponentInteractionDataKind::UserSelect { values } => Selection::Users(
            values
                .iter()
                .map(|id| SelectedUser {
                    id: user_id(*id),
                    bot: false,
                })
                .collect(),
        ),
        ComponentInteractionDataKind::RoleSelect { values } => {
            Selection::Roles(values.iter().map(|id| RoleId(id.get())).collect())
        }
        ComponentInteractionDataKind::ChannelSelect { values } => {
            Selection::Channels(values.iter().map(|id| channel_id(*id)).collect())
        }
        _ => Selection::None,
    }
}

/// Value of the text input `field` in a modal submission.
pub fn modal_value(rows: &[discord::ActionRow], field: &str) -> Option<String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == field => {
                input.value.clone()
            }
            _ => None,
        })
}

/// Component interaction with its actor and resolved selection.
#[derive(Debug, Clone)]
pub struct PanelEvent {
    /// The raw interaction, used to respond
    pub interaction: ComponentInteraction,
    actor: Option<Actor>,
    selection: Selection,
}

impl PanelEvent {
    /// Convert an interaction, looking up whether selected users are bots.
    pub async fn resolve(ctx: Context, interaction: ComponentInteraction) -> Self {
        let actor = actor(
            interaction.guild_id,
            &interaction.user,
            interaction.member.as_ref(),
        )
        .ok();
        let mut selection = selection(&interaction.data.kind);
        if let Selection::Users(users) = &mut selection {
            for user in users.iter_mut() {
                match discord::UserId::new(user.id.get()).to_user(&ctx).await {
                    Ok(resolved) => user.bot = resolved.bot,
                    Err(e) => {
                        warn!(user_id = %user.id, error = %e, "Failed to resolve selected user")
                    }
                }
            }
        }
        Self {
            interaction,
            actor,
            selection,
        }
    }

    /// Actor, or a not-in-guild error for direct messages.
    pub fn require_actor(&self) -> KuratorResult<&Actor> {
        self.actor
            .as_ref()
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::NotInGuild).into())
    }
}

/// Placeholder actor for events outside a guild; never matches any project.
static NO_ACTOR: std::sync::LazyLock<Actor> =
    std::sync::LazyLock::new(|| Actor::new(GuildId(0), UserId(0), Vec::new()));

impl CollectedEvent for PanelEvent {
    fn message_id(&self) -> MessageId {
        message_id(self.interaction.message.id)
    }

    fn custom_id(&self) -> &str {
        &self.interaction.data.custom_id
    }

    fn actor(&self) -> &Actor {
        self.actor.as_ref().unwrap_or(&NO_ACTOR)
    }

    fn selection(&self) -> Selection {
        self.selection.clone()
    }
}
