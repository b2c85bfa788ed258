//! Slash commands, the message context menu, autocomplete and modal submissions.

use crate::app::Kurator;
use crate::conversions::{actor, message_id, modal_value};
use crate::error::gateway;
use crate::panel::{AdminPanel, ProjectPanel, platform_view};
use crate::views::{self, FORBIDDEN, SUPER_ROLE_MISSING, fields};
use async_trait::async_trait;
use kurator_core::{Actor, ModalId, ProjectId};
use kurator_error::{KuratorError, KuratorResult, ValidationError, ValidationErrorKind};
use serenity::all::{
    self as discord, CommandInteraction, CommandOptionType, CommandType, Context,
    CreateAutocompleteResponse, CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, ModalInteraction, Permissions,
};
use tracing::{instrument, warn};

/// Opens the new-project modal.
pub const CREATE_PROJECT: &str = "create-project";
/// Opens the panel of an existing project.
pub const UPDATE_PROJECT: &str = "update-project";
/// Configures the guild's super role.
pub const SUPER_ROLE: &str = "super-role";
/// Message context menu opening the panel of the project published there.
pub const EDIT_PROJECT: &str = "Edit project";
/// Option of [`UPDATE_PROJECT`].
pub const SEARCH_OPTION: &str = "search";

/// Maximum length of an autocomplete choice name.
const CHOICE_NAME_MAX_LENGTH: usize = 100;

/// Application commands registered on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(CREATE_PROJECT)
            .description("Create a project")
            .dm_permission(false),
        CreateCommand::new(UPDATE_PROJECT)
            .description("Open the panel of a project")
            .dm_permission(false)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    SEARCH_OPTION,
                    "Project id or title",
                )
                .required(true)
                .set_autocomplete(true),
            ),
        CreateCommand::new(SUPER_ROLE)
            .description("Configure the role allowed to manage projects")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false),
        CreateCommand::new(EDIT_PROJECT)
            .kind(CommandType::Message)
            .dm_permission(false),
    ]
}

/// Responses shared by command and modal interactions.
#[async_trait]
trait Reply: Sync {
    async fn send(&self, ctx: &Context, response: CreateInteractionResponse) -> KuratorResult<()>;
    async fn edit(
        &self,
        ctx: &Context,
        edit: EditInteractionResponse,
    ) -> KuratorResult<discord::Message>;
}

macro_rules! impl_reply {
    ($($interaction:ty),*) => {
        $(
            #[async_trait]
            impl Reply for $interaction {
                async fn send(
                    &self,
                    ctx: &Context,
                    response: CreateInteractionResponse,
                ) -> KuratorResult<()> {
                    self.create_response(&ctx.http, response).await.map_err(gateway)
                }

                async fn edit(
                    &self,
                    ctx: &Context,
                    edit: EditInteractionResponse,
                ) -> KuratorResult<discord::Message> {
                    self.edit_response(&ctx.http, edit).await.map_err(gateway)
                }
            }
        )*
    };
}

impl_reply!(CommandInteraction, ModalInteraction);

fn notice(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

async fn defer(ctx: &Context, interaction: &impl Reply) -> KuratorResult<()> {
    let response =
        CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true));
    interaction.send(ctx, response).await
}

async fn edit_text(ctx: &Context, interaction: &impl Reply, content: &str) -> KuratorResult<()> {
    interaction
        .edit(ctx, EditInteractionResponse::new().content(content))
        .await?;
    Ok(())
}

/// Tell the user why the interaction failed, whether or not it was deferred.
async fn report(ctx: &Context, interaction: &impl Reply, err: &KuratorError) {
    let content = views::user_message(err);
    if interaction.send(ctx, notice(content.clone())).await.is_ok() {
        return;
    }
    let edit = EditInteractionResponse::new()
        .content(content)
        .embeds(Vec::new())
        .components(Vec::new());
    if let Err(e) = interaction.edit(ctx, edit).await {
        warn!(error = %e, "Failed to report error to user");
    }
}

fn required(value: Option<String>, field: &'static str) -> KuratorResult<String> {
    value.ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyField(field)).into())
}

/// Rejection text when `actor` may not create projects.
async fn creation_refusal(app: &Kurator, actor: &Actor) -> KuratorResult<Option<&'static str>> {
    if app.super_roles.current(actor.guild_id).await?.is_none() {
        return Ok(Some(SUPER_ROLE_MISSING));
    }
    let capabilities = app.resolver.resolve_guild(actor).await?;
    Ok((!capabilities.is_super_user()).then_some(FORBIDDEN))
}

/// Render the project panel into the deferred response and start its collector.
async fn open_panel(
    ctx: &Context,
    app: &Kurator,
    interaction: &impl Reply,
    actor: &Actor,
    project: ProjectId,
) -> KuratorResult<()> {
    let capabilities = app.resolver.resolve(actor, project).await?;
    if !capabilities.can_act_curator() {
        return edit_text(ctx, interaction, FORBIDDEN).await;
    }

    let panel = ProjectPanel::new(ctx.clone(), app.clone(), actor.guild_id, project);
    let (embed, layout) = panel.render(actor).await?;
    let message = interaction
        .edit(
            ctx,
            EditInteractionResponse::new()
                .embed(embed)
                .components(layout.components()),
        )
        .await?;
    panel.attach(message.id, &layout, actor.user_id);
    Ok(())
}

/// Handle a slash command or context menu invocation.
#[instrument(skip_all, fields(command = %command.data.name, user_id = %command.user.id))]
pub async fn handle_command(
    ctx: &Context,
    app: &Kurator,
    command: &CommandInteraction,
) -> KuratorResult<()> {
    let result = run_command(ctx, app, command).await;
    if let Err(e) = &result {
        report(ctx, command, e).await;
    }
    result
}

async fn run_command(
    ctx: &Context,
    app: &Kurator,
    command: &CommandInteraction,
) -> KuratorResult<()> {
    let actor = actor(command.guild_id, &command.user, command.member.as_deref())?;

    match command.data.name.as_str() {
        CREATE_PROJECT => {
            if let Some(reason) = creation_refusal(app, &actor).await? {
                return command.send(ctx, notice(reason)).await;
            }
            command
                .send(ctx, CreateInteractionResponse::Modal(views::create_project_modal()))
                .await
        }
        UPDATE_PROJECT => {
            defer(ctx, command).await?;
            let search = command
                .data
                .options
                .iter()
                .find(|option| option.name == SEARCH_OPTION)
                .and_then(|option| option.value.as_str())
                .unwrap_or_default();
            let project = app.projects.find(actor.guild_id, search).await?;
            open_panel(ctx, app, command, &actor, project.id).await
        }
        EDIT_PROJECT => {
            defer(ctx, command).await?;
            let target = command
                .data
                .target_id
                .ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyField("message")))?;
            let project = app
                .projects
                .by_message(actor.guild_id, message_id(target.to_message_id()))
                .await?;
            open_panel(ctx, app, command, &actor, project.id).await
        }
        SUPER_ROLE => {
            defer(ctx, command).await?;
            let current = app.super_roles.current(actor.guild_id).await?;
            let layout = views::admin_layout();
            let message = command
                .edit(
                    ctx,
                    EditInteractionResponse::new()
                        .embed(views::admin_embed(current.as_ref()))
                        .components(layout.components()),
                )
                .await?;
            AdminPanel::new(ctx.clone(), app.clone(), actor.guild_id)
                .attach(message.id, actor.user_id);
            Ok(())
        }
        other => {
            warn!(command = other, "Unknown command");
            Ok(())
        }
    }
}

fn choice_name(title: &str) -> String {
    title.chars().take(CHOICE_NAME_MAX_LENGTH).collect()
}

/// Suggest project titles for [`UPDATE_PROJECT`].
#[instrument(skip_all, fields(user_id = %interaction.user.id))]
pub async fn handle_autocomplete(
    ctx: &Context,
    app: &Kurator,
    interaction: &CommandInteraction,
) -> KuratorResult<()> {
    let actor = actor(
        interaction.guild_id,
        &interaction.user,
        interaction.member.as_deref(),
    )?;
    let fragment = interaction
        .data
        .autocomplete()
        .map(|option| option.value)
        .unwrap_or_default();
    let projects = app.projects.search(actor.guild_id, fragment).await?;
    let choices = projects
        .iter()
        .fold(CreateAutocompleteResponse::new(), |response, project| {
            response.add_string_choice(choice_name(&project.title), project.id.to_string())
        });
    interaction
        .send(ctx, CreateInteractionResponse::Autocomplete(choices))
        .await
}

/// Handle a submitted modal.
#[instrument(skip_all, fields(custom_id = %modal.data.custom_id, user_id = %modal.user.id))]
pub async fn handle_modal(
    ctx: &Context,
    app: &Kurator,
    modal: &ModalInteraction,
) -> KuratorResult<()> {
    let result = run_modal(ctx, app, modal).await;
    if let Err(e) = &result {
        report(ctx, modal, e).await;
    }
    result
}

async fn run_modal(ctx: &Context, app: &Kurator, modal: &ModalInteraction) -> KuratorResult<()> {
    let actor = actor(modal.guild_id, &modal.user, modal.member.as_ref())?;
    let id: ModalId = modal.data.custom_id.parse()?;
    let rows = &modal.data.components;

    match id {
        ModalId::CreateProject => {
            defer(ctx, modal).await?;
            if let Some(reason) = creation_refusal(app, &actor).await? {
                return edit_text(ctx, modal, reason).await;
            }
            let title = required(modal_value(rows, fields::TITLE), "title")?;
            let poster = required(modal_value(rows, fields::POSTER), "poster")?;
            let project = app.projects.create(actor.guild_id, &title, &poster).await?;
            open_panel(ctx, app, modal, &actor, project.id).await
        }
        ModalId::AddPlatform { project } => {
            if !app.resolver.resolve(&actor, project).await?.can_act_curator() {
                return modal.send(ctx, notice(FORBIDDEN)).await;
            }
            let name = required(modal_value(rows, fields::NAME), "name")?;
            let url = required(modal_value(rows, fields::URL), "url")?;
            app.platforms.add(project, &name, &url).await?;
            refresh_platforms(ctx, app, modal, &actor, project).await
        }
        ModalId::UpdatePlatform { project, platform } => {
            if !app.resolver.resolve(&actor, project).await?.can_act_curator() {
                return modal.send(ctx, notice(FORBIDDEN)).await;
            }
            let name = required(modal_value(rows, fields::NAME), "name")?;
            let url = required(modal_value(rows, fields::URL), "url")?;
            app.platforms.update(project, platform, &name, &url).await?;
            refresh_platforms(ctx, app, modal, &actor, project).await
        }
    }
}

/// Re-render the platform manager the modal was opened from.
async fn refresh_platforms(
    ctx: &Context,
    app: &Kurator,
    modal: &ModalInteraction,
    actor: &Actor,
    project: ProjectId,
) -> KuratorResult<()> {
    if modal.message.is_none() {
        return modal.send(ctx, notice("Platform saved.")).await;
    }
    let (embed, layout) = platform_view(app, actor.guild_id, project).await?;
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(layout.components()),
    );
    modal.send(ctx, response).await
}
