//! Collectors behind the project panel, its sub-panels and wizards.
//!
//! Each rendered message gets one [`Collector`] running on its own task,
//! owned by the user who opened the message. Dispatchers reply to failures
//! themselves and hand the error back to the collector for logging.

use crate::app::Kurator;
use crate::conversions::{PanelEvent, message_id};
use crate::error::gateway;
use crate::views::{self, Layout};
use async_trait::async_trait;
use futures_util::StreamExt;
use kurator_core::{
    Actor, AssignStaffState, AssignStaffWizard, Capabilities, CollectedEvent, Collector,
    ComponentId, DeleteState, DeleteWizard, Dispatch, Flow, GuildId, PlatformId, ProjectId,
    PublishOutcome, PublishState, PublishWizard, RemoveStaffState, RemoveStaffWizard,
    RoutingTable, SelectedUser, UserId, Wizard,
};
use kurator_error::{KuratorError, KuratorResult, ValidationError, ValidationErrorKind, WizardError};
use serenity::all::{
    self as discord, ComponentInteraction, ComponentInteractionCollector, Context, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Attach a collector to `message` and drive `dispatcher` on a background task.
pub fn spawn_collector<D>(
    ctx: &Context,
    message: discord::MessageId,
    ttl: Duration,
    routes: RoutingTable,
    owner: UserId,
    mut dispatcher: D,
) where
    D: Dispatch<PanelEvent> + 'static,
{
    let ctx = ctx.clone();
    let collector = Collector::new(message_id(message), ttl, routes).owned_by(owner);
    tokio::spawn(async move {
        let events_ctx = ctx.clone();
        let events = ComponentInteractionCollector::new(&ctx.shard)
            .message_id(message)
            .stream()
            .then(move |interaction| PanelEvent::resolve(events_ctx.clone(), interaction));
        let exit = collector.run(events, &mut dispatcher).await;
        debug!(?exit, %message, "Collector stopped");
    });
}

async fn respond(
    ctx: &Context,
    interaction: &ComponentInteraction,
    response: CreateInteractionResponse,
) -> KuratorResult<()> {
    interaction
        .create_response(&ctx.http, response)
        .await
        .map_err(gateway)
}

fn update(embed: CreateEmbed, layout: &Layout) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(layout.components()),
    )
}

fn update_text(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(content)
            .embeds(Vec::new())
            .components(Vec::new()),
    )
}

/// Respond with a new ephemeral message and return its id.
async fn open(
    ctx: &Context,
    interaction: &ComponentInteraction,
    embed: CreateEmbed,
    layout: &Layout,
) -> KuratorResult<discord::MessageId> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(layout.components())
            .ephemeral(true),
    );
    respond(ctx, interaction, response).await?;
    let message = interaction
        .get_response(&ctx.http)
        .await
        .map_err(gateway)?;
    Ok(message.id)
}

/// Tell the user why their interaction failed.
///
/// Sends a followup when the interaction was already acknowledged.
async fn reply_error(ctx: &Context, interaction: &ComponentInteraction, err: &KuratorError) {
    let content = views::user_message(err);
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content.clone())
            .ephemeral(true),
    );
    if interaction.create_response(&ctx.http, response).await.is_ok() {
        return;
    }
    let followup = CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = interaction.create_followup(&ctx.http, followup).await {
        warn!(error = %e, "Failed to report error to user");
    }
}

async fn reported<T>(
    ctx: &Context,
    event: &PanelEvent,
    result: KuratorResult<T>,
) -> KuratorResult<T> {
    if let Err(e) = &result {
        reply_error(ctx, &event.interaction, e).await;
    }
    result
}

fn unrouted(component: ComponentId) -> KuratorError {
    WizardError::new("panel", component.as_str()).into()
}

fn required<T>(value: Option<T>, field: &'static str) -> KuratorResult<T> {
    value.ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyField(field)).into())
}

async fn project_capabilities(
    app: &Kurator,
    event: &PanelEvent,
    project: ProjectId,
) -> KuratorResult<Capabilities> {
    app.resolver.resolve(event.require_actor()?, project).await
}

/// Platform manager embed and controls for a project.
pub(crate) async fn platform_view(
    app: &Kurator,
    guild: GuildId,
    project: ProjectId,
) -> KuratorResult<(CreateEmbed, Layout)> {
    let record = app.projects.require(guild, project).await?;
    let platforms = app.platforms.list(project).await?;
    Ok((
        views::platform_embed(&record, &platforms),
        views::platform_layout(&platforms),
    ))
}

async fn staff_view(
    app: &Kurator,
    guild: GuildId,
    project: ProjectId,
) -> KuratorResult<(CreateEmbed, Layout)> {
    let record = app.projects.require(guild, project).await?;
    let staff = app.staff.list(project).await?;
    Ok((
        views::staff_embed(&record, &staff),
        views::staff_layout(&staff),
    ))
}

/// The primary panel of one project.
#[derive(Clone)]
pub struct ProjectPanel {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
}

impl ProjectPanel {
    /// Panel for `project` in `guild`.
    pub fn new(ctx: Context, app: Kurator, guild: GuildId, project: ProjectId) -> Self {
        Self {
            ctx,
            app,
            guild,
            project,
        }
    }

    /// Embed and controls of the panel as `actor` sees it.
    pub async fn render(&self, actor: &Actor) -> KuratorResult<(CreateEmbed, Layout)> {
        let project = self.app.projects.require(self.guild, self.project).await?;
        let capabilities = self.app.resolver.resolve(actor, self.project).await?;
        Ok((
            views::panel_embed(&project),
            views::panel_layout(&project, &capabilities),
        ))
    }

    /// Start collecting on the rendered panel message.
    pub fn attach(self, message: discord::MessageId, layout: &Layout, owner: UserId) {
        let ctx = self.ctx.clone();
        let ttl = self.app.collector_ttl;
        spawn_collector(&ctx, message, ttl, layout.routes(), owner, self);
    }

    async fn rerender(&self, event: &PanelEvent) -> KuratorResult<Flow> {
        let (embed, layout) = self.render(event.require_actor()?).await?;
        respond(&self.ctx, &event.interaction, update(embed, &layout)).await?;
        Ok(Flow::Replace(layout.routes()))
    }

    async fn publish(&self, event: &PanelEvent, owner: UserId) -> KuratorResult<Flow> {
        let defer = CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(true),
        );
        respond(&self.ctx, &event.interaction, defer).await?;

        let edit = match self.app.publisher.publish(self.project, None).await? {
            PublishOutcome::Updated(binding) | PublishOutcome::Published(binding) => {
                EditInteractionResponse::new().content(format!(
                    "Summary updated: {}",
                    views::message_link(self.guild, &binding)
                ))
            }
            PublishOutcome::NeedsDestination => {
                let wizard = PublishWizard::new();
                let layout = views::publish_channel_layout();
                let message = event
                    .interaction
                    .edit_response(
                        &self.ctx.http,
                        EditInteractionResponse::new()
                            .content("Choose the channel to publish to.")
                            .components(layout.components()),
                    )
                    .await
                    .map_err(gateway)?;
                let dispatch = PublishDispatch {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                    wizard: wizard.clone(),
                };
                spawn_collector(
                    &self.ctx,
                    message.id,
                    self.app.collector_ttl,
                    wizard.routes(),
                    owner,
                    dispatch,
                );
                return Ok(Flow::Continue);
            }
        };
        event
            .interaction
            .edit_response(&self.ctx.http, edit)
            .await
            .map_err(gateway)?;
        Ok(Flow::Continue)
    }

    async fn handle(&self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let owner = event.require_actor()?.user_id;
        match component {
            ComponentId::AssignCurator => {
                let user = required(event.selection().first_user(), "user")?;
                self.app
                    .projects
                    .assign_curator(self.guild, self.project, user)
                    .await?;
                self.rerender(event).await
            }
            ComponentId::RemoveCurator => {
                self.app
                    .projects
                    .remove_curator(self.guild, self.project)
                    .await?;
                self.rerender(event).await
            }
            ComponentId::Unlink => {
                self.app.projects.unlink(self.guild, self.project).await?;
                self.rerender(event).await
            }
            ComponentId::ManageEmployees => {
                let (embed, layout) = staff_view(&self.app, self.guild, self.project).await?;
                let message = open(&self.ctx, &event.interaction, embed, &layout).await?;
                let panel = StaffPanel {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                };
                spawn_collector(
                    &self.ctx,
                    message,
                    self.app.collector_ttl,
                    layout.routes(),
                    owner,
                    panel,
                );
                Ok(Flow::Continue)
            }
            ComponentId::ManagePlatforms => {
                let (embed, layout) = platform_view(&self.app, self.guild, self.project).await?;
                let message = open(&self.ctx, &event.interaction, embed, &layout).await?;
                let panel = PlatformPanel {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                };
                spawn_collector(
                    &self.ctx,
                    message,
                    self.app.collector_ttl,
                    PlatformPanel::routes(),
                    owner,
                    panel,
                );
                Ok(Flow::Continue)
            }
            ComponentId::Preview => {
                let summary = self.app.publisher.summary(self.project).await?;
                let embed = views::summary_embed(&summary, self.app.gateway.identity());
                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .ephemeral(true),
                );
                respond(&self.ctx, &event.interaction, response).await?;
                Ok(Flow::Continue)
            }
            ComponentId::Publish => self.publish(event, owner).await,
            ComponentId::Delete => {
                let project = self.app.projects.require(self.guild, self.project).await?;
                let wizard = DeleteWizard::new();
                let embed = CreateEmbed::new()
                    .title(format!("Delete {}?", project.title))
                    .description("The curator, staff and platforms are removed as well.");
                let message =
                    open(&self.ctx, &event.interaction, embed, &views::delete_layout()).await?;
                let dispatch = DeleteDispatch {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                    wizard: wizard.clone(),
                };
                spawn_collector(
                    &self.ctx,
                    message,
                    self.app.collector_ttl,
                    wizard.routes(),
                    owner,
                    dispatch,
                );
                Ok(Flow::Continue)
            }
            other => Err(unrouted(other)),
        }
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for ProjectPanel {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Staff manager opened from the project panel.
pub struct StaffPanel {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
}

impl StaffPanel {
    async fn handle(&self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let owner = event.require_actor()?.user_id;
        match component {
            ComponentId::AssignEmployee => {
                self.app.projects.require(self.guild, self.project).await?;
                let wizard = AssignStaffWizard::new();
                let embed = CreateEmbed::new().title("Assign staff");
                let message = open(
                    &self.ctx,
                    &event.interaction,
                    embed,
                    &views::assign_profession_layout(),
                )
                .await?;
                let dispatch = AssignStaffDispatch {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                    wizard: wizard.clone(),
                };
                spawn_collector(
                    &self.ctx,
                    message,
                    self.app.collector_ttl,
                    wizard.routes(),
                    owner,
                    dispatch,
                );
                Ok(Flow::Continue)
            }
            ComponentId::RemoveEmployee => {
                let offered = self.app.staff.staffed_professions(self.project).await?;
                if offered.is_empty() {
                    Err(ValidationError::new(ValidationErrorKind::EmptyField("staff")))?
                }
                let wizard = RemoveStaffWizard::new(offered.clone());
                let embed = CreateEmbed::new().title("Remove staff");
                let message = open(
                    &self.ctx,
                    &event.interaction,
                    embed,
                    &views::remove_profession_layout(&offered),
                )
                .await?;
                let dispatch = RemoveStaffDispatch {
                    ctx: self.ctx.clone(),
                    app: self.app.clone(),
                    guild: self.guild,
                    project: self.project,
                    wizard: wizard.clone(),
                };
                spawn_collector(
                    &self.ctx,
                    message,
                    self.app.collector_ttl,
                    wizard.routes(),
                    owner,
                    dispatch,
                );
                Ok(Flow::Continue)
            }
            other => Err(unrouted(other)),
        }
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for StaffPanel {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Platform manager opened from the project panel.
pub struct PlatformPanel {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
}

impl PlatformPanel {
    /// Routes of the platform manager.
    ///
    /// Modal submissions re-render the manager outside its collector, so every
    /// platform control stays routed and the services enforce the limits.
    pub fn routes() -> RoutingTable {
        RoutingTable::from_components([
            ComponentId::AddPlatform,
            ComponentId::UpdatePlatform,
            ComponentId::RemovePlatform,
        ])
    }

    fn selected_platform(event: &PanelEvent) -> KuratorResult<PlatformId> {
        let selection = event.selection();
        let value = required(selection.first_string(), "platform")?;
        let id = value
            .parse::<i32>()
            .map_err(|_| ValidationError::new(ValidationErrorKind::NotANumber(value.to_string())))?;
        Ok(PlatformId(id))
    }

    async fn handle(&self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        match component {
            ComponentId::AddPlatform => {
                self.app.projects.require(self.guild, self.project).await?;
                let modal = views::add_platform_modal(self.project);
                respond(&self.ctx, &event.interaction, CreateInteractionResponse::Modal(modal))
                    .await?;
            }
            ComponentId::UpdatePlatform => {
                let id = Self::selected_platform(event)?;
                let platform = self.app.platforms.require(self.project, id).await?;
                let modal = views::update_platform_modal(&platform);
                respond(&self.ctx, &event.interaction, CreateInteractionResponse::Modal(modal))
                    .await?;
            }
            ComponentId::RemovePlatform => {
                let id = Self::selected_platform(event)?;
                self.app.platforms.remove(self.project, id).await?;
                let (embed, layout) = platform_view(&self.app, self.guild, self.project).await?;
                respond(&self.ctx, &event.interaction, update(embed, &layout)).await?;
            }
            other => return Err(unrouted(other)),
        }
        Ok(Flow::Continue)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for PlatformPanel {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Drives the staff assignment wizard.
pub struct AssignStaffDispatch {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
    wizard: AssignStaffWizard,
}

impl AssignStaffDispatch {
    async fn handle(&mut self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let mut wizard = self.wizard.clone();
        wizard.advance(component, &event.selection())?;

        let response = match wizard.state() {
            AssignStaffState::AwaitingProfession => return Ok(Flow::Continue),
            AssignStaffState::AwaitingUser { profession } => {
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .content(format!("Choose who works as {}.", profession.label()))
                        .components(views::assign_user_layout().components()),
                )
            }
            AssignStaffState::Done { profession, user } => {
                let selected = SelectedUser { id: user, bot: false };
                self.app.staff.assign(self.project, selected, profession).await?;
                let (embed, _) = staff_view(&self.app, self.guild, self.project).await?;
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .content(format!("Assigned <@{user}> as {}.", profession.label()))
                        .embed(embed)
                        .components(Vec::new()),
                )
            }
        };
        respond(&self.ctx, &event.interaction, response).await?;

        let flow = wizard.flow();
        self.wizard = wizard;
        Ok(flow)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for AssignStaffDispatch {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Drives the staff removal wizard.
pub struct RemoveStaffDispatch {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
    wizard: RemoveStaffWizard,
}

impl RemoveStaffDispatch {
    async fn handle(&mut self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let mut wizard = self.wizard.clone();
        wizard.advance(component, &event.selection())?;

        if let RemoveStaffState::Done { profession } = wizard.state() {
            let removed = self
                .app
                .staff
                .remove_profession(self.project, profession)
                .await?;
            let (embed, _) = staff_view(&self.app, self.guild, self.project).await?;
            let response = CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(format!("Removed {removed} {}.", profession.label()))
                    .embed(embed)
                    .components(Vec::new()),
            );
            respond(&self.ctx, &event.interaction, response).await?;
        }

        let flow = wizard.flow();
        self.wizard = wizard;
        Ok(flow)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for RemoveStaffDispatch {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Drives the first-publish channel choice.
pub struct PublishDispatch {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
    wizard: PublishWizard,
}

impl PublishDispatch {
    async fn handle(&mut self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let mut wizard = self.wizard.clone();
        wizard.advance(component, &event.selection())?;

        if let PublishState::Done { channel } = wizard.state() {
            respond(&self.ctx, &event.interaction, CreateInteractionResponse::Acknowledge).await?;
            let content = match self.app.publisher.publish(self.project, Some(channel)).await? {
                PublishOutcome::Published(binding) | PublishOutcome::Updated(binding) => {
                    format!("Published: {}", views::message_link(self.guild, &binding))
                }
                PublishOutcome::NeedsDestination => return Ok(Flow::Continue),
            };
            event
                .interaction
                .edit_response(
                    &self.ctx.http,
                    EditInteractionResponse::new()
                        .content(content)
                        .components(Vec::new()),
                )
                .await
                .map_err(gateway)?;
        }

        let flow = wizard.flow();
        self.wizard = wizard;
        Ok(flow)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for PublishDispatch {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Drives the delete confirmation.
pub struct DeleteDispatch {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
    project: ProjectId,
    wizard: DeleteWizard,
}

impl DeleteDispatch {
    async fn handle(&mut self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let mut wizard = self.wizard.clone();
        wizard.advance(component, &event.selection())?;

        let content = match wizard.state() {
            DeleteState::AwaitingConfirmation => return Ok(Flow::Continue),
            DeleteState::Confirmed => {
                self.app.projects.delete(self.guild, self.project).await?;
                "Project deleted."
            }
            DeleteState::Cancelled => "Deletion cancelled.",
        };
        respond(&self.ctx, &event.interaction, update_text(content)).await?;

        let flow = wizard.flow();
        self.wizard = wizard;
        Ok(flow)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for DeleteDispatch {
    async fn capabilities(&self, event: &PanelEvent) -> KuratorResult<Capabilities> {
        project_capabilities(&self.app, event, self.project).await
    }

    #[instrument(skip(self, event), fields(project_id = %self.project, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}

/// Super role configuration opened by `/super-role`.
///
/// The command is limited to administrators; the collector only adds the
/// owner check.
pub struct AdminPanel {
    ctx: Context,
    app: Kurator,
    guild: GuildId,
}

impl AdminPanel {
    /// Panel for `guild`.
    pub fn new(ctx: Context, app: Kurator, guild: GuildId) -> Self {
        Self { ctx, app, guild }
    }

    /// Start collecting on the rendered admin message.
    pub fn attach(self, message: discord::MessageId, owner: UserId) {
        let ctx = self.ctx.clone();
        let ttl = self.app.collector_ttl;
        spawn_collector(&ctx, message, ttl, views::admin_layout().routes(), owner, self);
    }

    async fn handle(&self, component: ComponentId, event: &PanelEvent) -> KuratorResult<Flow> {
        let current = match component {
            ComponentId::AssignSuperRole => {
                let role = required(event.selection().first_role(), "role")?;
                Some(self.app.super_roles.assign(self.guild, role).await?)
            }
            ComponentId::RemoveSuperRole => {
                self.app.super_roles.remove(self.guild).await?;
                None
            }
            other => return Err(unrouted(other)),
        };
        let response = update(views::admin_embed(current.as_ref()), &views::admin_layout());
        respond(&self.ctx, &event.interaction, response).await?;
        Ok(Flow::Continue)
    }
}

#[async_trait]
impl Dispatch<PanelEvent> for AdminPanel {
    async fn capabilities(&self, _event: &PanelEvent) -> KuratorResult<Capabilities> {
        Ok(Capabilities::none())
    }

    #[instrument(skip(self, event), fields(guild_id = %self.guild, %component))]
    async fn dispatch(&mut self, component: ComponentId, event: PanelEvent) -> KuratorResult<Flow> {
        debug!(user_id = %event.actor().user_id, "Admin panel interaction");
        let result = self.handle(component, &event).await;
        reported(&self.ctx, &event, result).await
    }
}
