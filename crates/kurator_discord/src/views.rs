//! Embeds, component layouts and modals rendered by the bot.
//!
//! Every interactive message is described by a [`Layout`] first. The same
//! layout produces the serenity action rows and the [`RoutingTable`] of the
//! collector attached to the message, so a collector only ever routes
//! components that are rendered and enabled.

use kurator_core::{
    Capabilities, ComponentId, Employee, GuildId, ModalId, PLATFORM_NAME_MAX_LENGTH, Platform,
    Profession, Project, ProjectId, ProjectSummary, PublishBinding, RoutingTable, SuperRole,
    TITLE_MAX_LENGTH, accepts_employee, accepts_platform,
};
use kurator_error::{KuratorError, KuratorErrorKind, ValidationErrorKind};
use serenity::all::{
    ButtonStyle, ChannelType, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInputText, CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
    InputTextStyle, Timestamp,
};
use strum::IntoEnumIterator;

/// Reply for backend failures.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Reply when a guard finds no super role configured.
pub const SUPER_ROLE_MISSING: &str =
    "The super role is not configured. An administrator can set it with /super-role.";

/// Reply when a guard rejects the actor.
pub const FORBIDDEN: &str = "You are not allowed to do that.";

/// Text input ids of the bot's modals.
pub mod fields {
    /// Project title
    pub const TITLE: &str = "title";
    /// Project poster URL
    pub const POSTER: &str = "poster";
    /// Platform name
    pub const NAME: &str = "name";
    /// Platform URL
    pub const URL: &str = "url";
}

const URL_MAX_LENGTH: u16 = 512;

/// Name and avatar shown in summary footers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    /// Bot user name
    pub name: String,
    /// Avatar URL
    pub avatar: Option<String>,
}

/// A button in a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Custom id
    pub component: ComponentId,
    /// Label
    pub label: &'static str,
    /// Colour
    pub style: ButtonStyle,
    /// Greyed out
    pub disabled: bool,
}

impl Button {
    fn new(component: ComponentId, label: &'static str, style: ButtonStyle, enabled: bool) -> Self {
        Self {
            component,
            label,
            style,
            disabled: !enabled,
        }
    }
}

/// Options of a select menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectKind {
    /// `(label, value)` pairs
    Strings(Vec<(String, String)>),
    /// Guild members
    Users,
    /// Guild roles
    Roles,
    /// Text channels
    TextChannels,
}

/// A select menu in a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    /// Custom id
    pub component: ComponentId,
    /// Placeholder text
    pub placeholder: &'static str,
    /// Options
    pub kind: SelectKind,
    /// Greyed out
    pub disabled: bool,
}

/// One action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Up to five buttons
    Buttons(Vec<Button>),
    /// A single select menu
    Select(Select),
}

/// Interactive components of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Rows in render order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Enabled components, in render order.
    pub fn enabled(&self) -> Vec<ComponentId> {
        self.rows
            .iter()
            .flat_map(|row| match row {
                Row::Buttons(buttons) => buttons
                    .iter()
                    .filter(|b| !b.disabled)
                    .map(|b| b.component)
                    .collect::<Vec<_>>(),
                Row::Select(select) if !select.disabled => vec![select.component],
                Row::Select(_) => Vec::new(),
            })
            .collect()
    }

    /// Routing table for a collector on this layout.
    pub fn routes(&self) -> RoutingTable {
        RoutingTable::from_components(self.enabled())
    }

    /// Serenity action rows.
    pub fn components(&self) -> Vec<CreateActionRow> {
        self.rows.iter().map(action_row).collect()
    }
}

fn action_row(row: &Row) -> CreateActionRow {
    match row {
        Row::Buttons(buttons) => CreateActionRow::Buttons(
            buttons
                .iter()
                .map(|b| {
                    CreateButton::new(b.component.as_str())
                        .label(b.label)
                        .style(b.style)
                        .disabled(b.disabled)
                })
                .collect(),
        ),
        Row::Select(select) => {
            let kind = match &select.kind {
                SelectKind::Strings(options) => CreateSelectMenuKind::String {
                    options: options
                        .iter()
                        .map(|(label, value)| CreateSelectMenuOption::new(label, value))
                        .collect(),
                },
                SelectKind::Users => CreateSelectMenuKind::User {
                    default_users: None,
                },
                SelectKind::Roles => CreateSelectMenuKind::Role {
                    default_roles: None,
                },
                SelectKind::TextChannels => CreateSelectMenuKind::Channel {
                    channel_types: Some(vec![ChannelType::Text]),
                    default_channels: None,
                },
            };
            CreateActionRow::SelectMenu(
                CreateSelectMenu::new(select.component.as_str(), kind)
                    .placeholder(select.placeholder)
                    .disabled(select.disabled),
            )
        }
    }
}

/// Controls of the project panel, enabled per the viewer's capabilities.
pub fn panel_layout(project: &Project, capabilities: &Capabilities) -> Layout {
    let curator = capabilities.can_act_curator();
    let admin = capabilities.can_act_super();
    let publish = if project.binding.is_some() { "Update" } else { "Publish" };
    Layout::default()
        .row(Row::Select(Select {
            component: ComponentId::AssignCurator,
            placeholder: "Assign a curator",
            kind: SelectKind::Users,
            disabled: !admin,
        }))
        .row(Row::Buttons(vec![
            Button::new(
                ComponentId::RemoveCurator,
                "Remove curator",
                ButtonStyle::Secondary,
                admin && project.curator.is_some(),
            ),
            Button::new(
                ComponentId::ManageEmployees,
                "Staff",
                ButtonStyle::Primary,
                curator,
            ),
            Button::new(
                ComponentId::ManagePlatforms,
                "Platforms",
                ButtonStyle::Primary,
                curator,
            ),
        ]))
        .row(Row::Buttons(vec![
            Button::new(ComponentId::Preview, "Preview", ButtonStyle::Secondary, curator),
            Button::new(ComponentId::Publish, publish, ButtonStyle::Success, curator),
            Button::new(
                ComponentId::Unlink,
                "Unlink",
                ButtonStyle::Secondary,
                admin && project.binding.is_some(),
            ),
            Button::new(ComponentId::Delete, "Delete", ButtonStyle::Danger, admin),
        ]))
}

/// Jump link to a published summary.
pub fn message_link(guild: GuildId, binding: &PublishBinding) -> String {
    format!(
        "https://discord.com/channels/{}/{}/{}",
        guild, binding.channel_id, binding.message_id
    )
}

/// Header of the project panel.
pub fn panel_embed(project: &Project) -> CreateEmbed {
    let curator = project
        .curator
        .as_ref()
        .map(|c| format!("<@{}>", c.user_id))
        .unwrap_or_else(|| "Not assigned".to_string());
    let published = project
        .binding
        .map(|b| message_link(project.guild_id, &b))
        .unwrap_or_else(|| "Not published".to_string());
    CreateEmbed::new()
        .title(&project.title)
        .thumbnail(&project.poster)
        .field("Curator", curator, true)
        .field("Published", published, true)
        .footer(CreateEmbedFooter::new(format!("Project #{}", project.id)))
}

/// Published summary of a project.
pub fn summary_embed(summary: &ProjectSummary, identity: Option<&BotIdentity>) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .description(format!("> {}", summary.title))
        .image(&summary.poster)
        .field("Staff", summary.staff_section(), true)
        .field("Platforms", summary.platform_section(), true)
        .timestamp(Timestamp::now());
    if let Some(identity) = identity {
        let mut footer = CreateEmbedFooter::new(&identity.name);
        if let Some(avatar) = &identity.avatar {
            footer = footer.icon_url(avatar);
        }
        embed = embed.footer(footer);
    }
    embed
}

/// Platform manager controls.
pub fn platform_layout(platforms: &[Platform]) -> Layout {
    let mut layout = Layout::default().row(Row::Buttons(vec![Button::new(
        ComponentId::AddPlatform,
        "Add platform",
        ButtonStyle::Success,
        accepts_platform(platforms.len()),
    )]));
    if !platforms.is_empty() {
        let options: Vec<(String, String)> = platforms
            .iter()
            .map(|p| (p.name.clone(), p.id.to_string()))
            .collect();
        layout = layout
            .row(Row::Select(Select {
                component: ComponentId::UpdatePlatform,
                placeholder: "Edit a platform",
                kind: SelectKind::Strings(options.clone()),
                disabled: false,
            }))
            .row(Row::Select(Select {
                component: ComponentId::RemovePlatform,
                placeholder: "Remove a platform",
                kind: SelectKind::Strings(options),
                disabled: false,
            }));
    }
    layout
}

/// Platform manager header.
pub fn platform_embed(project: &Project, platforms: &[Platform]) -> CreateEmbed {
    let summary = ProjectSummary {
        title: project.title.clone(),
        poster: project.poster.clone(),
        staff: Vec::new(),
        curator: None,
        platforms: platforms
            .iter()
            .map(|p| (p.name.clone(), p.url.clone()))
            .collect(),
    };
    CreateEmbed::new()
        .title(format!("Platforms of {}", project.title))
        .description(summary.platform_section())
}

/// Staff manager controls.
pub fn staff_layout(staff: &[Employee]) -> Layout {
    Layout::default().row(Row::Buttons(vec![
        Button::new(
            ComponentId::AssignEmployee,
            "Assign",
            ButtonStyle::Success,
            accepts_employee(staff.len()),
        ),
        Button::new(
            ComponentId::RemoveEmployee,
            "Remove",
            ButtonStyle::Danger,
            !staff.is_empty(),
        ),
    ]))
}

/// Staff manager header.
pub fn staff_embed(project: &Project, staff: &[Employee]) -> CreateEmbed {
    let summary = ProjectSummary {
        title: project.title.clone(),
        poster: project.poster.clone(),
        staff: staff.iter().map(|e| (e.profession, e.user_id)).collect(),
        curator: None,
        platforms: Vec::new(),
    };
    CreateEmbed::new()
        .title(format!("Staff of {}", project.title))
        .description(summary.staff_section())
}

fn profession_options(professions: impl IntoIterator<Item = Profession>) -> SelectKind {
    SelectKind::Strings(
        professions
            .into_iter()
            .map(|p| (p.label().to_string(), p.as_str().to_string()))
            .collect(),
    )
}

/// First step of staff assignment.
pub fn assign_profession_layout() -> Layout {
    Layout::default().row(Row::Select(Select {
        component: ComponentId::AssignEmployeeProfession,
        placeholder: "Choose a profession",
        kind: profession_options(Profession::iter()),
        disabled: false,
    }))
}

/// Second step of staff assignment.
pub fn assign_user_layout() -> Layout {
    Layout::default().row(Row::Select(Select {
        component: ComponentId::AssignEmployeeUser,
        placeholder: "Choose a member",
        kind: SelectKind::Users,
        disabled: false,
    }))
}

/// Staff removal, offering the professions currently staffed.
pub fn remove_profession_layout(offered: &[Profession]) -> Layout {
    Layout::default().row(Row::Select(Select {
        component: ComponentId::RemoveEmployeeProfession,
        placeholder: "Choose a profession to clear",
        kind: profession_options(offered.iter().copied()),
        disabled: false,
    }))
}

/// Destination choice for a first publish.
pub fn publish_channel_layout() -> Layout {
    Layout::default().row(Row::Select(Select {
        component: ComponentId::PublishChannel,
        placeholder: "Choose a channel",
        kind: SelectKind::TextChannels,
        disabled: false,
    }))
}

/// Delete confirmation.
pub fn delete_layout() -> Layout {
    Layout::default().row(Row::Buttons(vec![
        Button::new(
            ComponentId::DeleteConfirm,
            "Delete",
            ButtonStyle::Danger,
            true,
        ),
        Button::new(
            ComponentId::DeleteCancel,
            "Cancel",
            ButtonStyle::Secondary,
            true,
        ),
    ]))
}

/// Super role configuration controls.
pub fn admin_layout() -> Layout {
    Layout::default()
        .row(Row::Select(Select {
            component: ComponentId::AssignSuperRole,
            placeholder: "Choose the super role",
            kind: SelectKind::Roles,
            disabled: false,
        }))
        .row(Row::Buttons(vec![Button::new(
            ComponentId::RemoveSuperRole,
            "Remove super role",
            ButtonStyle::Danger,
            true,
        )]))
}

/// Super role configuration header.
pub fn admin_embed(current: Option<&SuperRole>) -> CreateEmbed {
    let role = current
        .map(|r| format!("<@&{}>", r.role_id))
        .unwrap_or_else(|| "Not configured".to_string());
    CreateEmbed::new()
        .title("Super role")
        .field("Current", role, false)
}

fn input(style: InputTextStyle, label: &str, field: &str, max: u16) -> CreateInputText {
    CreateInputText::new(style, label, field)
        .required(true)
        .max_length(max)
}

/// Modal collecting a new project's title and poster.
pub fn create_project_modal() -> CreateModal {
    CreateModal::new(ModalId::CreateProject.to_string(), "New project").components(vec![
        CreateActionRow::InputText(input(
            InputTextStyle::Short,
            "Title",
            fields::TITLE,
            TITLE_MAX_LENGTH as u16,
        )),
        CreateActionRow::InputText(
            input(
                InputTextStyle::Short,
                "Poster URL",
                fields::POSTER,
                URL_MAX_LENGTH,
            )
            .placeholder("https://"),
        ),
    ])
}

/// Modal adding a platform to a project.
pub fn add_platform_modal(project: ProjectId) -> CreateModal {
    CreateModal::new(ModalId::AddPlatform { project }.to_string(), "Add platform").components(
        vec![
            CreateActionRow::InputText(input(
                InputTextStyle::Short,
                "Name",
                fields::NAME,
                PLATFORM_NAME_MAX_LENGTH as u16,
            )),
            CreateActionRow::InputText(
                input(InputTextStyle::Short, "URL", fields::URL, URL_MAX_LENGTH)
                    .placeholder("https://"),
            ),
        ],
    )
}

/// Modal editing a platform, prefilled with its current values.
pub fn update_platform_modal(platform: &Platform) -> CreateModal {
    let id = ModalId::UpdatePlatform {
        project: platform.project_id,
        platform: platform.id,
    };
    CreateModal::new(id.to_string(), "Edit platform").components(vec![
        CreateActionRow::InputText(
            input(
                InputTextStyle::Short,
                "Name",
                fields::NAME,
                PLATFORM_NAME_MAX_LENGTH as u16,
            )
            .value(&platform.name),
        ),
        CreateActionRow::InputText(
            input(InputTextStyle::Short, "URL", fields::URL, URL_MAX_LENGTH).value(&platform.url),
        ),
    ])
}

/// Reply text for an error.
///
/// Backend failures get [`GENERIC_FAILURE`]; their details only go to the log.
pub fn user_message(err: &KuratorError) -> String {
    match err.kind() {
        KuratorErrorKind::Validation(e) => match &e.kind {
            ValidationErrorKind::DuplicateTitle(title) => format!(
                "A project titled \"{title}\" already exists. Use /update-project to edit it."
            ),
            ValidationErrorKind::NotAnImage(_) => {
                "The poster URL does not point at an image.".to_string()
            }
            kind => kind.to_string(),
        },
        KuratorErrorKind::NotFound(e) => e.kind.to_string(),
        KuratorErrorKind::Limit(e) => format!(
            "This project already has the maximum of {} {}.",
            e.limit, e.kind
        ),
        KuratorErrorKind::BindingReset(e) => format!(
            "The published {} no longer exists, so the publication was reset. \
             Publish again to choose a channel.",
            e.missing
        ),
        KuratorErrorKind::Wizard(_) => {
            "That option is no longer available. Start again from the panel.".to_string()
        }
        KuratorErrorKind::Database(_)
        | KuratorErrorKind::Gateway(_)
        | KuratorErrorKind::Config(_) => GENERIC_FAILURE.to_string(),
    }
}
