//! Tests for layouts, embeds, modals and error replies.

use kurator_core::{
    Actor, AssignStaffWizard, Capabilities, ChannelId, ComponentId, Curator, CuratorId,
    DeleteWizard, Employee, EmployeeId, GuildId, MessageId, Platform, PlatformId, Profession,
    Project, ProjectId, ProjectSummary, PublishBinding, PublishWizard, RemoveStaffWizard, RoleId,
    SuperRole, UserId, Wizard,
};
use kurator_discord::views::{self, BotIdentity, GENERIC_FAILURE, Layout, Row};
use kurator_error::{
    BindingPart, BindingResetError, DatabaseError, DatabaseErrorKind, GatewayError, KuratorError,
    LimitError, LimitKind, ValidationError, ValidationErrorKind,
};

const GUILD: GuildId = GuildId(1);
const SUPER: RoleId = RoleId(10);

fn project(curator: Option<u64>, bound: bool) -> Project {
    Project {
        id: ProjectId(7),
        guild_id: GUILD,
        title: "Solo Leveling".to_string(),
        poster: "https://example.com/poster.png".to_string(),
        binding: bound.then_some(PublishBinding {
            channel_id: ChannelId(100),
            message_id: MessageId(200),
            branch_id: ChannelId(300),
        }),
        curator: curator.map(|user| Curator {
            id: CuratorId(1),
            guild_id: GUILD,
            user_id: UserId(user),
            project_id: ProjectId(7),
        }),
    }
}

fn capabilities(project: &Project, user: u64, roles: Vec<RoleId>) -> Capabilities {
    let actor = Actor::new(GUILD, UserId(user), roles);
    let super_role = SuperRole {
        guild_id: GUILD,
        role_id: SUPER,
    };
    Capabilities::evaluate(&actor, Some(&super_role), Some(project))
}

fn platforms(count: usize) -> Vec<Platform> {
    (0..count)
        .map(|i| Platform {
            id: PlatformId(i as i32 + 1),
            project_id: ProjectId(7),
            name: format!("Platform {i}"),
            url: format!("https://platform{i}.example.com/title"),
        })
        .collect()
}

fn staff(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee {
            id: EmployeeId(i as i32 + 1),
            project_id: ProjectId(7),
            user_id: UserId(1000 + i as u64),
            profession: Profession::Translator,
        })
        .collect()
}

fn same_routes(layout: &Layout, wizard: &impl Wizard) {
    let routes = wizard.routes();
    assert_eq!(layout.enabled().len(), routes.len());
    for component in layout.enabled() {
        assert!(routes.contains(component), "{component} not routed");
    }
}

#[test]
fn test_super_user_panel_enables_everything_applicable() {
    let project = project(Some(5), true);
    let caps = capabilities(&project, 2, vec![SUPER]);
    let layout = views::panel_layout(&project, &caps);
    let enabled = layout.enabled();

    for component in [
        ComponentId::AssignCurator,
        ComponentId::RemoveCurator,
        ComponentId::ManageEmployees,
        ComponentId::ManagePlatforms,
        ComponentId::Preview,
        ComponentId::Publish,
        ComponentId::Unlink,
        ComponentId::Delete,
    ] {
        assert!(enabled.contains(&component), "{component} disabled");
    }
    assert_eq!(layout.routes().len(), enabled.len());
}

#[test]
fn test_curator_panel_hides_super_actions() {
    let project = project(Some(5), true);
    let caps = capabilities(&project, 5, vec![]);
    let enabled = views::panel_layout(&project, &caps).enabled();

    assert!(enabled.contains(&ComponentId::Publish));
    assert!(enabled.contains(&ComponentId::ManagePlatforms));
    assert!(!enabled.contains(&ComponentId::AssignCurator));
    assert!(!enabled.contains(&ComponentId::Unlink));
    assert!(!enabled.contains(&ComponentId::Delete));
}

#[test]
fn test_outsider_panel_routes_nothing() {
    let project = project(Some(5), false);
    let caps = capabilities(&project, 9, vec![]);
    let layout = views::panel_layout(&project, &caps);

    assert!(layout.enabled().is_empty());
    assert!(layout.routes().is_empty());
}

fn publish_label(layout: &Layout) -> &'static str {
    layout
        .rows()
        .iter()
        .find_map(|row| match row {
            Row::Buttons(buttons) => buttons
                .iter()
                .find(|button| button.component == ComponentId::Publish)
                .map(|button| button.label),
            Row::Select(_) => None,
        })
        .unwrap()
}

#[test]
fn test_publish_button_reads_update_once_published() {
    let unpublished = project(Some(5), false);
    let caps = capabilities(&unpublished, 5, vec![]);
    assert_eq!(publish_label(&views::panel_layout(&unpublished, &caps)), "Publish");

    let published = project(Some(5), true);
    let caps = capabilities(&published, 5, vec![]);
    assert_eq!(publish_label(&views::panel_layout(&published, &caps)), "Update");
}

#[test]
fn test_panel_disables_actions_without_target() {
    let project = project(None, false);
    let caps = capabilities(&project, 2, vec![SUPER]);
    let enabled = views::panel_layout(&project, &caps).enabled();

    assert!(!enabled.contains(&ComponentId::RemoveCurator));
    assert!(!enabled.contains(&ComponentId::Unlink));
    assert!(enabled.contains(&ComponentId::AssignCurator));
}

#[test]
fn test_platform_layout_without_platforms_only_adds() {
    let layout = views::platform_layout(&[]);
    assert_eq!(layout.enabled(), vec![ComponentId::AddPlatform]);
    assert_eq!(layout.rows().len(), 1);
}

#[test]
fn test_platform_layout_disables_add_at_limit() {
    let layout = views::platform_layout(&platforms(23));
    assert!(layout.enabled().contains(&ComponentId::AddPlatform));

    let layout = views::platform_layout(&platforms(24));
    let enabled = layout.enabled();
    assert!(!enabled.contains(&ComponentId::AddPlatform));
    assert!(enabled.contains(&ComponentId::UpdatePlatform));
    assert!(enabled.contains(&ComponentId::RemovePlatform));
}

#[test]
fn test_staff_layout_follows_staff_count() {
    let enabled = views::staff_layout(&[]).enabled();
    assert_eq!(enabled, vec![ComponentId::AssignEmployee]);

    let enabled = views::staff_layout(&staff(3)).enabled();
    assert!(enabled.contains(&ComponentId::AssignEmployee));
    assert!(enabled.contains(&ComponentId::RemoveEmployee));

    let enabled = views::staff_layout(&staff(25)).enabled();
    assert_eq!(enabled, vec![ComponentId::RemoveEmployee]);
}

#[test]
fn test_wizard_layouts_match_wizard_routes() {
    same_routes(&views::assign_profession_layout(), &AssignStaffWizard::new());
    same_routes(
        &views::remove_profession_layout(&[Profession::Editor]),
        &RemoveStaffWizard::new(vec![Profession::Editor]),
    );
    same_routes(&views::publish_channel_layout(), &PublishWizard::new());
    same_routes(&views::delete_layout(), &DeleteWizard::new());
}

#[test]
fn test_admin_layout_routes_role_controls() {
    let routes = views::admin_layout().routes();
    assert!(routes.contains(ComponentId::AssignSuperRole));
    assert!(routes.contains(ComponentId::RemoveSuperRole));
    assert_eq!(routes.len(), 2);
}

#[test]
fn test_summary_embed_sections() {
    let summary = ProjectSummary {
        title: "Solo Leveling".to_string(),
        poster: "https://example.com/poster.png".to_string(),
        staff: vec![(Profession::Editor, UserId(5))],
        curator: Some(UserId(6)),
        platforms: Vec::new(),
    };
    let identity = BotIdentity {
        name: "Kurator".to_string(),
        avatar: None,
    };
    let json = serde_json::to_value(views::summary_embed(&summary, Some(&identity))).unwrap();

    assert_eq!(json["description"], "> Solo Leveling");
    assert_eq!(json["image"]["url"], "https://example.com/poster.png");
    assert_eq!(json["fields"][0]["name"], "Staff");
    assert_eq!(json["fields"][0]["value"], "`Editor`: <@5>\n`Curator`: <@6>");
    assert_eq!(json["fields"][1]["name"], "Platforms");
    assert_eq!(json["fields"][1]["value"], "None");
    assert_eq!(json["footer"]["text"], "Kurator");
}

#[test]
fn test_modal_custom_ids() {
    let json = serde_json::to_value(views::create_project_modal()).unwrap();
    assert_eq!(json["custom_id"], "create-project-modal");

    let json = serde_json::to_value(views::add_platform_modal(ProjectId(7))).unwrap();
    assert_eq!(json["custom_id"], "add-platform-modal:7");

    let platform = &platforms(1)[0];
    let json = serde_json::to_value(views::update_platform_modal(platform)).unwrap();
    assert_eq!(json["custom_id"], "update-platform-modal:7:1");
}

#[test]
fn test_message_link() {
    let project = project(None, true);
    let binding = project.binding.unwrap();
    assert_eq!(
        views::message_link(GUILD, &binding),
        "https://discord.com/channels/1/100/200"
    );
}

#[test]
fn test_user_message_for_recoverable_errors() {
    let err: KuratorError =
        ValidationError::new(ValidationErrorKind::DuplicateTitle("Solo Leveling".into())).into();
    assert!(views::user_message(&err).contains("/update-project"));

    let err: KuratorError = LimitError::new(LimitKind::Platforms, 25).into();
    assert!(views::user_message(&err).contains("25 platforms"));

    let err: KuratorError = BindingResetError::new(7, BindingPart::Message).into();
    assert!(views::user_message(&err).contains("message"));
}

#[test]
fn test_user_message_hides_backend_failures() {
    let err: KuratorError =
        DatabaseError::new(DatabaseErrorKind::Connection("refused".into())).into();
    assert_eq!(views::user_message(&err), GENERIC_FAILURE);

    let err: KuratorError = GatewayError::new("502 Bad Gateway").into();
    assert_eq!(views::user_message(&err), GENERIC_FAILURE);
}
