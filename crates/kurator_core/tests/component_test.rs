//! Tests for component ids, modal ids and routing tables.

use kurator_core::{
    Actor, Capabilities, Capability, ComponentId, GuildId, ModalId, PlatformId,
    Project, ProjectId, RoleId, Route, RoutingTable, SuperRole, UserId,
};
use strum::IntoEnumIterator;

fn project(curator: Option<UserId>) -> Project {
    Project {
        id: ProjectId(1),
        guild_id: GuildId(10),
        title: "Title".to_string(),
        poster: "https://example.com/p.png".to_string(),
        binding: None,
        curator: curator.map(|user_id| kurator_core::Curator {
            id: kurator_core::CuratorId(1),
            guild_id: GuildId(10),
            user_id,
            project_id: ProjectId(1),
        }),
    }
}

fn super_role() -> SuperRole {
    SuperRole {
        guild_id: GuildId(10),
        role_id: RoleId(99),
    }
}

#[test]
fn test_component_ids_use_wire_values() {
    assert_eq!(ComponentId::AssignCurator.to_string(), "assign-curator-select");
    assert_eq!(ComponentId::DeleteConfirm.as_str(), "project-delete-submit");
    assert_eq!(
        "employee-assign-profession".parse::<ComponentId>().unwrap(),
        ComponentId::AssignEmployeeProfession
    );
    assert!("project-explode".parse::<ComponentId>().is_err());
}

#[test]
fn test_every_component_id_parses_back() {
    for component in ComponentId::iter() {
        assert_eq!(component.as_str().parse::<ComponentId>().unwrap(), component);
    }
}

#[test]
fn test_capability_table() {
    assert_eq!(ComponentId::AssignCurator.required_capability(), Capability::Super);
    assert_eq!(ComponentId::Unlink.required_capability(), Capability::Super);
    assert_eq!(ComponentId::Publish.required_capability(), Capability::Curator);
    assert_eq!(ComponentId::AddPlatform.required_capability(), Capability::Curator);
    assert_eq!(ComponentId::DeleteCancel.required_capability(), Capability::Anyone);
    assert_eq!(ComponentId::AssignSuperRole.required_capability(), Capability::Anyone);
}

#[test]
fn test_routing_table_checks_capability() {
    let table = RoutingTable::from_components([ComponentId::Publish, ComponentId::Delete]);
    let curator = Capabilities::evaluate(
        &Actor::new(GuildId(10), UserId(5), vec![]),
        Some(&super_role()),
        Some(&project(Some(UserId(5)))),
    );

    assert!(table.resolve(ComponentId::Publish, &curator).is_some());
    assert!(table.resolve(ComponentId::Delete, &curator).is_none());
    assert!(table.resolve(ComponentId::Preview, &curator).is_none());
}

#[test]
fn test_routing_table_picks_first_permitted_route() {
    let table = RoutingTable::new()
        .with_route(Route {
            component: ComponentId::Preview,
            capability: Capability::Super,
        })
        .with_route(Route {
            component: ComponentId::Preview,
            capability: Capability::Anyone,
        });

    let route = table
        .resolve(ComponentId::Preview, &Capabilities::none())
        .unwrap();
    assert_eq!(route.capability, Capability::Anyone);
}

#[test]
fn test_evaluate_requires_existing_project() {
    let actor = Actor::new(GuildId(10), UserId(5), vec![RoleId(99)]);
    let caps = Capabilities::evaluate(&actor, Some(&super_role()), None);

    assert!(caps.is_super_user());
    assert!(!Capability::Curator.permits(&caps));
    assert!(!Capability::Super.permits(&caps));
    assert!(Capability::Anyone.permits(&caps));
}

#[test]
fn test_modal_ids_carry_state() {
    let modal = ModalId::UpdatePlatform {
        project: ProjectId(3),
        platform: PlatformId(8),
    };
    assert_eq!(modal.to_string(), "update-platform-modal:3:8");
    assert_eq!("update-platform-modal:3:8".parse::<ModalId>().unwrap(), modal);
    assert_eq!(
        "add-platform-modal:12".parse::<ModalId>().unwrap(),
        ModalId::AddPlatform {
            project: ProjectId(12)
        }
    );
    assert_eq!(
        "create-project-modal".parse::<ModalId>().unwrap(),
        ModalId::CreateProject
    );
    assert_eq!(modal.project(), Some(ProjectId(3)));
    assert_eq!(modal.required_capability(), Capability::Curator);
    assert_eq!(ModalId::CreateProject.required_capability(), Capability::Super);
}

#[test]
fn test_malformed_modal_ids_are_rejected() {
    assert!("add-platform-modal".parse::<ModalId>().is_err());
    assert!("add-platform-modal:abc".parse::<ModalId>().is_err());
    assert!("create-project-modal:1".parse::<ModalId>().is_err());
    assert!("something-else".parse::<ModalId>().is_err());
}

