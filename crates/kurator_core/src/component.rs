//! Component and modal identifiers, and the routing table that gates them.

use crate::{Capabilities, PlatformId, ProjectId};
use kurator_error::{KuratorResult, ValidationError, ValidationErrorKind};
use std::str::FromStr;

/// Requirement an actor must satisfy to trigger a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Capability {
    /// No check beyond reaching the message
    Anyone,
    /// Curator of the project, or a super user
    Curator,
    /// Super user, with the project present
    Super,
}

impl Capability {
    /// Whether the capabilities satisfy this requirement.
    pub fn permits(self, capabilities: &Capabilities) -> bool {
        match self {
            Capability::Anyone => true,
            Capability::Curator => capabilities.can_act_curator(),
            Capability::Super => capabilities.can_act_super(),
        }
    }
}

/// Custom id of every interactive component the bot renders.
///
/// The string form is the wire value sent to and received from Discord.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum ComponentId {
    /// User select choosing the curator
    #[strum(serialize = "assign-curator-select")]
    AssignCurator,
    /// Button detaching the curator
    #[strum(serialize = "curator-remove")]
    RemoveCurator,
    /// Button opening the staff manager
    #[strum(serialize = "manage-employees")]
    ManageEmployees,
    /// Button opening the platform manager
    #[strum(serialize = "platform-manage")]
    ManagePlatforms,
    /// Button rendering the summary privately
    #[strum(serialize = "project-preview")]
    Preview,
    /// Button publishing or refreshing the summary
    #[strum(serialize = "project-publish")]
    Publish,
    /// Button clearing the publish binding
    #[strum(serialize = "project-unlink")]
    Unlink,
    /// Button opening the delete confirmation
    #[strum(serialize = "project-delete")]
    Delete,
    /// Confirmation button
    #[strum(serialize = "project-delete-submit")]
    DeleteConfirm,
    /// Cancel button
    #[strum(serialize = "project-delete-cancel")]
    DeleteCancel,
    /// Channel select choosing where to publish
    #[strum(serialize = "project-publish-channel")]
    PublishChannel,
    /// Button opening the add-platform modal
    #[strum(serialize = "add-platform-button")]
    AddPlatform,
    /// Select choosing a platform to edit
    #[strum(serialize = "update-platform-select")]
    UpdatePlatform,
    /// Select choosing a platform to remove
    #[strum(serialize = "remove-platform-select")]
    RemovePlatform,
    /// Button starting the staff assignment wizard
    #[strum(serialize = "employee-assign")]
    AssignEmployee,
    /// Profession select of the assignment wizard
    #[strum(serialize = "employee-assign-profession")]
    AssignEmployeeProfession,
    /// User select of the assignment wizard
    #[strum(serialize = "employee-assign-user")]
    AssignEmployeeUser,
    /// Button starting the staff removal wizard
    #[strum(serialize = "employee-delete")]
    RemoveEmployee,
    /// Profession select of the removal wizard
    #[strum(serialize = "employee-delete-profession")]
    RemoveEmployeeProfession,
    /// Role select configuring the super role
    #[strum(serialize = "admin-super-role-select")]
    AssignSuperRole,
    /// Button removing the super role
    #[strum(serialize = "admin-super-role-remove")]
    RemoveSuperRole,
}

impl ComponentId {
    /// Capability required to trigger the component.
    ///
    /// The admin components only appear behind a command restricted to
    /// guild administrators.
    pub const fn required_capability(self) -> Capability {
        match self {
            ComponentId::AssignCurator
            | ComponentId::RemoveCurator
            | ComponentId::Unlink
            | ComponentId::Delete
            | ComponentId::DeleteConfirm => Capability::Super,
            ComponentId::ManageEmployees
            | ComponentId::ManagePlatforms
            | ComponentId::Preview
            | ComponentId::Publish
            | ComponentId::PublishChannel
            | ComponentId::AddPlatform
            | ComponentId::UpdatePlatform
            | ComponentId::RemovePlatform
            | ComponentId::AssignEmployee
            | ComponentId::AssignEmployeeProfession
            | ComponentId::AssignEmployeeUser
            | ComponentId::RemoveEmployee
            | ComponentId::RemoveEmployeeProfession => Capability::Curator,
            ComponentId::DeleteCancel
            | ComponentId::AssignSuperRole
            | ComponentId::RemoveSuperRole => Capability::Anyone,
        }
    }

    /// Wire value of the id.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One entry of a [`RoutingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    /// Component handled by this entry
    pub component: ComponentId,
    /// Requirement checked before dispatch
    pub capability: Capability,
}

impl From<ComponentId> for Route {
    fn from(component: ComponentId) -> Self {
        Self {
            component,
            capability: component.required_capability(),
        }
    }
}

/// Ordered set of components a rendered message currently accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Empty table; a collector with an empty table accepts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with one entry per component, using each component's required capability.
    pub fn from_components(components: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            routes: components.into_iter().map(Route::from).collect(),
        }
    }

    /// Append a component with its required capability.
    pub fn with(mut self, component: ComponentId) -> Self {
        self.routes.push(component.into());
        self
    }

    /// Append an explicit route.
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// First route for `component` whose capability is satisfied.
    pub fn resolve(&self, component: ComponentId, capabilities: &Capabilities) -> Option<Route> {
        self.routes
            .iter()
            .find(|route| route.component == component && route.capability.permits(capabilities))
            .copied()
    }

    /// Whether the table has any entry for `component`.
    pub fn contains(&self, component: ComponentId) -> bool {
        self.routes.iter().any(|route| route.component == component)
    }

    /// Entries in order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.routes.clear();
    }
}

/// Custom id of a modal, carrying the state the submission needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    /// New project form
    CreateProject,
    /// New platform form for a project
    AddPlatform {
        /// Target project
        project: ProjectId,
    },
    /// Edit form for one platform of a project
    UpdatePlatform {
        /// Target project
        project: ProjectId,
        /// Platform being edited
        platform: PlatformId,
    },
}

const CREATE_PROJECT_MODAL: &str = "create-project-modal";
const ADD_PLATFORM_MODAL: &str = "add-platform-modal";
const UPDATE_PLATFORM_MODAL: &str = "update-platform-modal";

impl ModalId {
    /// Capability required to submit the modal.
    ///
    /// Project creation has no target project; it is checked against the
    /// super role alone.
    pub const fn required_capability(self) -> Capability {
        match self {
            ModalId::CreateProject => Capability::Super,
            ModalId::AddPlatform { .. } | ModalId::UpdatePlatform { .. } => Capability::Curator,
        }
    }

    /// Project targeted by the modal, if any.
    pub const fn project(self) -> Option<ProjectId> {
        match self {
            ModalId::CreateProject => None,
            ModalId::AddPlatform { project } | ModalId::UpdatePlatform { project, .. } => {
                Some(project)
            }
        }
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModalId::CreateProject => f.write_str(CREATE_PROJECT_MODAL),
            ModalId::AddPlatform { project } => write!(f, "{ADD_PLATFORM_MODAL}:{project}"),
            ModalId::UpdatePlatform { project, platform } => {
                write!(f, "{UPDATE_PLATFORM_MODAL}:{project}:{platform}")
            }
        }
    }
}

fn parse_record(raw: &str) -> KuratorResult<i32> {
    raw.parse()
        .map_err(|_| ValidationError::new(ValidationErrorKind::NotANumber(raw.to_string())).into())
}

impl FromStr for ModalId {
    type Err = kurator_error::KuratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();
        match (name, rest.as_slice()) {
            (CREATE_PROJECT_MODAL, []) => Ok(ModalId::CreateProject),
            (ADD_PLATFORM_MODAL, [project]) => Ok(ModalId::AddPlatform {
                project: ProjectId(parse_record(project)?),
            }),
            (UPDATE_PLATFORM_MODAL, [project, platform]) => Ok(ModalId::UpdatePlatform {
                project: ProjectId(parse_record(project)?),
                platform: PlatformId(parse_record(platform)?),
            }),
            _ => Err(ValidationError::new(ValidationErrorKind::UnknownModal(s.to_string())).into()),
        }
    }
}
