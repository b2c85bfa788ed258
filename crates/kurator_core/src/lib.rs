//! Domain core of the Kurator bot.
//!
//! This crate holds everything that does not talk to Discord or PostgreSQL
//! directly:
//!
//! - typed identifiers and the persisted records ([`Project`], [`Curator`],
//!   [`Employee`], [`Platform`], [`SuperRole`])
//! - the [`ProjectStore`] persistence trait and an [`InMemoryProjectStore`]
//! - the [`PermissionResolver`] computing [`Capabilities`] per interaction
//! - component ids, the [`RoutingTable`] and the scoped [`Collector`]
//! - wizards for multi-step interactions
//! - services for projects, platforms, staff, publishing and the super role
//!
//! # Example
//!
//! ```no_run
//! use kurator_core::{Actor, GuildId, InMemoryProjectStore, PermissionResolver, ProjectId, UserId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> kurator_error::KuratorResult<()> {
//!     let resolver = PermissionResolver::new(Arc::new(InMemoryProjectStore::new()));
//!     let actor = Actor::new(GuildId(1), UserId(2), vec![]);
//!     let capabilities = resolver.resolve(&actor, ProjectId(3)).await?;
//!     assert!(!capabilities.can_act_curator());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod admin;
mod collector;
mod component;
mod ids;
mod memory;
mod model;
mod permissions;
mod platforms;
mod projects;
mod publish;
mod staff;
mod store;
mod validation;
mod wizard;

pub use admin::SuperRoleService;
pub use collector::{
    CollectedEvent, Collector, CollectorExit, DEFAULT_COLLECTOR_TTL, Dispatch, Flow,
    SelectedUser, Selection,
};
pub use component::{Capability, ComponentId, ModalId, Route, RoutingTable};
pub use ids::{
    ChannelId, CuratorId, EmployeeId, GuildId, MessageId, PlatformId, ProjectId, RoleId, UserId,
};
pub use memory::InMemoryProjectStore;
pub use model::{
    Curator, EMPLOYEE_LIMIT, Employee, NewProject, PLATFORM_LIMIT, PLATFORM_NAME_MAX_LENGTH,
    Platform, Profession, Project, PublishBinding, SuperRole, THREAD_NAME, TITLE_MAX_LENGTH,
    same_name,
};
pub use permissions::{Actor, Capabilities, PermissionResolver};
pub use platforms::{PlatformService, accepts_platform};
pub use projects::{AUTOCOMPLETE_LIMIT, ProjectService};
pub use publish::{EMPTY_SECTION, ProjectSummary, PublishGateway, PublishOutcome, Publisher};
pub use staff::{StaffService, accepts_employee};
pub use store::ProjectStore;
pub use validation::{
    HttpImageProbe, IMAGE_PROBE_TIMEOUT, ImageProbe, is_url, validate_image_url,
    validate_platform_name, validate_title, validate_url,
};
pub use wizard::{
    AssignStaffState, AssignStaffWizard, DeleteState, DeleteWizard, PublishState, PublishWizard,
    RemoveStaffState, RemoveStaffWizard, Wizard,
};
