//! Permission resolution for project actions.
//!
//! Every interaction recomputes capabilities from current state; nothing here
//! is cached.

use crate::{GuildId, Project, ProjectId, ProjectStore, RoleId, SuperRole, UserId};
use kurator_error::KuratorResult;
use std::sync::Arc;
use tracing::instrument;

/// The user performing an action, as seen from one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Guild the interaction happened in
    pub guild_id: GuildId,
    /// Acting user
    pub user_id: UserId,
    /// Roles the user holds in that guild
    pub role_ids: Vec<RoleId>,
}

impl Actor {
    /// Create an actor.
    pub fn new(guild_id: GuildId, user_id: UserId, role_ids: impl Into<Vec<RoleId>>) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids: role_ids.into(),
        }
    }

    /// Whether the actor holds the role.
    pub fn has_role(&self, role: RoleId) -> bool {
        self.role_ids.contains(&role)
    }
}

/// What an actor may do with one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    project_exists: bool,
    is_super_user: bool,
    is_curator: bool,
}

impl Capabilities {
    /// No rights at all.
    pub const fn none() -> Self {
        Self {
            project_exists: false,
            is_super_user: false,
            is_curator: false,
        }
    }

    /// Evaluate capabilities from already loaded state.
    ///
    /// A project from another guild than the actor's counts as absent.
    pub fn evaluate(
        actor: &Actor,
        super_role: Option<&SuperRole>,
        project: Option<&Project>,
    ) -> Self {
        let is_super_user = super_role
            .is_some_and(|role| role.guild_id == actor.guild_id && actor.has_role(role.role_id));
        let project = project.filter(|p| p.guild_id == actor.guild_id);
        Self {
            project_exists: project.is_some(),
            is_super_user,
            is_curator: project.is_some_and(|p| p.is_curated_by(actor.user_id)),
        }
    }

    /// The target project exists in the actor's guild.
    pub const fn project_exists(&self) -> bool {
        self.project_exists
    }

    /// The actor holds the guild's super role.
    pub const fn is_super_user(&self) -> bool {
        self.is_super_user
    }

    /// The actor is the project's curator.
    pub const fn is_curator(&self) -> bool {
        self.is_curator
    }

    /// Curator-level actions are allowed.
    pub const fn can_act_curator(&self) -> bool {
        self.project_exists && (self.is_super_user || self.is_curator)
    }

    /// Super-user actions on the project are allowed.
    pub const fn can_act_super(&self) -> bool {
        self.project_exists && self.is_super_user
    }
}

/// Computes [`Capabilities`] against the store.
#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn ProjectStore>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish_non_exhaustive()
    }
}

impl PermissionResolver {
    /// Create a resolver reading from the given store.
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Capabilities of `actor` on `project`.
    ///
    /// An unconfigured super role means nobody is a super user.
    #[instrument(skip(self), fields(guild_id = %actor.guild_id, user_id = %actor.user_id))]
    pub async fn resolve(&self, actor: &Actor, project: ProjectId) -> KuratorResult<Capabilities> {
        let super_role = self.store.super_role(actor.guild_id).await?;
        let project = self.store.project(project).await?;
        let capabilities = Capabilities::evaluate(actor, super_role.as_ref(), project.as_ref());
        tracing::debug!(?capabilities, "Resolved capabilities");
        Ok(capabilities)
    }

    /// Capabilities for actions that do not target a project yet.
    ///
    /// Only `is_super_user` is meaningful; project-scoped checks are false.
    #[instrument(skip(self), fields(guild_id = %actor.guild_id, user_id = %actor.user_id))]
    pub async fn resolve_guild(&self, actor: &Actor) -> KuratorResult<Capabilities> {
        let super_role = self.store.super_role(actor.guild_id).await?;
        Ok(Capabilities::evaluate(actor, super_role.as_ref(), None))
    }
}
