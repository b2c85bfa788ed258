//! Persistence interface for projects and their related records.

use crate::{
    Employee, GuildId, MessageId, NewProject, Platform, PlatformId, Profession,
    Project, ProjectId, PublishBinding, RoleId, SuperRole, UserId,
};
use async_trait::async_trait;
use kurator_error::KuratorResult;

/// Storage backend for the bot's records.
///
/// Implementations must keep the related-record invariants: a project has at
/// most one curator, a guild at most one super role, and deleting a project
/// removes its curator, staff and platforms.
///
/// Each call is a single create/read/update/delete unit; calls that touch
/// more than one record ([`assign_curator`](Self::assign_curator),
/// [`detach_curator`](Self::detach_curator), [`delete_project`](Self::delete_project))
/// are atomic.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Super role configured for the guild.
    async fn super_role(&self, guild: GuildId) -> KuratorResult<Option<SuperRole>>;

    /// Insert or replace the guild's super role.
    async fn upsert_super_role(&self, guild: GuildId, role: RoleId) -> KuratorResult<SuperRole>;

    /// Remove the guild's super role. Returns whether one existed.
    async fn delete_super_role(&self, guild: GuildId) -> KuratorResult<bool>;

    /// Insert a new project without binding or curator.
    async fn create_project(&self, project: NewProject) -> KuratorResult<Project>;

    /// Load a project with its curator.
    async fn project(&self, id: ProjectId) -> KuratorResult<Option<Project>>;

    /// Find a project in the guild by title, ignoring case and surrounding whitespace.
    async fn project_by_title(&self, guild: GuildId, title: &str)
    -> KuratorResult<Option<Project>>;

    /// Find the project whose summary is the given message.
    async fn project_by_message(&self, message: MessageId) -> KuratorResult<Option<Project>>;

    /// Projects of a guild whose title contains `fragment` (case-insensitive),
    /// ordered by title, at most `limit` entries.
    async fn search_projects(
        &self,
        guild: GuildId,
        fragment: &str,
        limit: usize,
    ) -> KuratorResult<Vec<Project>>;

    /// Delete a project and everything attached to it. Returns whether it existed.
    async fn delete_project(&self, id: ProjectId) -> KuratorResult<bool>;

    /// Replace (or clear) the publish binding.
    async fn set_binding(
        &self,
        id: ProjectId,
        binding: Option<PublishBinding>,
    ) -> KuratorResult<Project>;

    /// Clear the binding of every project published as `message`.
    /// Returns the number of projects affected.
    async fn unlink_message(&self, message: MessageId) -> KuratorResult<usize>;

    /// Bind `user` as the project's curator, replacing any previous curator.
    async fn assign_curator(&self, id: ProjectId, user: UserId) -> KuratorResult<Project>;

    /// Detach and delete the project's curator. Returns the updated project.
    async fn detach_curator(&self, id: ProjectId) -> KuratorResult<Project>;

    /// Staff of a project ordered by record id.
    async fn employees(&self, id: ProjectId) -> KuratorResult<Vec<Employee>>;

    /// Insert the `(project, user, profession)` row unless it exists.
    async fn upsert_employee(
        &self,
        id: ProjectId,
        user: UserId,
        profession: Profession,
    ) -> KuratorResult<Employee>;

    /// Delete every staff row of that profession. Returns the number of rows removed.
    async fn delete_employees(&self, id: ProjectId, profession: Profession)
    -> KuratorResult<usize>;

    /// Platforms of a project ordered by record id.
    async fn platforms(&self, id: ProjectId) -> KuratorResult<Vec<Platform>>;

    /// Load one platform.
    async fn platform(&self, id: PlatformId) -> KuratorResult<Option<Platform>>;

    /// Find a platform of the project by name, ignoring case.
    async fn platform_by_name(&self, id: ProjectId, name: &str)
    -> KuratorResult<Option<Platform>>;

    /// Insert a platform.
    async fn create_platform(&self, id: ProjectId, name: &str, url: &str)
    -> KuratorResult<Platform>;

    /// Rename a platform and replace its URL.
    async fn update_platform(&self, id: PlatformId, name: &str, url: &str)
    -> KuratorResult<Platform>;

    /// Delete a platform. Returns whether it existed.
    async fn delete_platform(&self, id: PlatformId) -> KuratorResult<bool>;
}

