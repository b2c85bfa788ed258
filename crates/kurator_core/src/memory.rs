//! In-memory implementation of [`ProjectStore`] for tests and local runs.
//!
//! All tables live behind a single lock so that operations touching several
//! records (curator replacement, cascading deletes) are applied atomically.

use crate::{
    Curator, CuratorId, Employee, EmployeeId, GuildId, MessageId, NewProject, Platform,
    PlatformId, Profession, Project, ProjectId, ProjectStore, PublishBinding, RoleId, SuperRole,
    UserId, same_name,
};
use async_trait::async_trait;
use kurator_error::{KuratorResult, NotFoundError, NotFoundErrorKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory project store.
///
/// All data is lost when the store is dropped. Clones share the same tables.
///
/// # Example
/// ```no_run
/// use kurator_core::{GuildId, InMemoryProjectStore, ProjectStore, RoleId};
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryProjectStore::new();
///     store.upsert_super_role(GuildId(1), RoleId(2)).await.unwrap();
///     assert!(store.super_role(GuildId(1)).await.unwrap().is_some());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    super_roles: HashMap<GuildId, SuperRole>,
    projects: BTreeMap<ProjectId, StoredProject>,
    curators: BTreeMap<CuratorId, Curator>,
    employees: BTreeMap<EmployeeId, Employee>,
    platforms: BTreeMap<PlatformId, Platform>,
    next_id: i32,
}

#[derive(Debug, Clone)]
struct StoredProject {
    guild_id: GuildId,
    title: String,
    poster: String,
    binding: Option<PublishBinding>,
    curator_id: Option<CuratorId>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn load(&self, id: ProjectId) -> Option<Project> {
        self.projects.get(&id).map(|stored| Project {
            id,
            guild_id: stored.guild_id,
            title: stored.title.clone(),
            poster: stored.poster.clone(),
            binding: stored.binding,
            curator: stored
                .curator_id
                .and_then(|curator| self.curators.get(&curator).cloned()),
        })
    }

    fn require(&self, id: ProjectId) -> KuratorResult<Project> {
        self.load(id)
            .ok_or_else(|| NotFoundError::new(NotFoundErrorKind::Project(id.get())).into())
    }

    fn stored_mut(&mut self, id: ProjectId) -> KuratorResult<&mut StoredProject> {
        self.projects
            .get_mut(&id)
            .ok_or_else(|| NotFoundError::new(NotFoundErrorKind::Project(id.get())).into())
    }
}

impl InMemoryProjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of curator rows (for testing).
    pub async fn curator_count(&self) -> usize {
        self.tables.read().await.curators.len()
    }

    /// Number of stored projects (for testing).
    pub async fn project_count(&self) -> usize {
        self.tables.read().await.projects.len()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn super_role(&self, guild: GuildId) -> KuratorResult<Option<SuperRole>> {
        Ok(self.tables.read().await.super_roles.get(&guild).copied())
    }

    async fn upsert_super_role(&self, guild: GuildId, role: RoleId) -> KuratorResult<SuperRole> {
        let super_role = SuperRole {
            guild_id: guild,
            role_id: role,
        };
        self.tables
            .write()
            .await
            .super_roles
            .insert(guild, super_role);
        Ok(super_role)
    }

    async fn delete_super_role(&self, guild: GuildId) -> KuratorResult<bool> {
        Ok(self.tables.write().await.super_roles.remove(&guild).is_some())
    }

    async fn create_project(&self, project: NewProject) -> KuratorResult<Project> {
        let mut tables = self.tables.write().await;
        let id = ProjectId(tables.next_id());
        tables.projects.insert(
            id,
            StoredProject {
                guild_id: project.guild_id,
                title: project.title,
                poster: project.poster,
                binding: None,
                curator_id: None,
            },
        );
        tables.require(id)
    }

    async fn project(&self, id: ProjectId) -> KuratorResult<Option<Project>> {
        Ok(self.tables.read().await.load(id))
    }

    async fn project_by_title(
        &self,
        guild: GuildId,
        title: &str,
    ) -> KuratorResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .find(|(_, p)| p.guild_id == guild && same_name(&p.title, title))
            .and_then(|(id, _)| tables.load(*id)))
    }

    async fn project_by_message(&self, message: MessageId) -> KuratorResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .find(|(_, p)| p.binding.is_some_and(|b| b.message_id == message))
            .and_then(|(id, _)| tables.load(*id)))
    }

    async fn search_projects(
        &self,
        guild: GuildId,
        fragment: &str,
        limit: usize,
    ) -> KuratorResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let needle = fragment.trim().to_lowercase();
        let mut found: Vec<Project> = tables
            .projects
            .iter()
            .filter(|(_, p)| p.guild_id == guild && p.title.to_lowercase().contains(&needle))
            .filter_map(|(id, _)| tables.load(*id))
            .collect();
        found.sort_by(|a, b| a.title.cmp(&b.title));
        found.truncate(limit);
        Ok(found)
    }

    async fn delete_project(&self, id: ProjectId) -> KuratorResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.projects.remove(&id) else {
            return Ok(false);
        };
        if let Some(curator) = stored.curator_id {
            tables.curators.remove(&curator);
        }
        tables.employees.retain(|_, e| e.project_id != id);
        tables.platforms.retain(|_, p| p.project_id != id);
        Ok(true)
    }

    async fn set_binding(
        &self,
        id: ProjectId,
        binding: Option<PublishBinding>,
    ) -> KuratorResult<Project> {
        let mut tables = self.tables.write().await;
        tables.stored_mut(id)?.binding = binding;
        tables.require(id)
    }

    async fn unlink_message(&self, message: MessageId) -> KuratorResult<usize> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        for stored in tables.projects.values_mut() {
            if stored.binding.is_some_and(|b| b.message_id == message) {
                stored.binding = None;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn assign_curator(&self, id: ProjectId, user: UserId) -> KuratorResult<Project> {
        let mut tables = self.tables.write().await;
        let stored = tables.stored_mut(id)?;
        let guild_id = stored.guild_id;
        let previous = stored.curator_id.take();
        if let Some(previous) = previous {
            tables.curators.remove(&previous);
        }
        let curator_id = CuratorId(tables.next_id());
        tables.curators.insert(
            curator_id,
            Curator {
                id: curator_id,
                guild_id,
                user_id: user,
                project_id: id,
            },
        );
        tables.stored_mut(id)?.curator_id = Some(curator_id);
        tables.require(id)
    }

    async fn detach_curator(&self, id: ProjectId) -> KuratorResult<Project> {
        let mut tables = self.tables.write().await;
        if let Some(curator) = tables.stored_mut(id)?.curator_id.take() {
            tables.curators.remove(&curator);
        }
        tables.require(id)
    }

    async fn employees(&self, id: ProjectId) -> KuratorResult<Vec<Employee>> {
        Ok(self
            .tables
            .read()
            .await
            .employees
            .values()
            .filter(|e| e.project_id == id)
            .cloned()
            .collect())
    }

    async fn upsert_employee(
        &self,
        id: ProjectId,
        user: UserId,
        profession: Profession,
    ) -> KuratorResult<Employee> {
        let mut tables = self.tables.write().await;
        tables.require(id)?;
        if let Some(existing) = tables
            .employees
            .values()
            .find(|e| e.project_id == id && e.user_id == user && e.profession == profession)
        {
            return Ok(existing.clone());
        }
        let employee = Employee {
            id: EmployeeId(tables.next_id()),
            project_id: id,
            user_id: user,
            profession,
        };
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete_employees(
        &self,
        id: ProjectId,
        profession: Profession,
    ) -> KuratorResult<usize> {
        let mut tables = self.tables.write().await;
        let before = tables.employees.len();
        tables
            .employees
            .retain(|_, e| !(e.project_id == id && e.profession == profession));
        Ok(before - tables.employees.len())
    }

    async fn platforms(&self, id: ProjectId) -> KuratorResult<Vec<Platform>> {
        Ok(self
            .tables
            .read()
            .await
            .platforms
            .values()
            .filter(|p| p.project_id == id)
            .cloned()
            .collect())
    }

    async fn platform(&self, id: PlatformId) -> KuratorResult<Option<Platform>> {
        Ok(self.tables.read().await.platforms.get(&id).cloned())
    }

    async fn platform_by_name(
        &self,
        id: ProjectId,
        name: &str,
    ) -> KuratorResult<Option<Platform>> {
        Ok(self
            .tables
            .read()
            .await
            .platforms
            .values()
            .find(|p| p.project_id == id && same_name(&p.name, name))
            .cloned())
    }

    async fn create_platform(
        &self,
        id: ProjectId,
        name: &str,
        url: &str,
    ) -> KuratorResult<Platform> {
        let mut tables = self.tables.write().await;
        tables.require(id)?;
        let platform = Platform {
            id: PlatformId(tables.next_id()),
            project_id: id,
            name: name.to_string(),
            url: url.to_string(),
        };
        tables.platforms.insert(platform.id, platform.clone());
        Ok(platform)
    }

    async fn update_platform(
        &self,
        id: PlatformId,
        name: &str,
        url: &str,
    ) -> KuratorResult<Platform> {
        let mut tables = self.tables.write().await;
        let platform = tables
            .platforms
            .get_mut(&id)
            .ok_or_else(|| NotFoundError::new(NotFoundErrorKind::Platform(id.get())))?;
        platform.name = name.to_string();
        platform.url = url.to_string();
        Ok(platform.clone())
    }

    async fn delete_platform(&self, id: PlatformId) -> KuratorResult<bool> {
        Ok(self.tables.write().await.platforms.remove(&id).is_some())
    }
}
