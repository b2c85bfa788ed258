//! Project lifecycle and curator management.

use crate::{
    GuildId, ImageProbe, MessageId, NewProject, Project, ProjectId, ProjectStore, SelectedUser,
    validate_image_url, validate_title,
};
use kurator_error::{
    KuratorResult, NotFoundError, NotFoundErrorKind, ValidationError, ValidationErrorKind,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Most autocomplete choices Discord accepts.
pub const AUTOCOMPLETE_LIMIT: usize = 25;

/// Creates, finds and deletes projects and manages their curator.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
    probe: Arc<dyn ImageProbe>,
}

impl ProjectService {
    /// Service over a store, probing posters with `probe`.
    pub fn new(store: Arc<dyn ProjectStore>, probe: Arc<dyn ImageProbe>) -> Self {
        Self { store, probe }
    }

    /// Validate and create a project.
    ///
    /// Rejects empty or overlong titles, posters that are not images, and
    /// titles already used in the guild (ignoring case).
    #[instrument(skip(self, poster), fields(guild_id = %guild))]
    pub async fn create(
        &self,
        guild: GuildId,
        title: &str,
        poster: &str,
    ) -> KuratorResult<Project> {
        let title = validate_title(title)?;
        let poster = validate_image_url(self.probe.as_ref(), poster).await?;

        if self.store.project_by_title(guild, &title).await?.is_some() {
            Err(ValidationError::new(ValidationErrorKind::DuplicateTitle(title.clone())))?
        }

        let project = self
            .store
            .create_project(NewProject {
                guild_id: guild,
                title,
                poster,
            })
            .await?;
        info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Project in the guild, or not found.
    pub async fn require(&self, guild: GuildId, id: ProjectId) -> KuratorResult<Project> {
        match self.store.project(id).await? {
            Some(project) if project.guild_id == guild => Ok(project),
            _ => Err(NotFoundError::new(NotFoundErrorKind::Project(id.get())).into()),
        }
    }

    /// Find a project by numeric id or exact title.
    ///
    /// Numeric input is an id. Other input is matched against titles ignoring
    /// case; when no title matches the input is rejected as not a number.
    #[instrument(skip(self), fields(guild_id = %guild))]
    pub async fn find(&self, guild: GuildId, search: &str) -> KuratorResult<Project> {
        let search = search.trim();
        if let Ok(id) = search.parse::<i32>() {
            return self.require(guild, ProjectId(id)).await;
        }
        self.store
            .project_by_title(guild, search)
            .await?
            .ok_or_else(|| {
                ValidationError::new(ValidationErrorKind::NotANumber(search.to_string())).into()
            })
    }

    /// Project published as `message`.
    pub async fn by_message(&self, guild: GuildId, message: MessageId) -> KuratorResult<Project> {
        match self.store.project_by_message(message).await? {
            Some(project) if project.guild_id == guild => Ok(project),
            _ => Err(NotFoundError::new(NotFoundErrorKind::ProjectMessage(message.get())).into()),
        }
    }

    /// Autocomplete candidates whose title contains `fragment`.
    pub async fn search(&self, guild: GuildId, fragment: &str) -> KuratorResult<Vec<Project>> {
        self.store
            .search_projects(guild, fragment, AUTOCOMPLETE_LIMIT)
            .await
    }

    /// Delete a project with its curator, staff and platforms.
    #[instrument(skip(self), fields(guild_id = %guild, project_id = %id))]
    pub async fn delete(&self, guild: GuildId, id: ProjectId) -> KuratorResult<()> {
        self.require(guild, id).await?;
        if !self.store.delete_project(id).await? {
            Err(NotFoundError::new(NotFoundErrorKind::Project(id.get())))?
        }
        info!("Deleted project");
        Ok(())
    }

    /// Make `user` the curator, replacing the previous one.
    #[instrument(skip(self), fields(guild_id = %guild, project_id = %id, user_id = %user.id))]
    pub async fn assign_curator(
        &self,
        guild: GuildId,
        id: ProjectId,
        user: SelectedUser,
    ) -> KuratorResult<Project> {
        if user.bot {
            Err(ValidationError::new(ValidationErrorKind::BotUser))?
        }
        self.require(guild, id).await?;
        let project = self.store.assign_curator(id, user.id).await?;
        info!("Assigned curator");
        Ok(project)
    }

    /// Remove the curator.
    #[instrument(skip(self), fields(guild_id = %guild, project_id = %id))]
    pub async fn remove_curator(&self, guild: GuildId, id: ProjectId) -> KuratorResult<Project> {
        self.require(guild, id).await?;
        self.store.detach_curator(id).await
    }

    /// Forget where the project is published without touching the message.
    #[instrument(skip(self), fields(guild_id = %guild, project_id = %id))]
    pub async fn unlink(&self, guild: GuildId, id: ProjectId) -> KuratorResult<Project> {
        self.require(guild, id).await?;
        self.store.set_binding(id, None).await
    }

    /// Clear bindings to a deleted message.
    #[instrument(skip(self))]
    pub async fn unlink_message(&self, message: MessageId) -> KuratorResult<usize> {
        let affected = self.store.unlink_message(message).await?;
        if affected > 0 {
            info!(affected, "Unlinked deleted summary message");
        }
        Ok(affected)
    }
}
