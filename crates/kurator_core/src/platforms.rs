//! Platforms a project is read on.

use crate::{
    PLATFORM_LIMIT, Platform, PlatformId, ProjectId, ProjectStore, validate_platform_name,
    validate_url,
};
use kurator_error::{
    KuratorResult, LimitError, LimitKind, NotFoundError, NotFoundErrorKind, ValidationError,
    ValidationErrorKind,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Whether a project holding `count` platforms accepts another one.
///
/// Select menus hold at most [`PLATFORM_LIMIT`] options and one slot is kept
/// free, so the 24th platform is the last accepted.
pub const fn accepts_platform(count: usize) -> bool {
    count + 1 < PLATFORM_LIMIT
}

/// Adds, edits and removes platforms.
#[derive(Clone)]
pub struct PlatformService {
    store: Arc<dyn ProjectStore>,
}

impl PlatformService {
    /// Service over a store.
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Platforms of the project.
    pub async fn list(&self, project: ProjectId) -> KuratorResult<Vec<Platform>> {
        self.store.platforms(project).await
    }

    /// Platform of the project, or not found.
    pub async fn require(&self, project: ProjectId, id: PlatformId) -> KuratorResult<Platform> {
        match self.store.platform(id).await? {
            Some(platform) if platform.project_id == project => Ok(platform),
            _ => Err(NotFoundError::new(NotFoundErrorKind::Platform(id.get())).into()),
        }
    }

    /// Add a platform, or replace the URL of the one with the same name.
    #[instrument(skip(self, url), fields(project_id = %project))]
    pub async fn add(&self, project: ProjectId, name: &str, url: &str) -> KuratorResult<Platform> {
        let name = validate_platform_name(name)?;
        let url = validate_url(url)?;

        if self.store.project(project).await?.is_none() {
            Err(NotFoundError::new(NotFoundErrorKind::Project(project.get())))?
        }

        if let Some(existing) = self.store.platform_by_name(project, &name).await? {
            let platform = self
                .store
                .update_platform(existing.id, &existing.name, &url)
                .await?;
            info!(platform_id = %platform.id, "Updated platform URL");
            return Ok(platform);
        }

        let count = self.store.platforms(project).await?.len();
        if !accepts_platform(count) {
            Err(LimitError::new(LimitKind::Platforms, PLATFORM_LIMIT))?
        }

        let platform = self.store.create_platform(project, &name, &url).await?;
        info!(platform_id = %platform.id, "Added platform");
        Ok(platform)
    }

    /// Rename a platform and replace its URL.
    ///
    /// Renaming onto another platform's name in the same project is rejected.
    #[instrument(skip(self, url), fields(project_id = %project, platform_id = %id))]
    pub async fn update(
        &self,
        project: ProjectId,
        id: PlatformId,
        name: &str,
        url: &str,
    ) -> KuratorResult<Platform> {
        let name = validate_platform_name(name)?;
        let url = validate_url(url)?;
        self.require(project, id).await?;

        if let Some(other) = self.store.platform_by_name(project, &name).await?
            && other.id != id
        {
            Err(ValidationError::new(ValidationErrorKind::DuplicatePlatform(name.clone())))?
        }

        self.store.update_platform(id, &name, &url).await
    }

    /// Remove a platform.
    #[instrument(skip(self), fields(project_id = %project, platform_id = %id))]
    pub async fn remove(&self, project: ProjectId, id: PlatformId) -> KuratorResult<Platform> {
        let platform = self.require(project, id).await?;
        if !self.store.delete_platform(id).await? {
            Err(NotFoundError::new(NotFoundErrorKind::Platform(id.get())))?
        }
        info!("Removed platform");
        Ok(platform)
    }
}
