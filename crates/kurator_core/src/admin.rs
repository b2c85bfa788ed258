//! Guild super role configuration.

use crate::{GuildId, ProjectStore, RoleId, SuperRole};
use kurator_error::{KuratorResult, NotFoundError, NotFoundErrorKind};
use std::sync::Arc;
use tracing::{info, instrument};

/// Reads and changes the super role of a guild.
#[derive(Clone)]
pub struct SuperRoleService {
    store: Arc<dyn ProjectStore>,
}

impl SuperRoleService {
    /// Service over a store.
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Current super role, if configured.
    pub async fn current(&self, guild: GuildId) -> KuratorResult<Option<SuperRole>> {
        self.store.super_role(guild).await
    }

    /// Configure or replace the super role.
    #[instrument(skip(self), fields(guild_id = %guild, role_id = %role))]
    pub async fn assign(&self, guild: GuildId, role: RoleId) -> KuratorResult<SuperRole> {
        let super_role = self.store.upsert_super_role(guild, role).await?;
        info!("Configured super role");
        Ok(super_role)
    }

    /// Remove the super role; errors when none is configured.
    #[instrument(skip(self), fields(guild_id = %guild))]
    pub async fn remove(&self, guild: GuildId) -> KuratorResult<()> {
        if !self.store.delete_super_role(guild).await? {
            Err(NotFoundError::new(NotFoundErrorKind::SuperRole(guild.get())))?
        }
        info!("Removed super role");
        Ok(())
    }
}
