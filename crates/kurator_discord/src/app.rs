//! Services shared by every handler and panel.

use crate::gateway::SerenityPublishGateway;
use kurator_core::{
    HttpImageProbe, ImageProbe, PermissionResolver, PlatformService, ProjectService,
    ProjectStore, Publisher, StaffService, SuperRoleService,
};
use kurator_error::KuratorResult;
use serenity::all::Http;
use std::sync::Arc;
use std::time::Duration;

/// Shared bot state.
#[derive(Clone)]
pub struct Kurator {
    /// Capability resolution
    pub resolver: PermissionResolver,
    /// Project lifecycle and curators
    pub projects: ProjectService,
    /// Platform management
    pub platforms: PlatformService,
    /// Staff management
    pub staff: StaffService,
    /// Summary publishing
    pub publisher: Publisher,
    /// Super role configuration
    pub super_roles: SuperRoleService,
    /// Discord side of publishing
    pub gateway: Arc<SerenityPublishGateway>,
    /// Lifetime of every collector
    pub collector_ttl: Duration,
}

impl Kurator {
    /// Wire services over a store and a Discord HTTP client.
    pub fn new(
        store: Arc<dyn ProjectStore>,
        http: Arc<Http>,
        collector_ttl: Duration,
    ) -> KuratorResult<Self> {
        let probe: Arc<dyn ImageProbe> = Arc::new(HttpImageProbe::new()?);
        Ok(Self::with_probe(store, http, probe, collector_ttl))
    }

    /// Wire services with a custom poster probe.
    pub fn with_probe(
        store: Arc<dyn ProjectStore>,
        http: Arc<Http>,
        probe: Arc<dyn ImageProbe>,
        collector_ttl: Duration,
    ) -> Self {
        let gateway = Arc::new(SerenityPublishGateway::new(http));
        Self {
            resolver: PermissionResolver::new(store.clone()),
            projects: ProjectService::new(store.clone(), probe),
            platforms: PlatformService::new(store.clone()),
            staff: StaffService::new(store.clone()),
            publisher: Publisher::new(store.clone(), gateway.clone()),
            super_roles: SuperRoleService::new(store),
            gateway,
            collector_ttl,
        }
    }
}
