//! Publishing project summaries and keeping their binding consistent.

use crate::{
    ChannelId, MessageId, Profession, Project, ProjectId, ProjectStore, PublishBinding,
    THREAD_NAME, UserId,
};
use async_trait::async_trait;
use kurator_error::{
    BindingPart, BindingResetError, KuratorResult, NotFoundError, NotFoundErrorKind,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Placeholder for an empty summary section.
pub const EMPTY_SECTION: &str = "None";

/// Chat platform operations needed to publish a summary.
#[async_trait]
pub trait PublishGateway: Send + Sync {
    /// Whether the channel still exists.
    async fn channel_exists(&self, channel: ChannelId) -> KuratorResult<bool>;

    /// Whether the message still exists in the channel.
    async fn message_exists(&self, channel: ChannelId, message: MessageId) -> KuratorResult<bool>;

    /// Whether the thread still exists.
    async fn thread_exists(&self, thread: ChannelId) -> KuratorResult<bool>;

    /// Post a new summary message.
    async fn send_summary(
        &self,
        channel: ChannelId,
        summary: &ProjectSummary,
    ) -> KuratorResult<MessageId>;

    /// Replace the content of a summary message.
    async fn edit_summary(
        &self,
        channel: ChannelId,
        message: MessageId,
        summary: &ProjectSummary,
    ) -> KuratorResult<()>;

    /// Start a thread on a message.
    async fn start_thread(
        &self,
        channel: ChannelId,
        message: MessageId,
        name: &str,
    ) -> KuratorResult<ChannelId>;
}

/// Everything a rendered summary shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Project title
    pub title: String,
    /// Poster image URL
    pub poster: String,
    /// `(profession, user)` pairs in staff order
    pub staff: Vec<(Profession, UserId)>,
    /// Curator, listed after the staff
    pub curator: Option<UserId>,
    /// `(name, url)` pairs
    pub platforms: Vec<(String, String)>,
}

impl ProjectSummary {
    /// One `` `Profession`: <@user> `` line per staff member, then the curator.
    pub fn staff_lines(&self) -> Vec<String> {
        self.staff
            .iter()
            .map(|(profession, user)| format!("`{}`: <@{}>", profession.label(), user))
            .chain(self.curator.map(|user| format!("`Curator`: <@{user}>")))
            .collect()
    }

    /// One markdown link per platform.
    pub fn platform_lines(&self) -> Vec<String> {
        self.platforms
            .iter()
            .map(|(name, url)| format!("[{name}]({url})"))
            .collect()
    }

    /// Staff section text.
    pub fn staff_section(&self) -> String {
        section(self.staff_lines())
    }

    /// Platform section text.
    pub fn platform_section(&self) -> String {
        section(self.platform_lines())
    }
}

fn section(lines: Vec<String>) -> String {
    if lines.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        lines.join("\n")
    }
}

/// Result of [`Publisher::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The existing summary was refreshed
    Updated(PublishBinding),
    /// Not published yet and no destination given
    NeedsDestination,
    /// A new summary and thread were created
    Published(PublishBinding),
}

/// Publishes summaries and reconciles bindings with the chat platform.
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn ProjectStore>,
    gateway: Arc<dyn PublishGateway>,
}

impl Publisher {
    /// Publisher over a store and a gateway.
    pub fn new(store: Arc<dyn ProjectStore>, gateway: Arc<dyn PublishGateway>) -> Self {
        Self { store, gateway }
    }

    async fn load(&self, id: ProjectId) -> KuratorResult<Project> {
        self.store
            .project(id)
            .await?
            .ok_or_else(|| NotFoundError::new(NotFoundErrorKind::Project(id.get())).into())
    }

    /// Render the current summary of a project.
    pub async fn summary(&self, id: ProjectId) -> KuratorResult<ProjectSummary> {
        let project = self.load(id).await?;
        self.summarize(&project).await
    }

    async fn summarize(&self, project: &Project) -> KuratorResult<ProjectSummary> {
        let staff = self
            .store
            .employees(project.id)
            .await?
            .into_iter()
            .map(|e| (e.profession, e.user_id))
            .collect();
        let platforms = self
            .store
            .platforms(project.id)
            .await?
            .into_iter()
            .map(|p| (p.name, p.url))
            .collect();
        Ok(ProjectSummary {
            title: project.title.clone(),
            poster: project.poster.clone(),
            staff,
            curator: project.curator.as_ref().map(|c| c.user_id),
            platforms,
        })
    }

    /// Publish a project, or refresh its published summary.
    ///
    /// With a binding, the channel, message and thread are re-fetched in that
    /// order. A missing channel or message clears the binding and returns a
    /// [`BindingResetError`]; a missing thread is recreated. Without a binding
    /// the summary is posted to `destination`, or
    /// [`PublishOutcome::NeedsDestination`] is returned when none is given.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn publish(
        &self,
        id: ProjectId,
        destination: Option<ChannelId>,
    ) -> KuratorResult<PublishOutcome> {
        let project = self.load(id).await?;

        match (project.binding, destination) {
            (Some(binding), _) => self.refresh(&project, binding).await,
            (None, None) => Ok(PublishOutcome::NeedsDestination),
            (None, Some(channel)) => self.first_publish(&project, channel).await,
        }
    }

    async fn reset(&self, id: ProjectId, missing: BindingPart) -> KuratorResult<PublishOutcome> {
        warn!(project_id = %id, %missing, "Published resource missing, resetting binding");
        self.store.set_binding(id, None).await?;
        Err(BindingResetError::new(id.get(), missing).into())
    }

    async fn refresh(
        &self,
        project: &Project,
        mut binding: PublishBinding,
    ) -> KuratorResult<PublishOutcome> {
        if !self.gateway.channel_exists(binding.channel_id).await? {
            return self.reset(project.id, BindingPart::Channel).await;
        }
        if !self
            .gateway
            .message_exists(binding.channel_id, binding.message_id)
            .await?
        {
            return self.reset(project.id, BindingPart::Message).await;
        }
        if !self.gateway.thread_exists(binding.branch_id).await? {
            binding.branch_id = self
                .gateway
                .start_thread(binding.channel_id, binding.message_id, THREAD_NAME)
                .await?;
            self.store.set_binding(project.id, Some(binding)).await?;
            info!(branch_id = %binding.branch_id, "Recreated summary thread");
        }

        let summary = self.summarize(project).await?;
        self.gateway
            .edit_summary(binding.channel_id, binding.message_id, &summary)
            .await?;
        info!("Updated published summary");
        Ok(PublishOutcome::Updated(binding))
    }

    async fn first_publish(
        &self,
        project: &Project,
        channel: ChannelId,
    ) -> KuratorResult<PublishOutcome> {
        let summary = self.summarize(project).await?;
        let message = self.gateway.send_summary(channel, &summary).await?;
        let branch = self
            .gateway
            .start_thread(channel, message, THREAD_NAME)
            .await?;
        let binding = PublishBinding {
            channel_id: channel,
            message_id: message,
            branch_id: branch,
        };
        self.store.set_binding(project.id, Some(binding)).await?;
        info!(%channel, %message, "Published summary");
        Ok(PublishOutcome::Published(binding))
    }
}
