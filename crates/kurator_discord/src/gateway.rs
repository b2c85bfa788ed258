//! [`PublishGateway`] over the Discord HTTP API.

use crate::conversions::{channel_id, message_id, to_channel, to_message};
use crate::error::{gateway, is_not_found};
use crate::views::{self, BotIdentity};
use async_trait::async_trait;
use kurator_core::{ChannelId, MessageId, ProjectSummary, PublishGateway};
use kurator_error::KuratorResult;
use serenity::all::{CreateMessage, CreateThread, EditMessage, Http};
use std::sync::{Arc, OnceLock};
use tracing::instrument;

/// Publishes summaries with serenity's HTTP client.
pub struct SerenityPublishGateway {
    http: Arc<Http>,
    identity: OnceLock<BotIdentity>,
}

impl SerenityPublishGateway {
    /// Gateway over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            identity: OnceLock::new(),
        }
    }

    /// Record the bot's own name and avatar for summary footers.
    pub fn set_identity(&self, identity: BotIdentity) {
        let _ = self.identity.set(identity);
    }

    /// Bot identity, once the gateway connection is ready.
    pub fn identity(&self) -> Option<&BotIdentity> {
        self.identity.get()
    }

}

fn exists<T>(response: serenity::Result<T>) -> KuratorResult<bool> {
    match response {
        Ok(_) => Ok(true),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(gateway(e)),
    }
}

#[async_trait]
impl PublishGateway for SerenityPublishGateway {
    #[instrument(skip(self))]
    async fn channel_exists(&self, channel: ChannelId) -> KuratorResult<bool> {
        let response = self.http.get_channel(to_channel(channel)).await;
        exists(response)
    }

    #[instrument(skip(self))]
    async fn message_exists(&self, channel: ChannelId, message: MessageId) -> KuratorResult<bool> {
        let response = self
            .http
            .get_message(to_channel(channel), to_message(message))
            .await;
        exists(response)
    }

    #[instrument(skip(self))]
    async fn thread_exists(&self, thread: ChannelId) -> KuratorResult<bool> {
        let response = self.http.get_channel(to_channel(thread)).await;
        exists(response)
    }

    #[instrument(skip(self, summary), fields(title = %summary.title))]
    async fn send_summary(
        &self,
        channel: ChannelId,
        summary: &ProjectSummary,
    ) -> KuratorResult<MessageId> {
        let message = to_channel(channel)
            .send_message(
                self.http.as_ref(),
                CreateMessage::new().embed(views::summary_embed(summary, self.identity())),
            )
            .await
            .map_err(gateway)?;
        Ok(message_id(message.id))
    }

    #[instrument(skip(self, summary), fields(title = %summary.title))]
    async fn edit_summary(
        &self,
        channel: ChannelId,
        message: MessageId,
        summary: &ProjectSummary,
    ) -> KuratorResult<()> {
        to_channel(channel)
            .edit_message(
                self.http.as_ref(),
                to_message(message),
                EditMessage::new().embed(views::summary_embed(summary, self.identity())),
            )
            .await
            .map_err(gateway)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn start_thread(
        &self,
        channel: ChannelId,
        message: MessageId,
        name: &str,
    ) -> KuratorResult<ChannelId> {
        let thread = to_channel(channel)
            .create_thread_from_message(
                self.http.as_ref(),
                to_message(message),
                CreateThread::new(name),
            )
            .await
            .map_err(gateway)?;
        Ok(channel_id(thread.id))
    }
}
