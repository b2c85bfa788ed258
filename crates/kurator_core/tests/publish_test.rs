//! Tests for publishing and binding reconciliation.

use async_trait::async_trait;
use kurator_core::{
    ChannelId, GuildId, InMemoryProjectStore, MessageId, NewProject, PlatformService, Profession,
    ProjectId, ProjectStore, ProjectSummary, PublishGateway, PublishOutcome, Publisher,
    SelectedUser, StaffService, THREAD_NAME, UserId,
};
use kurator_error::{BindingPart, KuratorErrorKind, KuratorResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Chat platform double keeping channels, messages and threads in sets.
#[derive(Default)]
struct MockGateway {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    channels: HashSet<ChannelId>,
    messages: HashSet<(ChannelId, MessageId)>,
    threads: HashSet<ChannelId>,
    thread_names: Vec<String>,
    edits: Vec<(MessageId, ProjectSummary)>,
    next_id: u64,
}

impl MockGateway {
    fn with_channel(channel: ChannelId) -> Self {
        let gateway = Self::default();
        gateway.state.lock().unwrap().channels.insert(channel);
        gateway
    }

    fn delete_channel(&self, channel: ChannelId) {
        let mut state = self.state.lock().unwrap();
        state.channels.remove(&channel);
        state.messages.retain(|(c, _)| *c != channel);
    }

    fn delete_message(&self, channel: ChannelId, message: MessageId) {
        self.state.lock().unwrap().messages.remove(&(channel, message));
    }

    fn delete_thread(&self, thread: ChannelId) {
        self.state.lock().unwrap().threads.remove(&thread);
    }

    fn edit_count(&self) -> usize {
        self.state.lock().unwrap().edits.len()
    }
}

#[async_trait]
impl PublishGateway for MockGateway {
    async fn channel_exists(&self, channel: ChannelId) -> KuratorResult<bool> {
        Ok(self.state.lock().unwrap().channels.contains(&channel))
    }

    async fn message_exists(&self, channel: ChannelId, message: MessageId) -> KuratorResult<bool> {
        Ok(self.state.lock().unwrap().messages.contains(&(channel, message)))
    }

    async fn thread_exists(&self, thread: ChannelId) -> KuratorResult<bool> {
        Ok(self.state.lock().unwrap().threads.contains(&thread))
    }

    async fn send_summary(
        &self,
        channel: ChannelId,
        _summary: &ProjectSummary,
    ) -> KuratorResult<MessageId> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let message = MessageId(1000 + state.next_id);
        state.messages.insert((channel, message));
        Ok(message)
    }

    async fn edit_summary(
        &self,
        _channel: ChannelId,
        message: MessageId,
        summary: &ProjectSummary,
    ) -> KuratorResult<()> {
        self.state
            .lock()
            .unwrap()
            .edits
            .push((message, summary.clone()));
        Ok(())
    }

    async fn start_thread(
        &self,
        _channel: ChannelId,
        _message: MessageId,
        name: &str,
    ) -> KuratorResult<ChannelId> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let thread = ChannelId(2000 + state.next_id);
        state.threads.insert(thread);
        state.thread_names.push(name.to_string());
        Ok(thread)
    }
}

const CHANNEL: ChannelId = ChannelId(77);

async fn setup() -> (Arc<InMemoryProjectStore>, Arc<MockGateway>, Publisher, ProjectId) {
    let store = Arc::new(InMemoryProjectStore::new());
    let gateway = Arc::new(MockGateway::with_channel(CHANNEL));
    let project = store
        .create_project(NewProject {
            guild_id: GuildId(1),
            title: "Made in Abyss".to_string(),
            poster: "https://cdn.example.com/mia.png".to_string(),
        })
        .await
        .unwrap();
    let publisher = Publisher::new(store.clone(), gateway.clone());
    (store, gateway, publisher, project.id)
}

async fn publish_fresh(publisher: &Publisher, project: ProjectId) -> kurator_core::PublishBinding {
    match publisher.publish(project, Some(CHANNEL)).await.unwrap() {
        PublishOutcome::Published(binding) => binding,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_unbound_without_destination_asks_for_one() {
    let (_store, _gateway, publisher, project) = setup().await;

    let outcome = publisher.publish(project, None).await.unwrap();

    assert_eq!(outcome, PublishOutcome::NeedsDestination);
}

#[tokio::test]
async fn test_first_publish_binds_message_and_thread() {
    let (store, gateway, publisher, project) = setup().await;

    let binding = publish_fresh(&publisher, project).await;

    assert_eq!(binding.channel_id, CHANNEL);
    let stored = store.project(project).await.unwrap().unwrap();
    assert_eq!(stored.binding, Some(binding));
    let state = gateway.state.lock().unwrap();
    assert!(state.messages.contains(&(CHANNEL, binding.message_id)));
    assert!(state.threads.contains(&binding.branch_id));
    assert_eq!(state.thread_names, vec![THREAD_NAME.to_string()]);
}

#[tokio::test]
async fn test_publish_again_updates_in_place() {
    let (_store, gateway, publisher, project) = setup().await;
    let binding = publish_fresh(&publisher, project).await;

    // A destination is ignored once bound.
    let outcome = publisher.publish(project, Some(ChannelId(5))).await.unwrap();

    assert_eq!(outcome, PublishOutcome::Updated(binding));
    assert_eq!(gateway.edit_count(), 1);
}

#[tokio::test]
async fn test_missing_thread_is_recreated() {
    let (store, gateway, publisher, project) = setup().await;
    let binding = publish_fresh(&publisher, project).await;
    gateway.delete_thread(binding.branch_id);

    let outcome = publisher.publish(project, None).await.unwrap();

    let PublishOutcome::Updated(updated) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(updated.message_id, binding.message_id);
    assert_ne!(updated.branch_id, binding.branch_id);
    let stored = store.project(project).await.unwrap().unwrap();
    assert_eq!(stored.binding, Some(updated));
}

#[tokio::test]
async fn test_missing_message_resets_binding() {
    let (store, gateway, publisher, project) = setup().await;
    let binding = publish_fresh(&publisher, project).await;
    gateway.delete_message(CHANNEL, binding.message_id);

    let err = publisher.publish(project, None).await.unwrap_err();

    match err.kind() {
        KuratorErrorKind::BindingReset(e) => assert_eq!(e.missing, BindingPart::Message),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_recoverable());
    assert!(store.project(project).await.unwrap().unwrap().binding.is_none());
}

#[tokio::test]
async fn test_everything_deleted_resets_on_channel_first() {
    let (store, gateway, publisher, project) = setup().await;
    let binding = publish_fresh(&publisher, project).await;
    gateway.delete_thread(binding.branch_id);
    gateway.delete_message(CHANNEL, binding.message_id);
    gateway.delete_channel(CHANNEL);

    let err = publisher.publish(project, None).await.unwrap_err();

    match err.kind() {
        KuratorErrorKind::BindingReset(e) => assert_eq!(e.missing, BindingPart::Channel),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.project(project).await.unwrap().unwrap().binding.is_none());

    // The next publish asks for a destination again.
    assert_eq!(
        publisher.publish(project, None).await.unwrap(),
        PublishOutcome::NeedsDestination
    );
}

#[tokio::test]
async fn test_summary_lists_staff_curator_and_platforms() {
    let (store, _gateway, publisher, project) = setup().await;
    StaffService::new(store.clone())
        .assign(project, SelectedUser { id: UserId(1), bot: false }, Profession::Translator)
        .await
        .unwrap();
    PlatformService::new(store.clone())
        .add(project, "MangaLib", "https://mangalib.me/mia")
        .await
        .unwrap();
    store.assign_curator(project, UserId(2)).await.unwrap();

    let summary = publisher.summary(project).await.unwrap();

    assert_eq!(summary.title, "Made in Abyss");
    assert_eq!(
        summary.staff_lines(),
        vec!["`Translator`: <@1>".to_string(), "`Curator`: <@2>".to_string()]
    );
    assert_eq!(summary.platform_section(), "[MangaLib](https://mangalib.me/mia)");
}

#[tokio::test]
async fn test_empty_summary_sections() {
    let (_store, _gateway, publisher, project) = setup().await;

    let summary = publisher.summary(project).await.unwrap();

    assert_eq!(summary.staff_section(), kurator_core::EMPTY_SECTION);
    assert_eq!(summary.platform_section(), kurator_core::EMPTY_SECTION);
}

#[tokio::test]
async fn test_publish_missing_project() {
    let (_store, _gateway, publisher, _project) = setup().await;

    let err = publisher.publish(ProjectId(999), Some(CHANNEL)).await.unwrap_err();

    assert!(matches!(err.kind(), KuratorErrorKind::NotFound(_)));
}
