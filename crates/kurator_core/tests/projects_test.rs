//! Tests for project lifecycle and curator management.

use async_trait::async_trait;
use kurator_core::{
    ChannelId, GuildId, ImageProbe, InMemoryProjectStore, MessageId, PlatformService,
    Profession, ProjectId, ProjectService, ProjectStore, PublishBinding, SelectedUser,
    StaffService, UserId,
};
use kurator_error::{KuratorErrorKind, NotFoundErrorKind, ValidationErrorKind};
use std::sync::Arc;

const GUILD: GuildId = GuildId(1);

/// Treats URLs ending in an image extension as images.
struct ExtensionProbe;

#[async_trait]
impl ImageProbe for ExtensionProbe {
    async fn is_image(&self, url: &str) -> bool {
        url.ends_with(".png") || url.ends_with(".jpg")
    }
}

fn setup() -> (Arc<InMemoryProjectStore>, ProjectService) {
    let store = Arc::new(InMemoryProjectStore::new());
    let service = ProjectService::new(store.clone(), Arc::new(ExtensionProbe));
    (store, service)
}

fn validation_kind(err: &kurator_error::KuratorError) -> ValidationErrorKind {
    match err.kind() {
        KuratorErrorKind::Validation(e) => e.kind.clone(),
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn test_create_trims_and_validates() {
    let (_store, service) = setup();

    let project = service
        .create(GUILD, "  Vinland Saga  ", " https://cdn.example.com/vs.png ")
        .await
        .unwrap();
    assert_eq!(project.title, "Vinland Saga");
    assert_eq!(project.poster, "https://cdn.example.com/vs.png");
    assert!(project.binding.is_none());
    assert!(project.curator.is_none());

    let err = service
        .create(GUILD, "Berserk", "https://cdn.example.com/page.html")
        .await
        .unwrap_err();
    assert!(matches!(validation_kind(&err), ValidationErrorKind::NotAnImage(_)));

    let err = service.create(GUILD, "   ", "https://cdn.example.com/a.png").await.unwrap_err();
    assert_eq!(validation_kind(&err), ValidationErrorKind::EmptyField("title"));
}

#[tokio::test]
async fn test_duplicate_title_ignores_case() {
    let (_store, service) = setup();
    service
        .create(GUILD, "Vinland Saga", "https://cdn.example.com/vs.png")
        .await
        .unwrap();

    let err = service
        .create(GUILD, "VINLAND SAGA", "https://cdn.example.com/vs.png")
        .await
        .unwrap_err();
    assert!(matches!(validation_kind(&err), ValidationErrorKind::DuplicateTitle(_)));

    // Titles are unique per guild only.
    service
        .create(GuildId(2), "Vinland Saga", "https://cdn.example.com/vs.png")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_find_by_id_or_title() {
    let (_store, service) = setup();
    let project = service
        .create(GUILD, "Vagabond", "https://cdn.example.com/v.jpg")
        .await
        .unwrap();

    let by_id = service.find(GUILD, &project.id.to_string()).await.unwrap();
    assert_eq!(by_id.id, project.id);

    let by_title = service.find(GUILD, "vagabond").await.unwrap();
    assert_eq!(by_title.id, project.id);

    let err = service.find(GUILD, "Monster").await.unwrap_err();
    assert!(matches!(validation_kind(&err), ValidationErrorKind::NotANumber(_)));

    let err = service.find(GUILD, "777").await.unwrap_err();
    match err.kind() {
        KuratorErrorKind::NotFound(e) => assert_eq!(e.kind, NotFoundErrorKind::Project(777)),
        other => panic!("unexpected error: {other}"),
    }

    // Projects of another guild are invisible.
    let err = service
        .find(GuildId(2), &project.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), KuratorErrorKind::NotFound(_)));
}

#[tokio::test]
async fn test_search_matches_fragments() {
    let (_store, service) = setup();
    for title in ["One Piece", "One Punch Man", "Naruto"] {
        service
            .create(GUILD, title, "https://cdn.example.com/p.png")
            .await
            .unwrap();
    }

    let titles: Vec<String> = service
        .search(GUILD, "one")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(titles, vec!["One Piece".to_string(), "One Punch Man".to_string()]);
}

#[tokio::test]
async fn test_curator_reassignment_replaces_row() {
    let (store, service) = setup();
    let project = service
        .create(GUILD, "Dorohedoro", "https://cdn.example.com/d.png")
        .await
        .unwrap();
    let alice = SelectedUser { id: UserId(10), bot: false };
    let bob = SelectedUser { id: UserId(11), bot: false };

    let first = service.assign_curator(GUILD, project.id, alice).await.unwrap();
    let second = service.assign_curator(GUILD, project.id, bob).await.unwrap();

    assert!(first.is_curated_by(UserId(10)));
    assert!(second.is_curated_by(UserId(11)));
    assert!(!second.is_curated_by(UserId(10)));
    assert_eq!(store.curator_count().await, 1);

    let detached = service.remove_curator(GUILD, project.id).await.unwrap();
    assert!(detached.curator.is_none());
    assert_eq!(store.curator_count().await, 0);
}

#[tokio::test]
async fn test_bot_cannot_curate() {
    let (_store, service) = setup();
    let project = service
        .create(GUILD, "Dorohedoro", "https://cdn.example.com/d.png")
        .await
        .unwrap();

    let err = service
        .assign_curator(GUILD, project.id, SelectedUser { id: UserId(5), bot: true })
        .await
        .unwrap_err();

    assert_eq!(validation_kind(&err), ValidationErrorKind::BotUser);
}

#[tokio::test]
async fn test_delete_cascades() {
    let (store, service) = setup();
    let project = service
        .create(GUILD, "Chainsaw Man", "https://cdn.example.com/c.png")
        .await
        .unwrap();
    service
        .assign_curator(GUILD, project.id, SelectedUser { id: UserId(3), bot: false })
        .await
        .unwrap();
    StaffService::new(store.clone())
        .assign(project.id, SelectedUser { id: UserId(4), bot: false }, Profession::Editor)
        .await
        .unwrap();
    PlatformService::new(store.clone())
        .add(project.id, "MangaLib", "https://mangalib.me/csm")
        .await
        .unwrap();

    service.delete(GUILD, project.id).await.unwrap();

    assert_eq!(store.project_count().await, 0);
    assert_eq!(store.curator_count().await, 0);
    assert!(store.employees(project.id).await.unwrap().is_empty());
    assert!(store.platforms(project.id).await.unwrap().is_empty());

    let err = service.delete(GUILD, project.id).await.unwrap_err();
    assert!(matches!(err.kind(), KuratorErrorKind::NotFound(_)));
}

#[tokio::test]
async fn test_unlink_and_message_lookup() {
    let (store, service) = setup();
    let project = service
        .create(GUILD, "Blame!", "https://cdn.example.com/b.png")
        .await
        .unwrap();
    let binding = PublishBinding {
        channel_id: ChannelId(20),
        message_id: MessageId(21),
        branch_id: ChannelId(22),
    };
    store.set_binding(project.id, Some(binding)).await.unwrap();

    let found = service.by_message(GUILD, MessageId(21)).await.unwrap();
    assert_eq!(found.id, project.id);
    assert!(service.by_message(GUILD, MessageId(99)).await.is_err());

    let unlinked = service.unlink(GUILD, project.id).await.unwrap();
    assert!(unlinked.binding.is_none());

    store.set_binding(project.id, Some(binding)).await.unwrap();
    assert_eq!(service.unlink_message(MessageId(21)).await.unwrap(), 1);
    assert_eq!(service.unlink_message(MessageId(21)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_project_is_not_found_for_curator_changes() {
    let (_store, service) = setup();

    let err = service
        .assign_curator(GUILD, ProjectId(404), SelectedUser { id: UserId(1), bot: false })
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), KuratorErrorKind::NotFound(_)));
}
