//! Tests for staff assignment and removal.

use kurator_core::{
    EMPLOYEE_LIMIT, GuildId, InMemoryProjectStore, NewProject, Profession, ProjectId,
    ProjectStore, SelectedUser, StaffService, UserId,
};
use kurator_error::KuratorErrorKind;
use std::sync::Arc;

fn human(id: u64) -> SelectedUser {
    SelectedUser {
        id: UserId(id),
        bot: false,
    }
}

async fn setup() -> (StaffService, ProjectId) {
    let store = Arc::new(InMemoryProjectStore::new());
    let project = store
        .create_project(NewProject {
            guild_id: GuildId(1),
            title: "Tower of God".to_string(),
            poster: "https://example.com/tog.png".to_string(),
        })
        .await
        .unwrap();
    (StaffService::new(store), project.id)
}

#[tokio::test]
async fn test_assigning_twice_keeps_one_row() {
    let (service, project) = setup().await;

    let first = service
        .assign(project, human(1), Profession::Translator)
        .await
        .unwrap();
    let second = service
        .assign(project, human(1), Profession::Translator)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(service.list(project).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_profession_only_touches_that_profession() {
    let (service, project) = setup().await;
    service.assign(project, human(1), Profession::Translator).await.unwrap();
    service.assign(project, human(2), Profession::Translator).await.unwrap();
    service.assign(project, human(1), Profession::Editor).await.unwrap();
    service.assign(project, human(3), Profession::Typer).await.unwrap();

    let removed = service
        .remove_profession(project, Profession::Translator)
        .await
        .unwrap();

    assert_eq!(removed, 2);
    let remaining: Vec<Profession> = service
        .list(project)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.profession)
        .collect();
    assert_eq!(remaining, vec![Profession::Editor, Profession::Typer]);
}

#[tokio::test]
async fn test_staffed_professions_are_unique_and_ordered() {
    let (service, project) = setup().await;
    service.assign(project, human(1), Profession::BetaReader).await.unwrap();
    service.assign(project, human(2), Profession::Cleaner).await.unwrap();
    service.assign(project, human(3), Profession::Cleaner).await.unwrap();

    let professions = service.staffed_professions(project).await.unwrap();

    assert_eq!(professions, vec![Profession::Cleaner, Profession::BetaReader]);
}

#[tokio::test]
async fn test_bots_cannot_be_staff() {
    let (service, project) = setup().await;

    let err = service
        .assign(
            project,
            SelectedUser {
                id: UserId(9),
                bot: true,
            },
            Profession::Typer,
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), KuratorErrorKind::Validation(_)));
    assert!(service.list(project).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_staff_limit() {
    let (service, project) = setup().await;
    for i in 0..EMPLOYEE_LIMIT as u64 {
        service.assign(project, human(i + 1), Profession::Cleaner).await.unwrap();
    }

    let err = service
        .assign(project, human(100), Profession::Cleaner)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), KuratorErrorKind::Limit(_)));

    // Re-assigning an existing pair does not count against the limit.
    service.assign(project, human(1), Profession::Cleaner).await.unwrap();
}

#[test]
fn test_profession_wire_values() {
    assert_eq!(Profession::BetaReader.as_str(), "BETA_READER");
    assert_eq!("TRANSLATOR".parse::<Profession>().unwrap(), Profession::Translator);
    assert_eq!(Profession::BetaReader.label(), "Beta reader");
    assert!("WRITER".parse::<Profession>().is_err());
}
