//! Tests for the wizard state machines.

use kurator_core::{
    AssignStaffState, AssignStaffWizard, ChannelId, ComponentId, DeleteState, DeleteWizard, Flow,
    Profession, PublishState, PublishWizard, RemoveStaffState, RemoveStaffWizard, SelectedUser,
    Selection, UserId, Wizard,
};
use kurator_error::{KuratorErrorKind, ValidationErrorKind};

fn strings(value: &str) -> Selection {
    Selection::Strings(vec![value.to_string()])
}

fn user(id: u64, bot: bool) -> Selection {
    Selection::Users(vec![SelectedUser { id: UserId(id), bot }])
}

#[test]
fn test_assign_staff_happy_path() {
    let mut wizard = AssignStaffWizard::new();
    assert!(wizard.routes().contains(ComponentId::AssignEmployeeProfession));
    assert!(!wizard.routes().contains(ComponentId::AssignEmployeeUser));

    wizard
        .advance(ComponentId::AssignEmployeeProfession, &strings("EDITOR"))
        .unwrap();
    assert_eq!(
        wizard.state(),
        AssignStaffState::AwaitingUser {
            profession: Profession::Editor
        }
    );
    assert_eq!(
        wizard.flow(),
        Flow::Replace(kurator_core::RoutingTable::new().with(ComponentId::AssignEmployeeUser))
    );

    wizard
        .advance(ComponentId::AssignEmployeeUser, &user(5, false))
        .unwrap();
    assert_eq!(
        wizard.state(),
        AssignStaffState::Done {
            profession: Profession::Editor,
            user: UserId(5)
        }
    );
    assert!(wizard.is_finished());
    assert!(wizard.routes().is_empty());
    assert_eq!(wizard.flow(), Flow::Finish);
}

#[test]
fn test_assign_staff_rejects_out_of_order_input() {
    let mut wizard = AssignStaffWizard::new();

    let err = wizard
        .advance(ComponentId::AssignEmployeeUser, &user(5, false))
        .unwrap_err();

    assert!(matches!(err.kind(), KuratorErrorKind::Wizard(_)));
    assert_eq!(wizard.state(), AssignStaffState::AwaitingProfession);
}

#[test]
fn test_assign_staff_rejects_bots_and_keeps_state() {
    let mut wizard = AssignStaffWizard::new();
    wizard
        .advance(ComponentId::AssignEmployeeProfession, &strings("TYPER"))
        .unwrap();

    let err = wizard
        .advance(ComponentId::AssignEmployeeUser, &user(9, true))
        .unwrap_err();

    match err.kind() {
        KuratorErrorKind::Validation(e) => assert_eq!(e.kind, ValidationErrorKind::BotUser),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        wizard.state(),
        AssignStaffState::AwaitingUser {
            profession: Profession::Typer
        }
    );
}

#[test]
fn test_assign_staff_rejects_unknown_profession() {
    let mut wizard = AssignStaffWizard::new();

    let err = wizard
        .advance(ComponentId::AssignEmployeeProfession, &strings("WRITER"))
        .unwrap_err();

    assert!(matches!(err.kind(), KuratorErrorKind::Validation(_)));
    assert_eq!(wizard.state(), AssignStaffState::AwaitingProfession);
}

#[test]
fn test_remove_staff_only_accepts_offered_professions() {
    let mut wizard = RemoveStaffWizard::new(vec![Profession::Cleaner]);

    assert!(
        wizard
            .advance(ComponentId::RemoveEmployeeProfession, &strings("EDITOR"))
            .is_err()
    );
    wizard
        .advance(ComponentId::RemoveEmployeeProfession, &strings("CLEANER"))
        .unwrap();

    assert_eq!(
        wizard.state(),
        RemoveStaffState::Done {
            profession: Profession::Cleaner
        }
    );
    assert_eq!(wizard.flow(), Flow::Finish);
}

#[test]
fn test_publish_wizard_collects_channel() {
    let mut wizard = PublishWizard::new();
    assert!(wizard.routes().contains(ComponentId::PublishChannel));

    assert!(
        wizard
            .advance(ComponentId::PublishChannel, &Selection::None)
            .is_err()
    );
    wizard
        .advance(
            ComponentId::PublishChannel,
            &Selection::Channels(vec![ChannelId(33)]),
        )
        .unwrap();

    assert_eq!(
        wizard.state(),
        PublishState::Done {
            channel: ChannelId(33)
        }
    );
    assert!(wizard.is_finished());
}

#[test]
fn test_delete_wizard_confirm_and_cancel() {
    let mut confirm = DeleteWizard::new();
    assert!(confirm.routes().contains(ComponentId::DeleteConfirm));
    assert!(confirm.routes().contains(ComponentId::DeleteCancel));
    confirm
        .advance(ComponentId::DeleteConfirm, &Selection::None)
        .unwrap();
    assert_eq!(confirm.state(), DeleteState::Confirmed);
    assert!(confirm.is_finished());

    let mut cancel = DeleteWizard::new();
    cancel
        .advance(ComponentId::DeleteCancel, &Selection::None)
        .unwrap();
    assert_eq!(cancel.state(), DeleteState::Cancelled);

    // Terminal states accept nothing.
    assert!(
        cancel
            .advance(ComponentId::DeleteConfirm, &Selection::None)
            .is_err()
    );
    assert_eq!(cancel.state(), DeleteState::Cancelled);
}
