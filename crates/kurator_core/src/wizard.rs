//! Multi-step interactions as explicit state machines.
//!
//! A wizard owns its in-progress fields. Each state exposes the routing table
//! for the components it renders; a finished wizard exposes an empty table so
//! its collector stops.

use crate::{ChannelId, ComponentId, Flow, Profession, RoutingTable, Selection, UserId};
use kurator_error::{KuratorResult, ValidationError, ValidationErrorKind, WizardError};
use std::str::FromStr;

/// Common interface of the wizards driven by a collector.
pub trait Wizard: Send {
    /// Components accepted in the current state.
    fn routes(&self) -> RoutingTable;

    /// Apply an input. Inputs that do not fit the current state are rejected
    /// and leave the state unchanged.
    fn advance(&mut self, component: ComponentId, selection: &Selection) -> KuratorResult<()>;

    /// Whether a terminal state was reached.
    fn is_finished(&self) -> bool;

    /// Collector flow matching the current state.
    fn flow(&self) -> Flow {
        if self.is_finished() {
            Flow::Finish
        } else {
            Flow::Replace(self.routes())
        }
    }
}

fn parse_profession(selection: &Selection) -> KuratorResult<Profession> {
    let raw = selection.first_string().unwrap_or_default();
    Profession::from_str(raw).map_err(|_| {
        ValidationError::new(ValidationErrorKind::UnknownProfession(raw.to_string())).into()
    })
}

/// Steps of staff assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum AssignStaffState {
    /// Waiting for a profession
    AwaitingProfession,
    /// Waiting for the user to assign
    AwaitingUser {
        /// Chosen profession
        profession: Profession,
    },
    /// Both inputs collected
    Done {
        /// Chosen profession
        profession: Profession,
        /// Chosen user
        user: UserId,
    },
}

/// Pick a profession, then a user.
#[derive(Debug, Clone)]
pub struct AssignStaffWizard {
    state: AssignStaffState,
}

impl Default for AssignStaffWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignStaffWizard {
    /// Start at the profession step.
    pub fn new() -> Self {
        Self {
            state: AssignStaffState::AwaitingProfession,
        }
    }

    /// Current state.
    pub fn state(&self) -> AssignStaffState {
        self.state
    }
}

impl Wizard for AssignStaffWizard {
    fn routes(&self) -> RoutingTable {
        match self.state {
            AssignStaffState::AwaitingProfession => {
                RoutingTable::new().with(ComponentId::AssignEmployeeProfession)
            }
            AssignStaffState::AwaitingUser { .. } => {
                RoutingTable::new().with(ComponentId::AssignEmployeeUser)
            }
            AssignStaffState::Done { .. } => RoutingTable::new(),
        }
    }

    fn advance(&mut self, component: ComponentId, selection: &Selection) -> KuratorResult<()> {
        self.state = match (self.state, component) {
            (AssignStaffState::AwaitingProfession, ComponentId::AssignEmployeeProfession) => {
                AssignStaffState::AwaitingUser {
                    profession: parse_profession(selection)?,
                }
            }
            (AssignStaffState::AwaitingUser { profession }, ComponentId::AssignEmployeeUser) => {
                let user = selection
                    .first_user()
                    .ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyField("user")))?;
                if user.bot {
                    Err(ValidationError::new(ValidationErrorKind::BotUser))?
                }
                AssignStaffState::Done {
                    profession,
                    user: user.id,
                }
            }
            (state, component) => {
                let state: &'static str = state.into();
                Err(WizardError::new(state, component.as_str()))?
            }
        };
        Ok(())
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, AssignStaffState::Done { .. })
    }
}

/// Steps of staff removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum RemoveStaffState {
    /// Waiting for a profession
    AwaitingProfession,
    /// Profession chosen
    Done {
        /// Profession whose staff is removed
        profession: Profession,
    },
}

/// Pick a staffed profession to clear.
#[derive(Debug, Clone)]
pub struct RemoveStaffWizard {
    offered: Vec<Profession>,
    state: RemoveStaffState,
}

impl RemoveStaffWizard {
    /// Offer only the professions that currently have staff.
    pub fn new(offered: impl Into<Vec<Profession>>) -> Self {
        Self {
            offered: offered.into(),
            state: RemoveStaffState::AwaitingProfession,
        }
    }

    /// Professions the wizard offers.
    pub fn offered(&self) -> &[Profession] {
        &self.offered
    }

    /// Current state.
    pub fn state(&self) -> RemoveStaffState {
        self.state
    }
}

impl Wizard for RemoveStaffWizard {
    fn routes(&self) -> RoutingTable {
        match self.state {
            RemoveStaffState::AwaitingProfession => {
                RoutingTable::new().with(ComponentId::RemoveEmployeeProfession)
            }
            RemoveStaffState::Done { .. } => RoutingTable::new(),
        }
    }

    fn advance(&mut self, component: ComponentId, selection: &Selection) -> KuratorResult<()> {
        self.state = match (self.state, component) {
            (RemoveStaffState::AwaitingProfession, ComponentId::RemoveEmployeeProfession) => {
                let profession = parse_profession(selection)?;
                if !self.offered.contains(&profession) {
                    Err(ValidationError::new(ValidationErrorKind::UnknownProfession(
                        profession.to_string(),
                    )))?
                }
                RemoveStaffState::Done { profession }
            }
            (state, component) => {
                let state: &'static str = state.into();
                Err(WizardError::new(state, component.as_str()))?
            }
        };
        Ok(())
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, RemoveStaffState::Done { .. })
    }
}

/// Steps of choosing a publish destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum PublishState {
    /// Waiting for a text channel
    AwaitingChannel,
    /// Channel chosen
    Done {
        /// Destination channel
        channel: ChannelId,
    },
}

/// Pick the channel a project is first published to.
#[derive(Debug, Clone)]
pub struct PublishWizard {
    state: PublishState,
}

impl Default for PublishWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishWizard {
    /// Start at the channel step.
    pub fn new() -> Self {
        Self {
            state: PublishState::AwaitingChannel,
        }
    }

    /// Current state.
    pub fn state(&self) -> PublishState {
        self.state
    }
}

impl Wizard for PublishWizard {
    fn routes(&self) -> RoutingTable {
        match self.state {
            PublishState::AwaitingChannel => RoutingTable::new().with(ComponentId::PublishChannel),
            PublishState::Done { .. } => RoutingTable::new(),
        }
    }

    fn advance(&mut self, component: ComponentId, selection: &Selection) -> KuratorResult<()> {
        self.state = match (self.state, component) {
            (PublishState::AwaitingChannel, ComponentId::PublishChannel) => {
                let channel = selection.first_channel().ok_or_else(|| {
                    ValidationError::new(ValidationErrorKind::EmptyField("channel"))
                })?;
                PublishState::Done { channel }
            }
            (state, component) => {
                let state: &'static str = state.into();
                Err(WizardError::new(state, component.as_str()))?
            }
        };
        Ok(())
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, PublishState::Done { .. })
    }
}

/// Steps of the delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum DeleteState {
    /// Waiting for confirm or cancel
    AwaitingConfirmation,
    /// Deletion confirmed
    Confirmed,
    /// Deletion cancelled
    Cancelled,
}

/// Confirm or cancel a project deletion.
#[derive(Debug, Clone)]
pub struct DeleteWizard {
    state: DeleteState,
}

impl Default for DeleteWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteWizard {
    /// Start awaiting confirmation.
    pub fn new() -> Self {
        Self {
            state: DeleteState::AwaitingConfirmation,
        }
    }

    /// Current state.
    pub fn state(&self) -> DeleteState {
        self.state
    }
}

impl Wizard for DeleteWizard {
    fn routes(&self) -> RoutingTable {
        match self.state {
            DeleteState::AwaitingConfirmation => RoutingTable::from_components([
                ComponentId::DeleteConfirm,
                ComponentId::DeleteCancel,
            ]),
            DeleteState::Confirmed | DeleteState::Cancelled => RoutingTable::new(),
        }
    }

    fn advance(&mut self, component: ComponentId, _selection: &Selection) -> KuratorResult<()> {
        self.state = match (self.state, component) {
            (DeleteState::AwaitingConfirmation, ComponentId::DeleteConfirm) => {
                DeleteState::Confirmed
            }
            (DeleteState::AwaitingConfirmation, ComponentId::DeleteCancel) => {
                DeleteState::Cancelled
            }
            (state, component) => {
                let state: &'static str = state.into();
                Err(WizardError::new(state, component.as_str()))?
            }
        };
        Ok(())
    }

    fn is_finished(&self) -> bool {
        !matches!(self.state, DeleteState::AwaitingConfirmation)
    }
}
