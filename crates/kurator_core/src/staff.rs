//! Project staff.

use crate::{EMPLOYEE_LIMIT, Employee, Profession, ProjectId, ProjectStore, SelectedUser};
use kurator_error::{
    KuratorResult, LimitError, LimitKind, NotFoundError, NotFoundErrorKind, ValidationError,
    ValidationErrorKind,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

/// Whether a project with `count` staff rows accepts another one.
pub const fn accepts_employee(count: usize) -> bool {
    count < EMPLOYEE_LIMIT
}

/// Assigns and removes staff.
#[derive(Clone)]
pub struct StaffService {
    store: Arc<dyn ProjectStore>,
}

impl StaffService {
    /// Service over a store.
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Staff of the project.
    pub async fn list(&self, project: ProjectId) -> KuratorResult<Vec<Employee>> {
        self.store.employees(project).await
    }

    /// Professions with at least one staff member, in declaration order.
    pub async fn staffed_professions(&self, project: ProjectId) -> KuratorResult<Vec<Profession>> {
        let professions: BTreeSet<Profession> = self
            .store
            .employees(project)
            .await?
            .into_iter()
            .map(|employee| employee.profession)
            .collect();
        Ok(professions.into_iter().collect())
    }

    /// Assign `user` to `profession`. Assigning an existing pair is a no-op.
    #[instrument(skip(self), fields(project_id = %project, user_id = %user.id, %profession))]
    pub async fn assign(
        &self,
        project: ProjectId,
        user: SelectedUser,
        profession: Profession,
    ) -> KuratorResult<Employee> {
        if user.bot {
            Err(ValidationError::new(ValidationErrorKind::BotUser))?
        }
        if self.store.project(project).await?.is_none() {
            Err(NotFoundError::new(NotFoundErrorKind::Project(project.get())))?
        }

        let staff = self.store.employees(project).await?;
        let exists = staff
            .iter()
            .any(|e| e.user_id == user.id && e.profession == profession);
        if !exists && !accepts_employee(staff.len()) {
            Err(LimitError::new(LimitKind::Staff, EMPLOYEE_LIMIT))?
        }

        let employee = self.store.upsert_employee(project, user.id, profession).await?;
        info!(employee_id = %employee.id, "Assigned employee");
        Ok(employee)
    }

    /// Remove every staff member holding `profession`.
    #[instrument(skip(self), fields(project_id = %project, %profession))]
    pub async fn remove_profession(
        &self,
        project: ProjectId,
        profession: Profession,
    ) -> KuratorResult<usize> {
        let removed = self.store.delete_employees(project, profession).await?;
        info!(removed, "Removed employees");
        Ok(removed)
    }
}
