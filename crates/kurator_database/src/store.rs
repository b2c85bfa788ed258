//! [`ProjectStore`] backed by PostgreSQL.

use crate::models::{
    BindingChangeset, CuratorRow, EmployeeRow, NewCuratorRow, NewEmployeeRow, NewPlatformRow,
    NewProjectRow, PlatformRow, ProjectRow, SuperRoleRow, to_db_id,
};
use crate::schema::{curators, employees, platforms, projects, super_roles};
use crate::{DatabaseResult, PgPool};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use kurator_core::{
    Employee, GuildId, MessageId, NewProject, Platform, PlatformId, Profession, Project,
    ProjectId, ProjectStore, PublishBinding, RoleId, SuperRole, UserId,
};
use kurator_error::{
    DatabaseError, DatabaseErrorKind, KuratorResult, NotFoundError, NotFoundErrorKind,
};
use tracing::instrument;

diesel::define_sql_function! {
    /// SQL `lower()`.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Escape `LIKE` wildcards in user input.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn project_not_found(id: ProjectId) -> kurator_error::KuratorError {
    NotFoundError::new(NotFoundErrorKind::Project(id.get())).into()
}

fn load_project(conn: &mut PgConnection, id: i32) -> DatabaseResult<Option<Project>> {
    let row = projects::table
        .left_join(curators::table)
        .filter(projects::id.eq(id))
        .select((ProjectRow::as_select(), Option::<CuratorRow>::as_select()))
        .first::<(ProjectRow, Option<CuratorRow>)>(conn)
        .optional()?;
    Ok(row.map(|(project, curator)| project.into_project(curator)))
}

fn project_exists(conn: &mut PgConnection, id: i32) -> DatabaseResult<bool> {
    Ok(projects::table
        .find(id)
        .select(projects::id)
        .first::<i32>(conn)
        .optional()?
        .is_some())
}

/// Database-backed project store.
#[derive(Clone)]
pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a diesel operation on a pooled connection off the async runtime.
    async fn run<T, F>(&self, op: F) -> KuratorResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?;
        Ok(result?)
    }
}

#[async_trait]
impl ProjectStore for PostgresProjectStore {
    #[instrument(skip(self))]
    async fn super_role(&self, guild: GuildId) -> KuratorResult<Option<SuperRole>> {
        self.run(move |conn| {
            Ok(super_roles::table
                .find(to_db_id(guild.get()))
                .select(SuperRoleRow::as_select())
                .first::<SuperRoleRow>(conn)
                .optional()?
                .map(SuperRole::from))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn upsert_super_role(&self, guild: GuildId, role: RoleId) -> KuratorResult<SuperRole> {
        self.run(move |conn| {
            let row = SuperRoleRow {
                guild_id: to_db_id(guild.get()),
                role_id: to_db_id(role.get()),
                updated_at: now(),
            };
            let saved = diesel::insert_into(super_roles::table)
                .values(&row)
                .on_conflict(super_roles::guild_id)
                .do_update()
                .set((
                    super_roles::role_id.eq(row.role_id),
                    super_roles::updated_at.eq(row.updated_at),
                ))
                .returning(SuperRoleRow::as_returning())
                .get_result::<SuperRoleRow>(conn)?;
            Ok(SuperRole::from(saved))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_super_role(&self, guild: GuildId) -> KuratorResult<bool> {
        self.run(move |conn| {
            let deleted =
                diesel::delete(super_roles::table.find(to_db_id(guild.get()))).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    #[instrument(skip(self, project), fields(guild_id = %project.guild_id))]
    async fn create_project(&self, project: NewProject) -> KuratorResult<Project> {
        self.run(move |conn| {
            let row = diesel::insert_into(projects::table)
                .values(NewProjectRow {
                    guild_id: to_db_id(project.guild_id.get()),
                    title: project.title,
                    poster: project.poster,
                })
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(conn)?;
            Ok(row.into_project(None))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn project(&self, id: ProjectId) -> KuratorResult<Option<Project>> {
        self.run(move |conn| load_project(conn, id.get())).await
    }

    #[instrument(skip(self))]
    async fn project_by_title(
        &self,
        guild: GuildId,
        title: &str,
    ) -> KuratorResult<Option<Project>> {
        let title = title.trim().to_lowercase();
        self.run(move |conn| {
            let row = projects::table
                .left_join(curators::table)
                .filter(projects::guild_id.eq(to_db_id(guild.get())))
                .filter(lower(projects::title).eq(title))
                .select((ProjectRow::as_select(), Option::<CuratorRow>::as_select()))
                .first::<(ProjectRow, Option<CuratorRow>)>(conn)
                .optional()?;
            Ok(row.map(|(project, curator)| project.into_project(curator)))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn project_by_message(&self, message: MessageId) -> KuratorResult<Option<Project>> {
        self.run(move |conn| {
            let row = projects::table
                .left_join(curators::table)
                .filter(projects::message_id.eq(to_db_id(message.get())))
                .select((ProjectRow::as_select(), Option::<CuratorRow>::as_select()))
                .first::<(ProjectRow, Option<CuratorRow>)>(conn)
                .optional()?;
            Ok(row.map(|(project, curator)| project.into_project(curator)))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn search_projects(
        &self,
        guild: GuildId,
        fragment: &str,
        limit: usize,
    ) -> KuratorResult<Vec<Project>> {
        let pattern = like_pattern(fragment);
        self.run(move |conn| {
            let rows = projects::table
                .left_join(curators::table)
                .filter(projects::guild_id.eq(to_db_id(guild.get())))
                .filter(projects::title.ilike(pattern))
                .order(projects::title.asc())
                .limit(limit as i64)
                .select((ProjectRow::as_select(), Option::<CuratorRow>::as_select()))
                .load::<(ProjectRow, Option<CuratorRow>)>(conn)?;
            Ok(rows
                .into_iter()
                .map(|(project, curator)| project.into_project(curator))
                .collect())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_project(&self, id: ProjectId) -> KuratorResult<bool> {
        // Curators, employees and platforms cascade.
        self.run(move |conn| {
            let deleted = diesel::delete(projects::table.find(id.get())).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn set_binding(
        &self,
        id: ProjectId,
        binding: Option<PublishBinding>,
    ) -> KuratorResult<Project> {
        self.run(move |conn| {
            let updated = diesel::update(projects::table.find(id.get()))
                .set(BindingChangeset::new(binding, now()))
                .execute(conn)?;
            if updated == 0 {
                return Ok(None);
            }
            load_project(conn, id.get())
        })
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    #[instrument(skip(self))]
    async fn unlink_message(&self, message: MessageId) -> KuratorResult<usize> {
        self.run(move |conn| {
            Ok(diesel::update(
                projects::table.filter(projects::message_id.eq(to_db_id(message.get()))),
            )
            .set(BindingChangeset::new(None, now()))
            .execute(conn)?)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn assign_curator(&self, id: ProjectId, user: UserId) -> KuratorResult<Project> {
        self.run(move |conn| {
            conn.transaction::<_, DatabaseError, _>(|conn| {
                let Some(guild_id) = projects::table
                    .find(id.get())
                    .select(projects::guild_id)
                    .first::<i64>(conn)
                    .optional()?
                else {
                    return Ok(None);
                };
                diesel::delete(curators::table.filter(curators::project_id.eq(id.get())))
                    .execute(conn)?;
                diesel::insert_into(curators::table)
                    .values(NewCuratorRow {
                        guild_id,
                        user_id: to_db_id(user.get()),
                        project_id: id.get(),
                    })
                    .execute(conn)?;
                load_project(conn, id.get())
            })
        })
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    #[instrument(skip(self))]
    async fn detach_curator(&self, id: ProjectId) -> KuratorResult<Project> {
        self.run(move |conn| {
            conn.transaction::<_, DatabaseError, _>(|conn| {
                if !project_exists(conn, id.get())? {
                    return Ok(None);
                }
                diesel::delete(curators::table.filter(curators::project_id.eq(id.get())))
                    .execute(conn)?;
                load_project(conn, id.get())
            })
        })
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    #[instrument(skip(self))]
    async fn employees(&self, id: ProjectId) -> KuratorResult<Vec<Employee>> {
        self.run(move |conn| {
            employees::table
                .filter(employees::project_id.eq(id.get()))
                .order(employees::id.asc())
                .select(EmployeeRow::as_select())
                .load::<EmployeeRow>(conn)?
                .into_iter()
                .map(Employee::try_from)
                .collect()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn upsert_employee(
        &self,
        id: ProjectId,
        user: UserId,
        profession: Profession,
    ) -> KuratorResult<Employee> {
        self.run(move |conn| {
            if !project_exists(conn, id.get())? {
                return Ok(None);
            }
            let user_id = to_db_id(user.get());
            diesel::insert_into(employees::table)
                .values(NewEmployeeRow {
                    project_id: id.get(),
                    user_id,
                    profession: profession.as_str().to_string(),
                })
                .on_conflict((
                    employees::project_id,
                    employees::user_id,
                    employees::profession,
                ))
                .do_nothing()
                .execute(conn)?;
            let row = employees::table
                .filter(employees::project_id.eq(id.get()))
                .filter(employees::user_id.eq(user_id))
                .filter(employees::profession.eq(profession.as_str()))
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(conn)?;
            Employee::try_from(row).map(Some)
        })
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete_employees(
        &self,
        id: ProjectId,
        profession: Profession,
    ) -> KuratorResult<usize> {
        self.run(move |conn| {
            Ok(diesel::delete(
                employees::table
                    .filter(employees::project_id.eq(id.get()))
                    .filter(employees::profession.eq(profession.as_str())),
            )
            .execute(conn)?)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn platforms(&self, id: ProjectId) -> KuratorResult<Vec<Platform>> {
        self.run(move |conn| {
            Ok(platforms::table
                .filter(platforms::project_id.eq(id.get()))
                .order(platforms::id.asc())
                .select(PlatformRow::as_select())
                .load::<PlatformRow>(conn)?
                .into_iter()
                .map(Platform::from)
                .collect())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn platform(&self, id: PlatformId) -> KuratorResult<Option<Platform>> {
        self.run(move |conn| {
            Ok(platforms::table
                .find(id.get())
                .select(PlatformRow::as_select())
                .first::<PlatformRow>(conn)
                .optional()?
                .map(Platform::from))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn platform_by_name(
        &self,
        id: ProjectId,
        name: &str,
    ) -> KuratorResult<Option<Platform>> {
        let name = name.trim().to_lowercase();
        self.run(move |conn| {
            Ok(platforms::table
                .filter(platforms::project_id.eq(id.get()))
                .filter(lower(platforms::name).eq(name))
                .select(PlatformRow::as_select())
                .first::<PlatformRow>(conn)
                .optional()?
                .map(Platform::from))
        })
        .await
    }

    #[instrument(skip(self, url))]
    async fn create_platform(
        &self,
        id: ProjectId,
        name: &str,
        url: &str,
    ) -> KuratorResult<Platform> {
        let row = NewPlatformRow {
            project_id: id.get(),
            name: name.to_string(),
            url: url.to_string(),
        };
        self.run(move |conn| {
            if !project_exists(conn, id.get())? {
                return Ok(None);
            }
            let saved = diesel::insert_into(platforms::table)
                .values(row)
                .returning(PlatformRow::as_returning())
                .get_result::<PlatformRow>(conn)?;
            Ok(Some(Platform::from(saved)))
        })
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    #[instrument(skip(self, url))]
    async fn update_platform(
        &self,
        id: PlatformId,
        name: &str,
        url: &str,
    ) -> KuratorResult<Platform> {
        let (name, url) = (name.to_string(), url.to_string());
        self.run(move |conn| {
            Ok(diesel::update(platforms::table.find(id.get()))
                .set((platforms::name.eq(name), platforms::url.eq(url)))
                .returning(PlatformRow::as_returning())
                .get_result::<PlatformRow>(conn)
                .optional()?
                .map(Platform::from))
        })
        .await?
        .ok_or_else(|| NotFoundError::new(NotFoundErrorKind::Platform(id.get())).into())
    }

    #[instrument(skip(self))]
    async fn delete_platform(&self, id: PlatformId) -> KuratorResult<bool> {
        self.run(move |conn| {
            let deleted = diesel::delete(platforms::table.find(id.get())).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" one "), "%one%");
        assert_eq!(like_pattern("100%_x"), "%100\\%\\_x%");
    }
}
