//! Diesel row types and their conversion into domain records.

use crate::schema::{curators, employees, platforms, projects, super_roles};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use kurator_core::{
    ChannelId, Curator, CuratorId, Employee, EmployeeId, GuildId, MessageId, Platform, PlatformId,
    Profession, Project, ProjectId, PublishBinding, RoleId, SuperRole, UserId,
};
use kurator_error::{DatabaseError, DatabaseErrorKind};

/// Snowflakes are stored as signed BIGINT.
pub(crate) fn to_db_id(id: u64) -> i64 {
    id as i64
}

pub(crate) fn from_db_id(id: i64) -> u64 {
    id as u64
}

/// Database row for the projects table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: i32,
    pub guild_id: i64,
    pub title: String,
    pub poster: String,
    pub channel_id: Option<i64>,
    pub message_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProjectRow {
    /// Combine with the curator row loaded alongside.
    pub fn into_project(self, curator: Option<CuratorRow>) -> Project {
        let binding = PublishBinding::from_parts(
            self.channel_id.map(|id| ChannelId(from_db_id(id))),
            self.message_id.map(|id| MessageId(from_db_id(id))),
            self.branch_id.map(|id| ChannelId(from_db_id(id))),
        );
        Project {
            id: ProjectId(self.id),
            guild_id: GuildId(from_db_id(self.guild_id)),
            title: self.title,
            poster: self.poster,
            binding,
            curator: curator.map(Curator::from),
        }
    }
}

/// Insertable struct for the projects table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    pub guild_id: i64,
    pub title: String,
    pub poster: String,
}

/// Binding columns written together.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects, treat_none_as_null = true)]
pub struct BindingChangeset {
    pub channel_id: Option<i64>,
    pub message_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl BindingChangeset {
    /// Changeset setting or clearing all three binding columns.
    pub fn new(binding: Option<PublishBinding>, now: NaiveDateTime) -> Self {
        Self {
            channel_id: binding.map(|b| to_db_id(b.channel_id.get())),
            message_id: binding.map(|b| to_db_id(b.message_id.get())),
            branch_id: binding.map(|b| to_db_id(b.branch_id.get())),
            updated_at: now,
        }
    }
}

/// Database row for the curators table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(table_name = curators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CuratorRow {
    pub id: i32,
    pub guild_id: i64,
    pub user_id: i64,
    pub project_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<CuratorRow> for Curator {
    fn from(row: CuratorRow) -> Self {
        Curator {
            id: CuratorId(row.id),
            guild_id: GuildId(from_db_id(row.guild_id)),
            user_id: UserId(from_db_id(row.user_id)),
            project_id: ProjectId(row.project_id),
        }
    }
}

/// Insertable struct for the curators table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = curators)]
pub struct NewCuratorRow {
    pub guild_id: i64,
    pub user_id: i64,
    pub project_id: i32,
}

/// Database row for the employees table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i64,
    pub profession: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DatabaseError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let profession = row.profession.parse::<Profession>().map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "Unknown profession in employees.{}: {}",
                row.id, row.profession
            )))
        })?;
        Ok(Employee {
            id: EmployeeId(row.id),
            project_id: ProjectId(row.project_id),
            user_id: UserId(from_db_id(row.user_id)),
            profession,
        })
    }
}

/// Insertable struct for the employees table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow {
    pub project_id: i32,
    pub user_id: i64,
    pub profession: String,
}

/// Database row for the platforms table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(table_name = platforms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlatformRow {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub url: String,
    pub created_at: NaiveDateTime,
}

impl From<PlatformRow> for Platform {
    fn from(row: PlatformRow) -> Self {
        Platform {
            id: PlatformId(row.id),
            project_id: ProjectId(row.project_id),
            name: row.name,
            url: row.url,
        }
    }
}

/// Insertable struct for the platforms table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = platforms)]
pub struct NewPlatformRow {
    pub project_id: i32,
    pub name: String,
    pub url: String,
}

/// Database row for the super_roles table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = super_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SuperRoleRow {
    pub guild_id: i64,
    pub role_id: i64,
    pub updated_at: NaiveDateTime,
}

impl From<SuperRoleRow> for SuperRole {
    fn from(row: SuperRoleRow) -> Self {
        SuperRole {
            guild_id: GuildId(from_db_id(row.guild_id)),
            role_id: RoleId(from_db_id(row.role_id)),
        }
    }
}
