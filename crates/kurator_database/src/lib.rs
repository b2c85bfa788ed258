//! PostgreSQL persistence for Kurator.
//!
//! Implements [`kurator_core::ProjectStore`] on top of diesel with an r2d2
//! connection pool. Diesel is synchronous, so every call runs on the blocking
//! thread pool.

#![forbid(unsafe_code)]

mod connection;
mod models;
pub mod schema;
mod store;

pub use connection::{PgPool, create_pool, migrate, run_migrations};
pub use models::{
    BindingChangeset, CuratorRow, EmployeeRow, NewCuratorRow, NewEmployeeRow, NewPlatformRow,
    NewProjectRow, PlatformRow, ProjectRow, SuperRoleRow,
};
pub use store::PostgresProjectStore;

/// Result type for diesel calls.
pub type DatabaseResult<T> = Result<T, kurator_error::DatabaseError>;
