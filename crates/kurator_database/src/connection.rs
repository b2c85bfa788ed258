//! Connection pool and migrations.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use kurator_error::{DatabaseError, DatabaseErrorKind};
use tracing::{info, instrument};

/// Pooled PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Build a connection pool of at most `max_size` connections.
#[instrument(skip(database_url))]
pub fn create_pool(database_url: &str, max_size: u32) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    info!("Database pool ready");
    Ok(pool)
}

/// Run pending migrations, returning the versions applied.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), "Applied migrations");
    Ok(applied)
}

/// Run pending migrations on a pooled connection off the async runtime.
pub async fn migrate(pool: PgPool) -> DatabaseResult<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)
    })
    .await
    .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?
}
