//! Persistence layer for the SGCA backend.
//!
//! Diesel schema, row models, connection pool and the per-entity query
//! modules. Every read defaults to `deleted_at IS NULL`; the only
//! include-deleted lookups are the ones backing `restaurar`.

pub mod db;
pub mod error;
pub mod model;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies all pending migrations over a blocking connection.
///
/// Intended to be called from `spawn_blocking` during startup.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration
/// fails to apply.
pub fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    use diesel::Connection;

    let mut conn = diesel::PgConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;

    Ok(())
}
