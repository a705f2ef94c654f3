//! Transaction helper for database operations.
//!
//! Diesel-async provides built-in transaction support through the
//! `AsyncConnection::transaction` method. Wrap multi-statement service
//! operations in a closure:
//!
//! ```rust,ignore
//! use diesel_async::scoped_futures::ScopedFutureExt;
//! use crate::db::transaction::with_transaction;
//!
//! with_transaction(conn, |conn| async move {
//!     let app = query::aplicacion::find_active_by_id(conn, id).await?;
//!     query::accion::insert(conn, &nueva).await
//! }.scope_boxed()).await?;
//! ```

use diesel_async::{AsyncConnection, scoped_futures::ScopedBoxFuture};

use crate::db::connection::DbConnection;

/// ## Summary
/// Runs a database transaction and returns the closure result.
///
/// Generic over the error type so callers can run with their own domain
/// error, as long as a plain diesel error (begin/commit failures) can be
/// converted into it.
///
/// ## Errors
/// Returns any error produced by the closure, or errors raised while starting
/// or committing the transaction.
pub async fn with_transaction<'b, 'pool: 'b, T, E, F>(
    conn: &mut DbConnection<'pool>,
    callback: F,
) -> Result<T, E>
where
    F: for<'r> FnOnce(&'r mut DbConnection<'pool>) -> ScopedBoxFuture<'b, 'r, Result<T, E>>
        + Send
        + 'b,
    T: Send + 'b,
    E: From<diesel::result::Error> + Send + 'b,
{
    conn.transaction::<_, E, _>(callback).await
}
