//! Query composition for `aplicaciones`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::enums::EstadoAplicacion;
use crate::db::like::contains_pattern;
use crate::db::pagination::{PageRequest, SortDir};
use crate::db::schema::aplicaciones;
use crate::model::aplicacion::{Aplicacion, AplicacionChangeset, NewAplicacion};

/// ## Summary
/// Returns a query over non-deleted aplicaciones.
#[must_use]
pub fn not_deleted() -> aplicaciones::BoxedQuery<'static, diesel::pg::Pg> {
    aplicaciones::table
        .filter(aplicaciones::deleted_at.is_null())
        .into_boxed()
}

/// ## Summary
/// Returns a query over aplicaciones with `estado = ACTIVO` and not deleted.
#[must_use]
pub fn activas() -> aplicaciones::BoxedQuery<'static, diesel::pg::Pg> {
    not_deleted().filter(aplicaciones::estado.eq(EstadoAplicacion::Activo))
}

fn apply_order(
    query: aplicaciones::BoxedQuery<'static, diesel::pg::Pg>,
    request: &PageRequest,
) -> aplicaciones::BoxedQuery<'static, diesel::pg::Pg> {
    // Tie-break on id so rows with equal sort keys keep a stable position
    // across pages.
    let query = match (request.sort_by.as_str(), request.sort_dir) {
        ("createdAt" | "created_at", SortDir::Asc) => query.order(aplicaciones::created_at.asc()),
        ("createdAt" | "created_at", SortDir::Desc) => query.order(aplicaciones::created_at.desc()),
        ("updatedAt" | "updated_at", SortDir::Asc) => query.order(aplicaciones::updated_at.asc()),
        ("updatedAt" | "updated_at", SortDir::Desc) => query.order(aplicaciones::updated_at.desc()),
        (_, SortDir::Asc) => query.order(aplicaciones::nombre.asc()),
        (_, SortDir::Desc) => query.order(aplicaciones::nombre.desc()),
    };
    query.then_order_by(aplicaciones::id.asc())
}

/// ## Summary
/// Finds a non-deleted aplicación by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_active_by_id(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<Aplicacion>> {
    not_deleted()
        .filter(aplicaciones::id.eq(id))
        .select(Aplicacion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds an aplicación by id, including soft-deleted rows.
///
/// Backs `restaurar`, which must locate a deleted row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id_any(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<Aplicacion>> {
    aplicaciones::table
        .filter(aplicaciones::id.eq(id))
        .select(Aplicacion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds a non-deleted aplicación by its llave identificadora.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_active_by_llave(
    conn: &mut DbConnection<'_>,
    llave: &str,
) -> QueryResult<Option<Aplicacion>> {
    not_deleted()
        .filter(aplicaciones::llave_identificadora.eq(llave))
        .select(Aplicacion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Checks whether any aplicación (deleted included) uses the llave.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_llave(conn: &mut DbConnection<'_>, llave: &str) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        aplicaciones::table.filter(aplicaciones::llave_identificadora.eq(llave)),
    ))
    .get_result(conn)
    .await
}

/// ## Summary
/// Checks whether another aplicación uses the llave.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_llave_excluding(
    conn: &mut DbConnection<'_>,
    llave: &str,
    excluded: Uuid,
) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        aplicaciones::table
            .filter(aplicaciones::llave_identificadora.eq(llave))
            .filter(aplicaciones::id.ne(excluded)),
    ))
    .get_result(conn)
    .await
}

/// ## Summary
/// Checks whether any aplicación (deleted included) uses the URL.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_url(conn: &mut DbConnection<'_>, url: &str) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        aplicaciones::table.filter(aplicaciones::url.eq(url)),
    ))
    .get_result(conn)
    .await
}

/// ## Summary
/// Checks whether another aplicación uses the URL.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_url_excluding(
    conn: &mut DbConnection<'_>,
    url: &str,
    excluded: Uuid,
) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        aplicaciones::table
            .filter(aplicaciones::url.eq(url))
            .filter(aplicaciones::id.ne(excluded)),
    ))
    .get_result(conn)
    .await
}

/// ## Summary
/// Lists aplicaciones activas ordered by nombre.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Aplicacion>> {
    activas()
        .order(aplicaciones::nombre.asc())
        .then_order_by(aplicaciones::id.asc())
        .select(Aplicacion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of aplicaciones activas plus the total count.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_activas(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> QueryResult<(Vec<Aplicacion>, i64)> {
    let total = activas().count().get_result(conn).await?;
    let rows = apply_order(activas(), request)
        .offset(request.offset())
        .limit(request.limit())
        .select(Aplicacion::as_select())
        .load(conn)
        .await?;
    Ok((rows, total))
}

/// ## Summary
/// Searches non-deleted aplicaciones by nombre substring, case-insensitive.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn search_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> QueryResult<Vec<Aplicacion>> {
    not_deleted()
        .filter(aplicaciones::nombre.ilike(contains_pattern(nombre)))
        .order(aplicaciones::nombre.asc())
        .then_order_by(aplicaciones::id.asc())
        .select(Aplicacion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Inserts an aplicación and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    nueva: &NewAplicacion<'_>,
) -> QueryResult<Aplicacion> {
    diesel::insert_into(aplicaciones::table)
        .values(nueva)
        .returning(Aplicacion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a changeset to an aplicación and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    cambios: &AplicacionChangeset<'_>,
) -> QueryResult<Aplicacion> {
    diesel::update(aplicaciones::table.filter(aplicaciones::id.eq(id)))
        .set((cambios, aplicaciones::updated_at.eq(diesel::dsl::now)))
        .returning(Aplicacion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Marks an aplicación as deleted. Returns the number of affected rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn soft_delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::update(
        aplicaciones::table
            .filter(aplicaciones::id.eq(id))
            .filter(aplicaciones::deleted_at.is_null()),
    )
    .set((
        aplicaciones::deleted_at.eq(diesel::dsl::now),
        aplicaciones::updated_at.eq(diesel::dsl::now),
    ))
    .execute(conn)
    .await
}

/// ## Summary
/// Clears `deleted_at` on an aplicación and returns the restored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Aplicacion> {
    diesel::update(aplicaciones::table.filter(aplicaciones::id.eq(id)))
        .set((
            aplicaciones::deleted_at.eq(None::<chrono::DateTime<chrono::Utc>>),
            aplicaciones::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Aplicacion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Sets the estado of an aplicación and returns the updated row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn set_estado(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    estado: EstadoAplicacion,
) -> QueryResult<Aplicacion> {
    diesel::update(aplicaciones::table.filter(aplicaciones::id.eq(id)))
        .set((
            aplicaciones::estado.eq(estado),
            aplicaciones::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Aplicacion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts aplicaciones activas.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    activas().count().get_result(conn).await
}

/// ## Summary
/// Loads aplicaciones by id, deleted included, for embedding parent info.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn load_by_ids(conn: &mut DbConnection<'_>, ids: &[Uuid]) -> QueryResult<Vec<Aplicacion>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    aplicaciones::table
        .filter(aplicaciones::id.eq_any(ids))
        .select(Aplicacion::as_select())
        .load(conn)
        .await
}
