//! Query composition for `acciones`.
//!
//! Parent rows (aplicación, sección) are batch-loaded separately through
//! `aplicacion::load_by_ids` / `seccion::load_by_ids` rather than joined,
//! so the dynamic ordering stays on a single boxed query.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::like::{contains_pattern, escape_like_pattern};
use crate::db::pagination::{PageRequest, SortDir};
use crate::db::schema::acciones;
use crate::model::accion::{Accion, AccionChangeset, NewAccion};

/// ## Summary
/// Returns a query over non-deleted acciones.
#[must_use]
pub fn activas() -> acciones::BoxedQuery<'static, diesel::pg::Pg> {
    acciones::table
        .filter(acciones::deleted_at.is_null())
        .into_boxed()
}

fn apply_order(
    query: acciones::BoxedQuery<'static, diesel::pg::Pg>,
    request: &PageRequest,
) -> acciones::BoxedQuery<'static, diesel::pg::Pg> {
    // Tie-break on id so rows with equal sort keys keep a stable position
    // across pages.
    let query = match (request.sort_by.as_str(), request.sort_dir) {
        ("createdAt" | "created_at", SortDir::Asc) => query.order(acciones::created_at.asc()),
        ("createdAt" | "created_at", SortDir::Desc) => query.order(acciones::created_at.desc()),
        ("updatedAt" | "updated_at", SortDir::Asc) => query.order(acciones::updated_at.asc()),
        ("updatedAt" | "updated_at", SortDir::Desc) => query.order(acciones::updated_at.desc()),
        (_, SortDir::Asc) => query.order(acciones::nombre.asc()),
        (_, SortDir::Desc) => query.order(acciones::nombre.desc()),
    };
    query.then_order_by(acciones::id.asc())
}

async fn page_of(
    conn: &mut DbConnection<'_>,
    build: impl Fn() -> acciones::BoxedQuery<'static, diesel::pg::Pg>,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    let total = build().count().get_result(conn).await?;
    let rows = apply_order(build(), request)
        .offset(request.offset())
        .limit(request.limit())
        .select(Accion::as_select())
        .load(conn)
        .await?;
    Ok((rows, total))
}

/// ## Summary
/// Finds a non-deleted acción by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_active_by_id(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<Accion>> {
    activas()
        .filter(acciones::id.eq(id))
        .select(Accion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds an acción by id, including soft-deleted rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id_any(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Accion>> {
    acciones::table
        .filter(acciones::id.eq(id))
        .select(Accion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Checks whether a non-deleted acción with the same case-insensitive nombre
/// exists under the (aplicación, sección) pair, optionally excluding one id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    aplicacion_id: Uuid,
    seccion_id: Uuid,
    excluded: Option<Uuid>,
) -> QueryResult<bool> {
    let mut query = activas()
        .filter(acciones::nombre.ilike(escape_like_pattern(nombre)))
        .filter(acciones::aplicacion_id.eq(aplicacion_id))
        .filter(acciones::seccion_id.eq(seccion_id));
    if let Some(excluded) = excluded {
        query = query.filter(acciones::id.ne(excluded));
    }
    diesel::select(diesel::dsl::exists(query))
        .get_result(conn)
        .await
}

/// ## Summary
/// Lists acciones activas ordered by nombre.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Accion>> {
    activas()
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of acciones activas plus the total count.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_activas(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    page_of(conn, activas, request).await
}

/// ## Summary
/// Searches acciones activas by nombre substring, case-insensitive.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn search_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> QueryResult<Vec<Accion>> {
    activas()
        .filter(acciones::nombre.ilike(contains_pattern(nombre)))
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of acciones activas filtered by nombre substring.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    let pattern = contains_pattern(nombre);
    page_of(
        conn,
        || activas().filter(acciones::nombre.ilike(pattern.clone())),
        request,
    )
    .await
}

/// ## Summary
/// Loads one page of acciones activas matching the text in nombre or
/// descripción.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_by_texto(
    conn: &mut DbConnection<'_>,
    texto: &str,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    let pattern = contains_pattern(texto);
    page_of(
        conn,
        || {
            activas().filter(
                acciones::nombre
                    .ilike(pattern.clone())
                    .or(acciones::descripcion.ilike(pattern.clone())),
            )
        },
        request,
    )
    .await
}

/// ## Summary
/// Searches acciones activas matching the text in nombre or descripción.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn search_by_texto(conn: &mut DbConnection<'_>, texto: &str) -> QueryResult<Vec<Accion>> {
    let pattern = contains_pattern(texto);
    activas()
        .filter(
            acciones::nombre
                .ilike(pattern.clone())
                .or(acciones::descripcion.ilike(pattern)),
        )
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Lists acciones activas of an aplicación.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_by_aplicacion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
) -> QueryResult<Vec<Accion>> {
    activas()
        .filter(acciones::aplicacion_id.eq(aplicacion_id))
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of acciones activas of an aplicación.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_by_aplicacion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    page_of(
        conn,
        || activas().filter(acciones::aplicacion_id.eq(aplicacion_id)),
        request,
    )
    .await
}

/// ## Summary
/// Lists acciones activas of a sección.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_by_seccion(
    conn: &mut DbConnection<'_>,
    seccion_id: Uuid,
) -> QueryResult<Vec<Accion>> {
    activas()
        .filter(acciones::seccion_id.eq(seccion_id))
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of acciones activas of a sección.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_by_seccion(
    conn: &mut DbConnection<'_>,
    seccion_id: Uuid,
    request: &PageRequest,
) -> QueryResult<(Vec<Accion>, i64)> {
    page_of(
        conn,
        || activas().filter(acciones::seccion_id.eq(seccion_id)),
        request,
    )
    .await
}

/// ## Summary
/// Lists acciones activas of an (aplicación, sección) pair.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_by_aplicacion_y_seccion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
    seccion_id: Uuid,
) -> QueryResult<Vec<Accion>> {
    activas()
        .filter(acciones::aplicacion_id.eq(aplicacion_id))
        .filter(acciones::seccion_id.eq(seccion_id))
        .order(acciones::nombre.asc())
        .then_order_by(acciones::id.asc())
        .select(Accion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Inserts an acción and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(conn: &mut DbConnection<'_>, nueva: &NewAccion<'_>) -> QueryResult<Accion> {
    diesel::insert_into(acciones::table)
        .values(nueva)
        .returning(Accion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a changeset to an acción and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    cambios: &AccionChangeset<'_>,
) -> QueryResult<Accion> {
    diesel::update(acciones::table.filter(acciones::id.eq(id)))
        .set((cambios, acciones::updated_at.eq(diesel::dsl::now)))
        .returning(Accion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Marks an acción as deleted. Returns the number of affected rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn soft_delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::update(
        acciones::table
            .filter(acciones::id.eq(id))
            .filter(acciones::deleted_at.is_null()),
    )
    .set((
        acciones::deleted_at.eq(diesel::dsl::now),
        acciones::updated_at.eq(diesel::dsl::now),
    ))
    .execute(conn)
    .await
}

/// ## Summary
/// Clears `deleted_at` on an acción and returns the restored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Accion> {
    diesel::update(acciones::table.filter(acciones::id.eq(id)))
        .set((
            acciones::deleted_at.eq(None::<chrono::DateTime<chrono::Utc>>),
            acciones::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Accion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts acciones activas.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    activas().count().get_result(conn).await
}

/// ## Summary
/// Counts acciones activas of an aplicación.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_by_aplicacion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
) -> QueryResult<i64> {
    activas()
        .filter(acciones::aplicacion_id.eq(aplicacion_id))
        .count()
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts acciones activas of a sección.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_by_seccion(conn: &mut DbConnection<'_>, seccion_id: Uuid) -> QueryResult<i64> {
    activas()
        .filter(acciones::seccion_id.eq(seccion_id))
        .count()
        .get_result(conn)
        .await
}
