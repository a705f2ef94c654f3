//! Query composition for `secciones`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::like::{contains_pattern, escape_like_pattern};
use crate::db::pagination::{PageRequest, SortDir};
use crate::db::schema::secciones;
use crate::model::seccion::{NewSeccion, Seccion, SeccionChangeset};

/// ## Summary
/// Returns a query over non-deleted secciones.
#[must_use]
pub fn activas() -> secciones::BoxedQuery<'static, diesel::pg::Pg> {
    secciones::table
        .filter(secciones::deleted_at.is_null())
        .into_boxed()
}

fn apply_order(
    query: secciones::BoxedQuery<'static, diesel::pg::Pg>,
    request: &PageRequest,
) -> secciones::BoxedQuery<'static, diesel::pg::Pg> {
    // Tie-break on id so rows with equal sort keys keep a stable position
    // across pages.
    let query = match (request.sort_by.as_str(), request.sort_dir) {
        ("createdAt" | "created_at", SortDir::Asc) => query.order(secciones::created_at.asc()),
        ("createdAt" | "created_at", SortDir::Desc) => query.order(secciones::created_at.desc()),
        ("updatedAt" | "updated_at", SortDir::Asc) => query.order(secciones::updated_at.asc()),
        ("updatedAt" | "updated_at", SortDir::Desc) => query.order(secciones::updated_at.desc()),
        (_, SortDir::Asc) => query.order(secciones::nombre.asc()),
        (_, SortDir::Desc) => query.order(secciones::nombre.desc()),
    };
    query.then_order_by(secciones::id.asc())
}

/// ## Summary
/// Finds a non-deleted sección by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_active_by_id(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<Seccion>> {
    activas()
        .filter(secciones::id.eq(id))
        .select(Seccion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds a sección by id, including soft-deleted rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id_any(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Seccion>> {
    secciones::table
        .filter(secciones::id.eq(id))
        .select(Seccion::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Checks whether a non-deleted sección already uses the nombre,
/// case-insensitive, optionally excluding one id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    excluded: Option<Uuid>,
) -> QueryResult<bool> {
    let mut query = activas().filter(secciones::nombre.ilike(escape_like_pattern(nombre)));
    if let Some(excluded) = excluded {
        query = query.filter(secciones::id.ne(excluded));
    }
    diesel::select(diesel::dsl::exists(query))
        .get_result(conn)
        .await
}

/// ## Summary
/// Lists secciones activas ordered by nombre.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Seccion>> {
    activas()
        .order(secciones::nombre.asc())
        .then_order_by(secciones::id.asc())
        .select(Seccion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of secciones activas plus the total count.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_activas(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> QueryResult<(Vec<Seccion>, i64)> {
    let total = activas().count().get_result(conn).await?;
    let rows = apply_order(activas(), request)
        .offset(request.offset())
        .limit(request.limit())
        .select(Seccion::as_select())
        .load(conn)
        .await?;
    Ok((rows, total))
}

/// ## Summary
/// Searches secciones activas by nombre substring, case-insensitive.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn search_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> QueryResult<Vec<Seccion>> {
    activas()
        .filter(secciones::nombre.ilike(contains_pattern(nombre)))
        .order(secciones::nombre.asc())
        .then_order_by(secciones::id.asc())
        .select(Seccion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads one page of secciones activas filtered by nombre substring.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    request: &PageRequest,
) -> QueryResult<(Vec<Seccion>, i64)> {
    let filtered = || activas().filter(secciones::nombre.ilike(contains_pattern(nombre)));
    let total = filtered().count().get_result(conn).await?;
    let rows = apply_order(filtered(), request)
        .offset(request.offset())
        .limit(request.limit())
        .select(Seccion::as_select())
        .load(conn)
        .await?;
    Ok((rows, total))
}

/// ## Summary
/// Searches secciones activas matching the text in nombre or descripción,
/// case-insensitive.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn search_by_texto(
    conn: &mut DbConnection<'_>,
    texto: &str,
) -> QueryResult<Vec<Seccion>> {
    let pattern = contains_pattern(texto);
    activas()
        .filter(
            secciones::nombre
                .ilike(pattern.clone())
                .or(secciones::descripcion.ilike(pattern)),
        )
        .order(secciones::nombre.asc())
        .then_order_by(secciones::id.asc())
        .select(Seccion::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Inserts a sección and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(conn: &mut DbConnection<'_>, nueva: &NewSeccion<'_>) -> QueryResult<Seccion> {
    diesel::insert_into(secciones::table)
        .values(nueva)
        .returning(Seccion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a changeset to a sección and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    cambios: &SeccionChangeset<'_>,
) -> QueryResult<Seccion> {
    diesel::update(secciones::table.filter(secciones::id.eq(id)))
        .set((cambios, secciones::updated_at.eq(diesel::dsl::now)))
        .returning(Seccion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Marks a sección as deleted. Returns the number of affected rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn soft_delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::update(
        secciones::table
            .filter(secciones::id.eq(id))
            .filter(secciones::deleted_at.is_null()),
    )
    .set((
        secciones::deleted_at.eq(diesel::dsl::now),
        secciones::updated_at.eq(diesel::dsl::now),
    ))
    .execute(conn)
    .await
}

/// ## Summary
/// Clears `deleted_at` on a sección and returns the restored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Seccion> {
    diesel::update(secciones::table.filter(secciones::id.eq(id)))
        .set((
            secciones::deleted_at.eq(None::<chrono::DateTime<chrono::Utc>>),
            secciones::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Seccion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts secciones activas.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    activas().count().get_result(conn).await
}

/// ## Summary
/// Loads secciones by id, deleted included, for embedding parent info.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn load_by_ids(conn: &mut DbConnection<'_>, ids: &[Uuid]) -> QueryResult<Vec<Seccion>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    secciones::table
        .filter(secciones::id.eq_any(ids))
        .select(Seccion::as_select())
        .load(conn)
        .await
}
