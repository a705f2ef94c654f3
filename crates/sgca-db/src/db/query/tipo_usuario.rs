//! Query composition for `tipo_usuario`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::enums::EstadoTipoUsuario;
use crate::db::like::{contains_pattern, escape_like_pattern};
use crate::db::pagination::{PageRequest, SortDir};
use crate::db::schema::tipo_usuario;
use crate::model::tipo_usuario::{NewTipoUsuario, TipoUsuario, TipoUsuarioChangeset};

/// Optional AND-composed filters for the paginated listing.
#[derive(Debug, Clone, Default)]
pub struct TipoUsuarioFilter {
    pub nombre: Option<String>,
    pub aplicacion_id: Option<Uuid>,
    pub estado: Option<EstadoTipoUsuario>,
}

/// ## Summary
/// Returns a query over non-deleted tipos de usuario.
#[must_use]
pub fn activos() -> tipo_usuario::BoxedQuery<'static, diesel::pg::Pg> {
    tipo_usuario::table
        .filter(tipo_usuario::deleted_at.is_null())
        .into_boxed()
}

fn filtered(filter: &TipoUsuarioFilter) -> tipo_usuario::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = activos();
    if let Some(nombre) = &filter.nombre {
        query = query.filter(tipo_usuario::nombre.ilike(contains_pattern(nombre)));
    }
    if let Some(aplicacion_id) = filter.aplicacion_id {
        query = query.filter(tipo_usuario::aplicacion_id.eq(aplicacion_id));
    }
    if let Some(estado) = filter.estado {
        query = query.filter(tipo_usuario::estado.eq(estado));
    }
    query
}

fn apply_order(
    query: tipo_usuario::BoxedQuery<'static, diesel::pg::Pg>,
    request: &PageRequest,
) -> tipo_usuario::BoxedQuery<'static, diesel::pg::Pg> {
    // Tie-break on id so rows with equal sort keys keep a stable position
    // across pages.
    let query = match (request.sort_by.as_str(), request.sort_dir) {
        ("createdAt" | "created_at", SortDir::Asc) => query.order(tipo_usuario::created_at.asc()),
        ("createdAt" | "created_at", SortDir::Desc) => query.order(tipo_usuario::created_at.desc()),
        ("updatedAt" | "updated_at", SortDir::Asc) => query.order(tipo_usuario::updated_at.asc()),
        ("updatedAt" | "updated_at", SortDir::Desc) => query.order(tipo_usuario::updated_at.desc()),
        (_, SortDir::Asc) => query.order(tipo_usuario::nombre.asc()),
        (_, SortDir::Desc) => query.order(tipo_usuario::nombre.desc()),
    };
    query.then_order_by(tipo_usuario::id.asc())
}

/// ## Summary
/// Finds a non-deleted tipo de usuario by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_active_by_id(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<TipoUsuario>> {
    activos()
        .filter(tipo_usuario::id.eq(id))
        .select(TipoUsuario::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds a tipo de usuario by id, including soft-deleted rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id_any(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<TipoUsuario>> {
    tipo_usuario::table
        .filter(tipo_usuario::id.eq(id))
        .select(TipoUsuario::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Checks whether a non-deleted tipo de usuario with the same
/// case-insensitive nombre exists under the aplicación, optionally excluding
/// one id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn exists_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    aplicacion_id: Uuid,
    excluded: Option<Uuid>,
) -> QueryResult<bool> {
    let mut query = activos()
        .filter(tipo_usuario::nombre.ilike(escape_like_pattern(nombre)))
        .filter(tipo_usuario::aplicacion_id.eq(aplicacion_id));
    if let Some(excluded) = excluded {
        query = query.filter(tipo_usuario::id.ne(excluded));
    }
    diesel::select(diesel::dsl::exists(query))
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads one page of tipos de usuario matching the filters plus the total
/// count.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn page_filtered(
    conn: &mut DbConnection<'_>,
    filter: &TipoUsuarioFilter,
    request: &PageRequest,
) -> QueryResult<(Vec<TipoUsuario>, i64)> {
    let total = filtered(filter).count().get_result(conn).await?;
    let rows = apply_order(filtered(filter), request)
        .offset(request.offset())
        .limit(request.limit())
        .select(TipoUsuario::as_select())
        .load(conn)
        .await?;
    Ok((rows, total))
}

/// ## Summary
/// Inserts a tipo de usuario and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    nuevo: &NewTipoUsuario<'_>,
) -> QueryResult<TipoUsuario> {
    diesel::insert_into(tipo_usuario::table)
        .values(nuevo)
        .returning(TipoUsuario::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a changeset to a tipo de usuario and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    cambios: &TipoUsuarioChangeset<'_>,
) -> QueryResult<TipoUsuario> {
    diesel::update(tipo_usuario::table.filter(tipo_usuario::id.eq(id)))
        .set((cambios, tipo_usuario::updated_at.eq(diesel::dsl::now)))
        .returning(TipoUsuario::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Marks a tipo de usuario as deleted. Returns the number of affected rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn soft_delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::update(
        tipo_usuario::table
            .filter(tipo_usuario::id.eq(id))
            .filter(tipo_usuario::deleted_at.is_null()),
    )
    .set((
        tipo_usuario::deleted_at.eq(diesel::dsl::now),
        tipo_usuario::updated_at.eq(diesel::dsl::now),
    ))
    .execute(conn)
    .await
}

/// ## Summary
/// Clears `deleted_at` on a tipo de usuario and returns the restored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<TipoUsuario> {
    diesel::update(tipo_usuario::table.filter(tipo_usuario::id.eq(id)))
        .set((
            tipo_usuario::deleted_at.eq(None::<chrono::DateTime<chrono::Utc>>),
            tipo_usuario::updated_at.eq(diesel::dsl::now),
        ))
        .returning(TipoUsuario::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Sets the estado of a tipo de usuario and returns the updated row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn set_estado(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    estado: EstadoTipoUsuario,
) -> QueryResult<TipoUsuario> {
    diesel::update(tipo_usuario::table.filter(tipo_usuario::id.eq(id)))
        .set((
            tipo_usuario::estado.eq(estado),
            tipo_usuario::updated_at.eq(diesel::dsl::now),
        ))
        .returning(TipoUsuario::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts tipos de usuario activos.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_activos(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
    activos().count().get_result(conn).await
}

/// ## Summary
/// Counts tipos de usuario activos of an aplicación.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_by_aplicacion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
) -> QueryResult<i64> {
    activos()
        .filter(tipo_usuario::aplicacion_id.eq(aplicacion_id))
        .count()
        .get_result(conn)
        .await
}

/// ## Summary
/// Counts tipos de usuario activos with the given estado.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_by_estado(
    conn: &mut DbConnection<'_>,
    estado: EstadoTipoUsuario,
) -> QueryResult<i64> {
    activos()
        .filter(tipo_usuario::estado.eq(estado))
        .count()
        .get_result(conn)
        .await
}
