//! Reglas de negocio de secciones.
//!
//! El nombre es único entre secciones activas, sin distinguir mayúsculas.
//! Restaurar una sección revalida esa unicidad antes de limpiar `deleted_at`.

use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use sgca_db::db::connection::DbConnection;
use sgca_db::db::pagination::{Page, PageRequest};
use sgca_db::db::query::seccion as query;
use sgca_db::db::transaction::with_transaction;
use sgca_db::model::seccion::{NewSeccion, SeccionChangeset};

use crate::dto::normalized_descripcion;
use crate::dto::seccion::{
    DisponibilidadNombre, EstadisticasSeccion, GuardarSeccion, SeccionResponse,
};
use crate::error::{ServiceError, ServiceResult};

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Sección no encontrada con ID: {id}"))
}

fn nombre_en_uso(nombre: &str) -> ServiceError {
    ServiceError::Conflict(format!("Ya existe una sección con el nombre: {nombre}"))
}

/// ## Summary
/// Creates a sección after probing case-insensitive name uniqueness.
///
/// ## Errors
/// `Validation` on malformed payload, `Conflict` when the nombre is taken.
pub async fn create<'a>(
    conn: &mut DbConnection<'a>,
    payload: &'a GuardarSeccion,
) -> ServiceResult<SeccionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());

    with_transaction(conn, |tx| {
        async move {
            if query::exists_by_nombre(tx, nombre, None).await? {
                return Err(nombre_en_uso(nombre));
            }
            let nueva = NewSeccion {
                nombre,
                descripcion,
            };
            let row = query::insert(tx, &nueva).await?;
            tracing::info!(id = %row.id, "sección creada");
            Ok(SeccionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Fetches a non-deleted sección by id.
///
/// ## Errors
/// `NotFound` when the id does not resolve to an active row.
pub async fn get_by_id(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<SeccionResponse> {
    let row = query::find_active_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into())
}

/// ## Summary
/// Lists secciones activas ordered by nombre.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<SeccionResponse>> {
    let rows = query::list_activas(conn).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// ## Summary
/// Lists secciones activas as one page with totals.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_paginado(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> ServiceResult<Page<SeccionResponse>> {
    let (rows, total) = query::page_activas(conn, request).await?;
    Ok(Page::new(rows, request, total).map(Into::into))
}

/// ## Summary
/// Searches by nombre substring; a blank input falls back to the active list.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> ServiceResult<Vec<SeccionResponse>> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return list_activas(conn).await;
    }
    let rows = query::search_by_nombre(conn, nombre).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// ## Summary
/// One page of secciones whose nombre contains the substring.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_nombre_paginado(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    request: &PageRequest,
) -> ServiceResult<Page<SeccionResponse>> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return list_paginado(conn, request).await;
    }
    let (rows, total) = query::page_by_nombre(conn, nombre, request).await?;
    Ok(Page::new(rows, request, total).map(Into::into))
}

/// ## Summary
/// Searches secciones matching the text in nombre or descripción.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_texto(
    conn: &mut DbConnection<'_>,
    texto: &str,
) -> ServiceResult<Vec<SeccionResponse>> {
    let texto = texto.trim();
    if texto.is_empty() {
        return list_activas(conn).await;
    }
    let rows = query::search_by_texto(conn, texto).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// ## Summary
/// Updates a sección, re-probing name uniqueness only when the nombre
/// changed, case-insensitive.
///
/// ## Errors
/// `NotFound` on a missing row, `Conflict` when the new nombre is taken,
/// `Validation` on malformed payload.
pub async fn update<'a>(
    conn: &mut DbConnection<'a>,
    id: Uuid,
    payload: &'a GuardarSeccion,
) -> ServiceResult<SeccionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());

    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;

            if !nombre.eq_ignore_ascii_case(&existing.nombre)
                && query::exists_by_nombre(tx, nombre, Some(id)).await?
            {
                return Err(nombre_en_uso(nombre));
            }

            let cambios = SeccionChangeset {
                nombre,
                descripcion,
            };
            let row = query::update(tx, id, &cambios).await?;
            tracing::info!(id = %row.id, "sección actualizada");
            Ok(SeccionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Soft-deletes a sección.
///
/// ## Errors
/// `NotFound` when the row is absent or already deleted.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    let affected = query::soft_delete(conn, id).await?;
    if affected == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id = %id, "sección eliminada");
    Ok(())
}

/// ## Summary
/// Restores a soft-deleted sección, re-validating name uniqueness against
/// the remaining active rows.
///
/// ## Errors
/// `NotFound` on an unknown id, `InvalidState` when the row is not deleted,
/// `Conflict` when the nombre was taken while the row was deleted.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<SeccionResponse> {
    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_by_id_any(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            if !existing.is_deleted() {
                return Err(ServiceError::InvalidState(
                    "La sección no está eliminada".to_owned(),
                ));
            }
            if query::exists_by_nombre(tx, &existing.nombre, Some(id)).await? {
                return Err(nombre_en_uso(&existing.nombre));
            }
            let row = query::restore(tx, id).await?;
            tracing::info!(id = %row.id, "sección restaurada");
            Ok(SeccionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Counts secciones activas.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> ServiceResult<i64> {
    Ok(query::count_activas(conn).await?)
}

/// ## Summary
/// Reports whether an active sección uses the nombre, case-insensitive.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn exists_by_nombre(conn: &mut DbConnection<'_>, nombre: &str) -> ServiceResult<bool> {
    Ok(query::exists_by_nombre(conn, nombre.trim(), None).await?)
}

/// ## Summary
/// Name availability probe backing `/verificar-nombre`.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn verificar_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> ServiceResult<DisponibilidadNombre> {
    let nombre = nombre.trim();
    let existe = query::exists_by_nombre(conn, nombre, None).await?;
    Ok(DisponibilidadNombre {
        nombre: nombre.to_owned(),
        disponible: !existe,
        existe,
    })
}

/// ## Summary
/// Collection-level counters for the estadísticas route.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn estadisticas(conn: &mut DbConnection<'_>) -> ServiceResult<EstadisticasSeccion> {
    let total_secciones = query::count_activas(conn).await?;
    Ok(EstadisticasSeccion { total_secciones })
}
