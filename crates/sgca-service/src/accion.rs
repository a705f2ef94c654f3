//! Reglas de negocio de acciones.
//!
//! La porción más densa en invariantes: cada acción referencia una
//! aplicación existente (en cualquier estado) y una sección activa, y su
//! nombre es único dentro del par (aplicación, sección) entre filas activas.

use std::collections::HashMap;

use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use sgca_db::db::connection::DbConnection;
use sgca_db::db::pagination::{Page, PageRequest};
use sgca_db::db::query::{accion as query, aplicacion, seccion};
use sgca_db::db::transaction::with_transaction;
use sgca_db::model::accion::{Accion, AccionChangeset, AccionConPadres, NewAccion};

use crate::dto::accion::{AccionResponse, EstadisticasAccion, GuardarAccion};
use crate::dto::normalized_descripcion;
use crate::error::{ServiceError, ServiceResult};

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Acción no encontrada con ID: {id}"))
}

fn aplicacion_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Aplicación no encontrada con ID: {id}"))
}

fn seccion_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Sección no encontrada con ID: {id}"))
}

fn nombre_en_uso(nombre: &str) -> ServiceError {
    ServiceError::Conflict(format!(
        "Ya existe una acción con el nombre '{nombre}' en la aplicación y sección especificadas"
    ))
}

/// Resolves both parents of every row in one batch, preserving order.
async fn adjuntar_padres(
    conn: &mut DbConnection<'_>,
    rows: Vec<Accion>,
) -> ServiceResult<Vec<AccionConPadres>> {
    let mut aplicacion_ids: Vec<Uuid> = rows.iter().map(|r| r.aplicacion_id).collect();
    aplicacion_ids.sort_unstable();
    aplicacion_ids.dedup();
    let mut seccion_ids: Vec<Uuid> = rows.iter().map(|r| r.seccion_id).collect();
    seccion_ids.sort_unstable();
    seccion_ids.dedup();

    let aplicaciones: HashMap<Uuid, _> = aplicacion::load_by_ids(conn, &aplicacion_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let secciones: HashMap<Uuid, _> = seccion::load_by_ids(conn, &seccion_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    rows.into_iter()
        .map(|accion| {
            let aplicacion = aplicaciones
                .get(&accion.aplicacion_id)
                .cloned()
                .ok_or_else(|| aplicacion_not_found(accion.aplicacion_id))?;
            let seccion = secciones
                .get(&accion.seccion_id)
                .cloned()
                .ok_or_else(|| seccion_not_found(accion.seccion_id))?;
            Ok(AccionConPadres {
                accion,
                aplicacion,
                seccion,
            })
        })
        .collect()
}

async fn responses(
    conn: &mut DbConnection<'_>,
    rows: Vec<Accion>,
) -> ServiceResult<Vec<AccionResponse>> {
    Ok(adjuntar_padres(conn, rows)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

async fn page_response(
    conn: &mut DbConnection<'_>,
    rows: Vec<Accion>,
    request: &PageRequest,
    total: i64,
) -> ServiceResult<Page<AccionResponse>> {
    let content = adjuntar_padres(conn, rows).await?;
    Ok(Page::new(content, request, total).map(Into::into))
}

/// ## Summary
/// Creates an acción: resolves the aplicación (any estado), the sección
/// (active only) and probes name uniqueness within the pair.
///
/// ## Errors
/// `Validation` on malformed payload, `NotFound` on unresolved parents,
/// `Conflict` when the nombre is taken within the pair.
pub async fn create<'a>(
    conn: &mut DbConnection<'a>,
    payload: &'a GuardarAccion,
) -> ServiceResult<AccionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let aplicacion_id = payload.aplicacion_id.unwrap_or_default();
    let seccion_id = payload.seccion_id.unwrap_or_default();

    with_transaction(conn, |tx| {
        async move {
            let aplicacion = aplicacion::find_active_by_id(tx, aplicacion_id)
                .await?
                .ok_or_else(|| aplicacion_not_found(aplicacion_id))?;
            let seccion = seccion::find_active_by_id(tx, seccion_id)
                .await?
                .ok_or_else(|| seccion_not_found(seccion_id))?;

            if query::exists_by_nombre(tx, nombre, aplicacion_id, seccion_id, None).await? {
                return Err(nombre_en_uso(nombre));
            }

            let nueva = NewAccion {
                nombre,
                descripcion,
                aplicacion_id,
                seccion_id,
            };
            let row = query::insert(tx, &nueva).await?;
            tracing::info!(id = %row.id, aplicacion_id = %aplicacion_id, seccion_id = %seccion_id, "acción creada");
            Ok(AccionConPadres {
                accion: row,
                aplicacion,
                seccion,
            }
            .into())
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Fetches a non-deleted acción by id, with both parents embedded.
///
/// ## Errors
/// `NotFound` when the id does not resolve to an active row.
pub async fn get_by_id(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<AccionResponse> {
    let row = query::find_active_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    adjuntar_padres(conn, vec![row])
        .await?
        .into_iter()
        .next()
        .map(Into::into)
        .ok_or_else(|| not_found(id))
}

/// ## Summary
/// Lists acciones activas ordered by nombre.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<AccionResponse>> {
    let rows = query::list_activas(conn).await?;
    responses(conn, rows).await
}

/// ## Summary
/// Lists acciones activas as one page with totals.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_paginado(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> ServiceResult<Page<AccionResponse>> {
    let (rows, total) = query::page_activas(conn, request).await?;
    page_response(conn, rows, request, total).await
}

/// ## Summary
/// Searches by nombre substring; a blank input falls back to the active list.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
) -> ServiceResult<Vec<AccionResponse>> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return list_activas(conn).await;
    }
    let rows = query::search_by_nombre(conn, nombre).await?;
    responses(conn, rows).await
}

/// ## Summary
/// One page of acciones whose nombre contains the substring.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_nombre_paginado(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    request: &PageRequest,
) -> ServiceResult<Page<AccionResponse>> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return list_paginado(conn, request).await;
    }
    let (rows, total) = query::page_by_nombre(conn, nombre, request).await?;
    page_response(conn, rows, request, total).await
}

/// ## Summary
/// One page of acciones matching the text in nombre or descripción.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_texto_paginado(
    conn: &mut DbConnection<'_>,
    texto: &str,
    request: &PageRequest,
) -> ServiceResult<Page<AccionResponse>> {
    let texto = texto.trim();
    if texto.is_empty() {
        return list_paginado(conn, request).await;
    }
    let (rows, total) = query::page_by_texto(conn, texto, request).await?;
    page_response(conn, rows, request, total).await
}

/// ## Summary
/// Searches acciones matching the text in nombre or descripción.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn search_by_texto(
    conn: &mut DbConnection<'_>,
    texto: &str,
) -> ServiceResult<Vec<AccionResponse>> {
    let texto = texto.trim();
    if texto.is_empty() {
        return list_activas(conn).await;
    }
    let rows = query::search_by_texto(conn, texto).await?;
    responses(conn, rows).await
}

/// ## Summary
/// Lists acciones activas of an aplicación.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_by_aplicacion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
) -> ServiceResult<Vec<AccionResponse>> {
    let rows = query::list_by_aplicacion(conn, aplicacion_id).await?;
    responses(conn, rows).await
}

/// ## Summary
/// One page of acciones activas of an aplicación.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_by_aplicacion_paginado(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
    request: &PageRequest,
) -> ServiceResult<Page<AccionResponse>> {
    let (rows, total) = query::page_by_aplicacion(conn, aplicacion_id, request).await?;
    page_response(conn, rows, request, total).await
}

/// ## Summary
/// Lists acciones activas of a sección.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_by_seccion(
    conn: &mut DbConnection<'_>,
    seccion_id: Uuid,
) -> ServiceResult<Vec<AccionResponse>> {
    let rows = query::list_by_seccion(conn, seccion_id).await?;
    responses(conn, rows).await
}

/// ## Summary
/// One page of acciones activas of a sección.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_by_seccion_paginado(
    conn: &mut DbConnection<'_>,
    seccion_id: Uuid,
    request: &PageRequest,
) -> ServiceResult<Page<AccionResponse>> {
    let (rows, total) = query::page_by_seccion(conn, seccion_id, request).await?;
    page_response(conn, rows, request, total).await
}

/// ## Summary
/// Lists acciones activas of an (aplicación, sección) pair.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_by_aplicacion_y_seccion(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Uuid,
    seccion_id: Uuid,
) -> ServiceResult<Vec<AccionResponse>> {
    let rows = query::list_by_aplicacion_y_seccion(conn, aplicacion_id, seccion_id).await?;
    responses(conn, rows).await
}

/// ## Summary
/// Updates an acción: resolves the (possibly new) parents and re-probes
/// uniqueness only when the (nombre, aplicación, sección) triple changed.
///
/// ## Errors
/// `NotFound` on a missing acción or unresolved parents, `Conflict` when the
/// nombre is taken within the target pair, `Validation` on malformed
/// payload.
pub async fn update<'a>(
    conn: &mut DbConnection<'a>,
    id: Uuid,
    payload: &'a GuardarAccion,
) -> ServiceResult<AccionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let aplicacion_id = payload.aplicacion_id.unwrap_or_default();
    let seccion_id = payload.seccion_id.unwrap_or_default();

    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            let aplicacion = aplicacion::find_active_by_id(tx, aplicacion_id)
                .await?
                .ok_or_else(|| aplicacion_not_found(aplicacion_id))?;
            let seccion = seccion::find_active_by_id(tx, seccion_id)
                .await?
                .ok_or_else(|| seccion_not_found(seccion_id))?;

            let triple_changed = !nombre.eq_ignore_ascii_case(&existing.nombre)
                || aplicacion_id != existing.aplicacion_id
                || seccion_id != existing.seccion_id;
            if triple_changed
                && query::exists_by_nombre(tx, nombre, aplicacion_id, seccion_id, Some(id)).await?
            {
                return Err(nombre_en_uso(nombre));
            }

            let cambios = AccionChangeset {
                nombre,
                descripcion,
                aplicacion_id,
                seccion_id,
            };
            let row = query::update(tx, id, &cambios).await?;
            tracing::info!(id = %row.id, "acción actualizada");
            Ok(AccionConPadres {
                accion: row,
                aplicacion,
                seccion,
            }
            .into())
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Soft-deletes an acción.
///
/// ## Errors
/// `NotFound` when the row is absent or already deleted.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    let affected = query::soft_delete(conn, id).await?;
    if affected == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id = %id, "acción eliminada");
    Ok(())
}

/// ## Summary
/// Restores a soft-deleted acción, re-validating uniqueness within its
/// (aplicación, sección) pair.
///
/// ## Errors
/// `NotFound` on an unknown id, `InvalidState` when the row is not deleted,
/// `Conflict` when the nombre was taken while the row was deleted.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<AccionResponse> {
    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_by_id_any(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            if !existing.is_deleted() {
                return Err(ServiceError::InvalidState(
                    "La acción no está eliminada".to_owned(),
                ));
            }
            if query::exists_by_nombre(
                tx,
                &existing.nombre,
                existing.aplicacion_id,
                existing.seccion_id,
                Some(id),
            )
            .await?
            {
                return Err(nombre_en_uso(&existing.nombre));
            }
            let row = query::restore(tx, id).await?;
            tracing::info!(id = %row.id, "acción restaurada");
            adjuntar_padres(tx, vec![row])
                .await?
                .into_iter()
                .next()
                .map(Into::into)
                .ok_or_else(|| not_found(id))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Counts acciones activas.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> ServiceResult<i64> {
    Ok(query::count_activas(conn).await?)
}

/// ## Summary
/// Reports whether an active acción uses the nombre within the pair.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn exists_by_nombre(
    conn: &mut DbConnection<'_>,
    nombre: &str,
    aplicacion_id: Uuid,
    seccion_id: Uuid,
) -> ServiceResult<bool> {
    Ok(query::exists_by_nombre(conn, nombre.trim(), aplicacion_id, seccion_id, None).await?)
}

/// ## Summary
/// Collection-level counters. Buckets whose filter is absent report zero.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn estadisticas(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Option<Uuid>,
    seccion_id: Option<Uuid>,
) -> ServiceResult<EstadisticasAccion> {
    let total_acciones = query::count_activas(conn).await?;
    let acciones_por_aplicacion = match aplicacion_id {
        Some(id) => query::count_by_aplicacion(conn, id).await?,
        None => 0,
    };
    let acciones_por_seccion = match seccion_id {
        Some(id) => query::count_by_seccion(conn, id).await?,
        None => 0,
    };
    Ok(EstadisticasAccion {
        total_acciones,
        acciones_por_aplicacion,
        acciones_por_seccion,
    })
}
