//! Reglas de negocio de aplicaciones.
//!
//! La llave identificadora y la URL son únicas de forma global, incluyendo
//! filas soft-deleted, por lo que `restore` no necesita revalidar nada.

use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use sgca_db::db::connection::DbConnection;
use sgca_db::db::enums::EstadoAplicacion;
use sgca_db::db::pagination::{Page, PageRequest};
use sgca_db::db::query::aplicacion as query;
use sgca_db::db::transaction::with_transaction;
use sgca_db::model::aplicacion::{AplicacionChangeset, NewAplicacion};

use crate::dto::aplicacion::{ActualizarAplicacion, AplicacionResponse, CrearAplicacion};
use crate::dto::normalized_descripcion;
use crate::error::{ServiceError, ServiceResult};

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Aplicación no encontrada con ID: {id}"))
}

/// ## Summary
/// Creates an aplicación after probing llave and URL uniqueness.
///
/// ## Errors
/// `Validation` on malformed payload, `Conflict` when the llave or the URL is
/// already taken.
pub async fn create<'a>(
    conn: &mut DbConnection<'a>,
    payload: &'a CrearAplicacion,
) -> ServiceResult<AplicacionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let url = payload.url.trim();
    let llave = payload.llave_identificadora.trim();
    let estado = payload.estado_or_default();

    with_transaction(conn, |tx| {
        async move {
            if query::exists_by_llave(tx, llave).await? {
                return Err(ServiceError::Conflict(format!(
                    "Ya existe una aplicación con la llave identificadora: {llave}"
                )));
            }
            if query::exists_by_url(tx, url).await? {
                return Err(ServiceError::Conflict(format!(
                    "Ya existe una aplicación con la URL: {url}"
                )));
            }
            let nueva = NewAplicacion {
                nombre,
                descripcion,
                url,
                llave_identificadora: llave,
                estado,
            };
            let row = query::insert(tx, &nueva).await?;
            tracing::info!(id = %row.id, llave = %row.llave_identificadora, "aplicación creada");
            Ok(AplicacionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Fetches a non-deleted aplicación by id.
///
/// ## Errors
/// `NotFound` when the id does not resolve to an active row.
pub async fn get_by_id(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<AplicacionResponse> {
    let row = query::find_active_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into())
}

/// ## Summary
/// Fetches a non-deleted aplicación by llave identificadora.
///
/// ## Errors
/// `NotFound` when no active row carries the llave.
pub async fn get_by_llave(
    conn: &mut DbConnection<'_>,
    llave: &str,
) -> ServiceResult<AplicacionResponse> {
    let row = query::find_active_by_llave(conn, llave)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Aplicación no encontrada con llave: {llave}"))
        })?;
    Ok(row.into())
}

/// ## Summary
/// Lists aplicaciones with `estado = ACTIVO`, ordered by nombre.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_activas(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<AplicacionResponse>> {
    let rows = query::list_activas(conn).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// ## Summary
/// Lists aplicaciones activas as one page with totals.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_paginado(
    conn: &mut DbConnection<'_>,
    request: &PageRequest,
) -> ServiceResult<Page<AplicacionResponse>> {
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
) -> ServiceResult<Vec<AplicacionResponse>> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return list_activas(conn).await;
    }
    let rows = query::search_by_nombre(conn, nombre).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// ## Summary
/// Updates an aplicación, re-probing llave/URL uniqueness only when the
/// value actually changed.
///
/// ## Errors
/// `NotFound` on a missing row, `Conflict` when the new llave or URL is
/// taken, `Validation` on malformed payload.
pub async fn update<'a>(
    conn: &mut DbConnection<'a>,
    id: Uuid,
    payload: &'a ActualizarAplicacion,
) -> ServiceResult<AplicacionResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let url = payload.url.trim();
    let llave = payload.llave_identificadora.trim();
    let estado = payload.estado.as_deref().and_then(EstadoAplicacion::parse);

    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;

            if llave != existing.llave_identificadora
                && query::exists_by_llave_excluding(tx, llave, id).await?
            {
                return Err(ServiceError::Conflict(format!(
                    "Ya existe una aplicación con la llave identificadora: {llave}"
                )));
            }
            if url != existing.url && query::exists_by_url_excluding(tx, url, id).await? {
                return Err(ServiceError::Conflict(format!(
                    "Ya existe una aplicación con la URL: {url}"
                )));
            }

            let cambios = AplicacionChangeset {
                nombre,
                descripcion,
                url,
                llave_identificadora: llave,
                estado: estado.unwrap_or(existing.estado),
            };
            let row = query::update(tx, id, &cambios).await?;
            tracing::info!(id = %row.id, "aplicación actualizada");
            Ok(AplicacionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Soft-deletes an aplicación.
///
/// ## Errors
/// `NotFound` when the row is absent or already deleted.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    let affected = query::soft_delete(conn, id).await?;
    if affected == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id = %id, "aplicación eliminada");
    Ok(())
}

/// ## Summary
/// Restores a soft-deleted aplicación.
///
/// ## Errors
/// `NotFound` when the id is unknown, `InvalidState` when the row is not
/// deleted.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<AplicacionResponse> {
    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_by_id_any(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            if !existing.is_deleted() {
                return Err(ServiceError::InvalidState(
                    "La aplicación no está eliminada".to_owned(),
                ));
            }
            let row = query::restore(tx, id).await?;
            tracing::info!(id = %row.id, "aplicación restaurada");
            Ok(AplicacionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Sets the estado of a non-deleted aplicación.
///
/// ## Errors
/// `InvalidState` when the estado string does not parse, `NotFound` when the
/// row is absent.
pub async fn toggle_estado(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    estado: &str,
) -> ServiceResult<AplicacionResponse> {
    let Some(estado) = EstadoAplicacion::parse(estado) else {
        return Err(ServiceError::InvalidState(format!(
            "Estado de aplicación inválido: {estado}"
        )));
    };

    with_transaction(conn, |tx| {
        async move {
            query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            let row = query::set_estado(tx, id, estado).await?;
            tracing::info!(id = %row.id, estado = %row.estado, "estado de aplicación cambiado");
            Ok(AplicacionResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Counts aplicaciones activas.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn count_activas(conn: &mut DbConnection<'_>) -> ServiceResult<i64> {
    Ok(query::count_activas(conn).await?)
}

/// ## Summary
/// Reports whether any aplicación, deleted included, uses the llave.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn exists_by_llave(conn: &mut DbConnection<'_>, llave: &str) -> ServiceResult<bool> {
    Ok(query::exists_by_llave(conn, llave).await?)
}
