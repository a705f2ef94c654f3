//! Reglas de negocio de tipos de usuario.
//!
//! El nombre es único dentro de la aplicación entre filas activas. El estado
//! siempre nace en `ACTIVO`; un estado no reconocible en una actualización se
//! rechaza con error de validación.

use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use sgca_db::db::connection::DbConnection;
use sgca_db::db::enums::EstadoTipoUsuario;
use sgca_db::db::pagination::{Page, PageRequest};
use sgca_db::db::query::tipo_usuario::TipoUsuarioFilter;
use sgca_db::db::query::{aplicacion, tipo_usuario as query};
use sgca_db::db::transaction::with_transaction;
use sgca_db::model::tipo_usuario::{NewTipoUsuario, TipoUsuarioChangeset};

use crate::dto::normalized_descripcion;
use crate::dto::tipo_usuario::{
    ActualizarTipoUsuario, CrearTipoUsuario, EstadisticasTipoUsuario, TipoUsuarioResponse,
};
use crate::error::{ServiceError, ServiceResult};

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Tipo de usuario no encontrado con ID: {id}"))
}

fn aplicacion_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Aplicación no encontrada con ID: {id}"))
}

fn nombre_en_uso() -> ServiceError {
    ServiceError::Conflict("Ya existe un tipo de usuario con ese nombre en la aplicación".to_owned())
}

/// ## Summary
/// Creates a tipo de usuario under an existing aplicación, with `estado`
/// forced to `ACTIVO`.
///
/// ## Errors
/// `Validation` on malformed payload, `NotFound` when the aplicación does
/// not resolve, `Conflict` when the nombre is taken within the aplicación.
pub async fn create<'a>(
    conn: &mut DbConnection<'a>,
    payload: &'a CrearTipoUsuario,
) -> ServiceResult<TipoUsuarioResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let aplicacion_id = payload.aplicacion_id.unwrap_or_default();

    with_transaction(conn, |tx| {
        async move {
            aplicacion::find_active_by_id(tx, aplicacion_id)
                .await?
                .ok_or_else(|| aplicacion_not_found(aplicacion_id))?;

            if query::exists_by_nombre(tx, nombre, aplicacion_id, None).await? {
                return Err(nombre_en_uso());
            }

            let nuevo = NewTipoUsuario {
                nombre,
                descripcion,
                aplicacion_id,
                estado: EstadoTipoUsuario::Activo,
            };
            let row = query::insert(tx, &nuevo).await?;
            tracing::info!(id = %row.id, aplicacion_id = %aplicacion_id, "tipo de usuario creado");
            Ok(TipoUsuarioResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Fetches a non-deleted tipo de usuario by id.
///
/// ## Errors
/// `NotFound` when the id does not resolve to an active row.
pub async fn get_by_id(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> ServiceResult<TipoUsuarioResponse> {
    let row = query::find_active_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into())
}

/// ## Summary
/// One page of tipos de usuario; the nombre, aplicación and estado filters
/// are each optional and compose with AND.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn list_paginado(
    conn: &mut DbConnection<'_>,
    filter: &TipoUsuarioFilter,
    request: &PageRequest,
) -> ServiceResult<Page<TipoUsuarioResponse>> {
    tracing::debug!(page = request.page, size = request.size, "listando tipos de usuario");
    let (rows, total) = query::page_filtered(conn, filter, request).await?;
    Ok(Page::new(rows, request, total).map(Into::into))
}

/// ## Summary
/// Updates a tipo de usuario: resolves the (possibly new) aplicación and
/// re-probes name uniqueness within it.
///
/// ## Errors
/// `NotFound` on a missing row or unresolved aplicación, `Conflict` when the
/// nombre is taken, `Validation` on malformed payload (including an
/// unparseable estado).
pub async fn update<'a>(
    conn: &mut DbConnection<'a>,
    id: Uuid,
    payload: &'a ActualizarTipoUsuario,
) -> ServiceResult<TipoUsuarioResponse> {
    payload.validate().map_err(ServiceError::Validation)?;
    let nombre = payload.nombre.trim();
    let descripcion = normalized_descripcion(payload.descripcion.as_deref());
    let aplicacion_id = payload.aplicacion_id.unwrap_or_default();
    let estado = payload.estado.as_deref().and_then(EstadoTipoUsuario::parse);

    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            aplicacion::find_active_by_id(tx, aplicacion_id)
                .await?
                .ok_or_else(|| aplicacion_not_found(aplicacion_id))?;

            if query::exists_by_nombre(tx, nombre, aplicacion_id, Some(id)).await? {
                return Err(nombre_en_uso());
            }

            let cambios = TipoUsuarioChangeset {
                nombre,
                descripcion,
                aplicacion_id,
                estado: estado.unwrap_or(existing.estado),
            };
            let row = query::update(tx, id, &cambios).await?;
            tracing::info!(id = %row.id, "tipo de usuario actualizado");
            Ok(TipoUsuarioResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Soft-deletes a tipo de usuario.
///
/// ## Errors
/// `NotFound` when the row is absent or already deleted.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    let affected = query::soft_delete(conn, id).await?;
    if affected == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id = %id, "tipo de usuario eliminado");
    Ok(())
}

/// ## Summary
/// Restores a soft-deleted tipo de usuario, re-validating name uniqueness
/// within its aplicación.
///
/// ## Errors
/// `NotFound` on an unknown id, `InvalidState` when the row is not deleted,
/// `Conflict` when the nombre was taken while the row was deleted.
pub async fn restore(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<TipoUsuarioResponse> {
    with_transaction(conn, |tx| {
        async move {
            let existing = query::find_by_id_any(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            if !existing.is_deleted() {
                return Err(ServiceError::InvalidState(
                    "El tipo de usuario no está eliminado".to_owned(),
                ));
            }
            if query::exists_by_nombre(tx, &existing.nombre, existing.aplicacion_id, Some(id))
                .await?
            {
                return Err(nombre_en_uso());
            }
            let row = query::restore(tx, id).await?;
            tracing::info!(id = %row.id, "tipo de usuario restaurado");
            Ok(TipoUsuarioResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Sets the estado of a non-deleted tipo de usuario.
///
/// ## Errors
/// `InvalidState` when the estado string does not parse, `NotFound` when the
/// row is absent.
pub async fn toggle_estado(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    estado: &str,
) -> ServiceResult<TipoUsuarioResponse> {
    let Some(estado) = EstadoTipoUsuario::parse(estado) else {
        return Err(ServiceError::InvalidState(
            "El estado debe ser ACTIVO o INACTIVO".to_owned(),
        ));
    };

    with_transaction(conn, |tx| {
        async move {
            query::find_active_by_id(tx, id)
                .await?
                .ok_or_else(|| not_found(id))?;
            let row = query::set_estado(tx, id, estado).await?;
            tracing::info!(id = %row.id, estado = %row.estado, "estado de tipo de usuario cambiado");
            Ok(TipoUsuarioResponse::from(row))
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Collection-level counters. Buckets whose filter is absent report zero.
///
/// ## Errors
/// `DieselError` when the read fails.
pub async fn estadisticas(
    conn: &mut DbConnection<'_>,
    aplicacion_id: Option<Uuid>,
    estado: Option<EstadoTipoUsuario>,
) -> ServiceResult<EstadisticasTipoUsuario> {
    let total_tipos_usuario = query::count_activos(conn).await?;
    let tipos_usuario_por_aplicacion = match aplicacion_id {
        Some(id) => query::count_by_aplicacion(conn, id).await?,
        None => 0,
    };
    let tipos_usuario_por_estado = match estado {
        Some(estado) => query::count_by_estado(conn, estado).await?,
        None => 0,
    };
    Ok(EstadisticasTipoUsuario {
        total_tipos_usuario,
        tipos_usuario_por_aplicacion,
        tipos_usuario_por_estado,
    })
}
