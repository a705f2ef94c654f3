//! Rutas de `/api/acciones`.
//!
//! El listado y la paginación aceptan filtros opcionales por aplicación,
//! sección, texto y nombre; el filtro más específico presente gana.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use uuid::Uuid;

use sgca_core::constants::ACCIONES_ROUTE_COMPONENT;
use sgca_service::accion;
use sgca_service::dto::accion::GuardarAccion;

use crate::app::api::response::{
    obtain_conn, obtain_provider, page_request, path_uuid, render_error, render_failure,
    render_success,
};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ACCIONES_ROUTE_COMPONENT)
        .post(crear)
        .get(listar)
        .push(Router::with_path("paginado").get(paginado))
        .push(Router::with_path("estadisticas").get(estadisticas))
        .push(
            Router::with_path("{id}")
                .get(obtener)
                .put(actualizar)
                .delete(eliminar)
                .push(Router::with_path("restaurar").post(restaurar)),
        )
}

#[handler]
async fn crear(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload = match req.parse_json::<GuardarAccion>().await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, "cuerpo de la petición inválido");
            render_failure(
                res,
                StatusCode::BAD_REQUEST,
                "Cuerpo de la petición inválido",
            );
            return;
        }
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::create(&mut conn, &payload).await {
        Ok(data) => render_success(res, StatusCode::CREATED, "Acción creada exitosamente", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn listar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let aplicacion_id = req.query::<Uuid>("aplicacionId");
    let seccion_id = req.query::<Uuid>("seccionId");
    let texto = req.query::<String>("texto");
    let nombre = req.query::<String>("nombre");

    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    let outcome = match (aplicacion_id, seccion_id, texto, nombre) {
        (Some(aplicacion), Some(seccion), _, _) => {
            accion::list_by_aplicacion_y_seccion(&mut conn, aplicacion, seccion).await
        }
        (Some(aplicacion), None, _, _) => accion::list_by_aplicacion(&mut conn, aplicacion).await,
        (None, Some(seccion), _, _) => accion::list_by_seccion(&mut conn, seccion).await,
        (None, None, Some(texto), _) => accion::search_by_texto(&mut conn, &texto).await,
        (None, None, None, Some(nombre)) => accion::search_by_nombre(&mut conn, &nombre).await,
        (None, None, None, None) => accion::list_activas(&mut conn).await,
    };
    match outcome {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Lista de acciones obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn paginado(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = page_request(req);
    let aplicacion_id = req.query::<Uuid>("aplicacionId");
    let seccion_id = req.query::<Uuid>("seccionId");
    let texto = req.query::<String>("texto");
    let nombre = req.query::<String>("nombre");

    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    let outcome = match (aplicacion_id, seccion_id, texto, nombre) {
        (Some(aplicacion), _, _, _) => {
            accion::list_by_aplicacion_paginado(&mut conn, aplicacion, &request).await
        }
        (None, Some(seccion), _, _) => {
            accion::list_by_seccion_paginado(&mut conn, seccion, &request).await
        }
        (None, None, Some(texto), _) => {
            accion::search_by_texto_paginado(&mut conn, &texto, &request).await
        }
        (None, None, None, Some(nombre)) => {
            accion::search_by_nombre_paginado(&mut conn, &nombre, &request).await
        }
        (None, None, None, None) => accion::list_paginado(&mut conn, &request).await,
    };
    match outcome {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Página de acciones obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn estadisticas(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let aplicacion_id = req.query::<Uuid>("aplicacionId");
    let seccion_id = req.query::<Uuid>("seccionId");
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::estadisticas(&mut conn, aplicacion_id, seccion_id).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Estadísticas obtenidas exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn obtener(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::get_by_id(&mut conn, id).await {
        Ok(data) => render_success(res, StatusCode::OK, "Acción encontrada", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn actualizar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let payload = match req.parse_json::<GuardarAccion>().await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, "cuerpo de la petición inválido");
            render_failure(
                res,
                StatusCode::BAD_REQUEST,
                "Cuerpo de la petición inválido",
            );
            return;
        }
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::update(&mut conn, id, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Acción actualizada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn eliminar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::delete(&mut conn, id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn restaurar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match accion::restore(&mut conn, id).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Acción restaurada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}
