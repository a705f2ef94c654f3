//! Rutas de `/api/secciones`.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use sgca_core::constants::SECCIONES_ROUTE_COMPONENT;
use sgca_service::dto::seccion::GuardarSeccion;
use sgca_service::seccion;

use crate::app::api::response::{
    obtain_conn, obtain_provider, page_request, path_uuid, render_error, render_failure,
    render_message, render_success,
};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SECCIONES_ROUTE_COMPONENT)
        .post(crear)
        .get(listar)
        .push(Router::with_path("paginated").get(paginado))
        .push(Router::with_path("verificar-nombre").get(verificar_nombre))
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
    let payload = match req.parse_json::<GuardarSeccion>().await {
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
    match seccion::create(&mut conn, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::CREATED,
            "Sección creada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

/// `nombre` filtra por subcadena en el nombre, `texto` por nombre o
/// descripción; sin filtros devuelve la lista activa completa.
#[handler]
async fn listar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let nombre = req.query::<String>("nombre");
    let texto = req.query::<String>("texto");
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    let outcome = match (nombre, texto) {
        (Some(nombre), _) => seccion::search_by_nombre(&mut conn, &nombre).await,
        (None, Some(texto)) => seccion::search_by_texto(&mut conn, &texto).await,
        (None, None) => seccion::list_activas(&mut conn).await,
    };
    match outcome {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Lista de secciones obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

/// Sin `nombre` devuelve la página completa; con él, la página filtrada.
#[handler]
async fn paginado(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = page_request(req);
    let nombre = req.query::<String>("nombre");
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    let outcome = match nombre {
        Some(nombre) => seccion::search_by_nombre_paginado(&mut conn, &nombre, &request).await,
        None => seccion::list_paginado(&mut conn, &request).await,
    };
    match outcome {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Página de secciones obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn verificar_nombre(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(nombre) = req.query::<String>("nombre") else {
        render_failure(res, StatusCode::BAD_REQUEST, "El nombre es requerido");
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match seccion::verificar_nombre(&mut conn, &nombre).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Resultado de la verificación obtenido",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn estadisticas(depot: &mut Depot, res: &mut Response) {
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match seccion::estadisticas(&mut conn).await {
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
    match seccion::get_by_id(&mut conn, id).await {
        Ok(data) => render_success(res, StatusCode::OK, "Sección encontrada", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn actualizar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let payload = match req.parse_json::<GuardarSeccion>().await {
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
    match seccion::update(&mut conn, id, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Sección actualizada exitosamente",
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
    match seccion::delete(&mut conn, id).await {
        Ok(()) => render_message(res, StatusCode::OK, "Sección eliminada exitosamente"),
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
    match seccion::restore(&mut conn, id).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Sección restaurada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}
