//! Rutas de `/api/aplicaciones`.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use sgca_core::constants::APLICACIONES_ROUTE_COMPONENT;
use sgca_service::aplicacion;
use sgca_service::dto::aplicacion::{ActualizarAplicacion, CrearAplicacion};

use crate::app::api::response::{
    obtain_conn, obtain_provider, page_request, path_uuid, render_error, render_failure,
    render_message, render_success,
};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(APLICACIONES_ROUTE_COMPONENT)
        .post(crear)
        .get(listar)
        .push(Router::with_path("buscar").get(buscar))
        .push(Router::with_path("paginado").get(paginado))
        .push(Router::with_path("contar").get(contar))
        .push(Router::with_path("llave/{llave}").get(obtener_por_llave))
        .push(Router::with_path("existe/{llave}").get(existe_por_llave))
        .push(
            Router::with_path("{id}")
                .get(obtener)
                .put(actualizar)
                .delete(eliminar)
                .push(Router::with_path("restaurar").post(restaurar))
                .push(Router::with_path("estado").patch(cambiar_estado)),
        )
}

#[handler]
async fn crear(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload = match req.parse_json::<CrearAplicacion>().await {
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
    match aplicacion::create(&mut conn, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::CREATED,
            "Aplicación creada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn listar(depot: &mut Depot, res: &mut Response) {
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::list_activas(&mut conn).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Lista de aplicaciones obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn buscar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let nombre = req.query::<String>("nombre").unwrap_or_default();
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::search_by_nombre(&mut conn, &nombre).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Búsqueda completada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn paginado(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = page_request(req);
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::list_paginado(&mut conn, &request).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Aplicaciones paginadas obtenidas exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn contar(depot: &mut Depot, res: &mut Response) {
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::count_activas(&mut conn).await {
        Ok(data) => render_success(res, StatusCode::OK, "Conteo obtenido exitosamente", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn obtener_por_llave(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(llave) = req.param::<String>("llave") else {
        render_failure(res, StatusCode::BAD_REQUEST, "La llave es requerida");
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::get_by_llave(&mut conn, &llave).await {
        Ok(data) => render_success(res, StatusCode::OK, "Aplicación encontrada", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn existe_por_llave(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(llave) = req.param::<String>("llave") else {
        render_failure(res, StatusCode::BAD_REQUEST, "La llave es requerida");
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::exists_by_llave(&mut conn, &llave).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Verificación completada exitosamente",
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
    match aplicacion::get_by_id(&mut conn, id).await {
        Ok(data) => render_success(res, StatusCode::OK, "Aplicación encontrada", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn actualizar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let payload = match req.parse_json::<ActualizarAplicacion>().await {
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
    match aplicacion::update(&mut conn, id, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Aplicación actualizada exitosamente",
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
    match aplicacion::delete(&mut conn, id).await {
        Ok(()) => render_message(res, StatusCode::OK, "Aplicación eliminada exitosamente"),
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
    match aplicacion::restore(&mut conn, id).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Aplicación restaurada exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn cambiar_estado(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let Some(estado) = req.query::<String>("estado") else {
        render_failure(res, StatusCode::BAD_REQUEST, "El estado es requerido");
        return;
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match aplicacion::toggle_estado(&mut conn, id, &estado).await {
        Ok(data) => render_success(res, StatusCode::OK, "Estado actualizado exitosamente", data),
        Err(err) => render_error(res, &err),
    }
}
