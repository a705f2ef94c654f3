//! Rutas de `/api/tipos-usuario`.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use uuid::Uuid;

use sgca_core::constants::TIPOS_USUARIO_ROUTE_COMPONENT;
use sgca_db::db::enums::EstadoTipoUsuario;
use sgca_db::db::query::tipo_usuario::TipoUsuarioFilter;
use sgca_service::dto::tipo_usuario::{ActualizarTipoUsuario, CrearTipoUsuario};
use sgca_service::tipo_usuario;

use crate::app::api::response::{
    obtain_conn, obtain_provider, page_request, path_uuid, render_error, render_failure,
    render_success,
};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TIPOS_USUARIO_ROUTE_COMPONENT)
        .post(crear)
        .push(Router::with_path("paginado").get(paginado))
        .push(Router::with_path("estadisticas").get(estadisticas))
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
    let payload = match req.parse_json::<CrearTipoUsuario>().await {
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
    match tipo_usuario::create(&mut conn, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::CREATED,
            "Tipo de usuario creado exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn paginado(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = page_request(req);
    let filter = TipoUsuarioFilter {
        nombre: req.query::<String>("nombre"),
        aplicacion_id: req.query::<Uuid>("aplicacionId"),
        estado: req
            .query::<String>("estado")
            .as_deref()
            .and_then(EstadoTipoUsuario::parse),
    };
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match tipo_usuario::list_paginado(&mut conn, &filter, &request).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Página de tipos de usuario obtenida exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn estadisticas(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let aplicacion_id = req.query::<Uuid>("aplicacionId");
    let estado = req
        .query::<String>("estado")
        .as_deref()
        .and_then(EstadoTipoUsuario::parse);
    let Some(provider) = obtain_provider(depot, res) else {
        return;
    };
    let Some(mut conn) = obtain_conn(provider.as_ref(), res).await else {
        return;
    };
    match tipo_usuario::estadisticas(&mut conn, aplicacion_id, estado).await {
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
    match tipo_usuario::get_by_id(&mut conn, id).await {
        Ok(data) => render_success(res, StatusCode::OK, "Tipo de usuario encontrado", data),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn actualizar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = path_uuid(req, res, "id") else {
        return;
    };
    let payload = match req.parse_json::<ActualizarTipoUsuario>().await {
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
    match tipo_usuario::update(&mut conn, id, &payload).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Tipo de usuario actualizado exitosamente",
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
    match tipo_usuario::delete(&mut conn, id).await {
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
    match tipo_usuario::restore(&mut conn, id).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Tipo de usuario restaurado exitosamente",
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
    match tipo_usuario::toggle_estado(&mut conn, id, &estado).await {
        Ok(data) => render_success(
            res,
            StatusCode::OK,
            "Estado del tipo de usuario cambiado exitosamente",
            data,
        ),
        Err(err) => render_error(res, &err),
    }
}
