//! Uniform JSON envelope and depot plumbing shared by every handler.
//!
//! Every route answers `{success, message, data?, errors?}`. The helpers
//! here render that envelope, translate [`ServiceError`] variants into HTTP
//! statuses and pull the pooled connection out of the depot.

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::db_handler::get_db_from_depot;
use sgca_db::db::DbProvider;
use sgca_db::db::connection::DbConnection;
use sgca_db::db::pagination::{PageRequest, SortDir};
use sgca_service::error::{FieldViolation, ServiceError};

/// Wire envelope of every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    #[must_use]
    pub fn plain(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

pub fn render_success<T: Serialize + Send>(
    res: &mut Response,
    status: StatusCode,
    message: &str,
    data: T,
) {
    res.status_code(status);
    res.render(Json(ApiResponse::ok(message, data)));
}

pub fn render_message(res: &mut Response, status: StatusCode, message: &str) {
    res.status_code(status);
    res.render(Json(ApiResponse::plain(true, message)));
}

pub fn render_failure(res: &mut Response, status: StatusCode, message: &str) {
    res.status_code(status);
    res.render(Json(ApiResponse::plain(false, message)));
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) | ServiceError::InvalidState(_) | ServiceError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::DatabaseError(_) | ServiceError::DieselError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Renders a service error with its HTTP status. Internal errors are logged
/// and answered with a generic message so that no detail leaks to clients.
pub fn render_error(res: &mut Response, err: &ServiceError) {
    let status = status_for(err);
    match err {
        ServiceError::Validation(violations) => {
            res.status_code(status);
            res.render(Json(ApiResponse::<serde_json::Value> {
                success: false,
                message: err.to_string(),
                data: None,
                errors: Some(violations.clone()),
            }));
        }
        ServiceError::DatabaseError(_) | ServiceError::DieselError(_) => {
            tracing::error!(error = %err, "error interno al atender la petición");
            render_failure(res, status, "Error interno del servidor");
        }
        _ => render_failure(res, status, &err.to_string()),
    }
}

/// Pulls the pool out of the depot, answering 500 when it is missing.
pub fn obtain_provider(
    depot: &Depot,
    res: &mut Response,
) -> Option<Arc<dyn DbProvider + Send + Sync>> {
    match get_db_from_depot(depot) {
        Ok(provider) => Some(provider),
        Err(err) => {
            tracing::error!(error = %err, "proveedor de base de datos no disponible");
            render_failure(
                res,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            );
            None
        }
    }
}

/// Checks out a pooled connection, answering 500 when the pool is exhausted.
pub async fn obtain_conn<'a>(
    provider: &'a (dyn DbProvider + Send + Sync),
    res: &mut Response,
) -> Option<DbConnection<'a>> {
    match provider.get_connection().await {
        Ok(conn) => Some(conn),
        Err(err) => {
            tracing::error!(error = %err, "no se pudo obtener una conexión del pool");
            render_failure(
                res,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            );
            None
        }
    }
}

/// Reads a UUID path parameter, answering 400 when it does not parse.
pub fn path_uuid(req: &Request, res: &mut Response, name: &str) -> Option<Uuid> {
    let id = req.param::<Uuid>(name);
    if id.is_none() {
        render_failure(res, StatusCode::BAD_REQUEST, "Identificador inválido");
    }
    id
}

/// Reads the `page`/`size`/`sortBy`/`sortDir` query parameters with the
/// defaults 0, 10, `nombre` and ascending. A combined `sort=campo,dir`
/// parameter takes precedence over the split pair.
#[must_use]
pub fn page_request(req: &Request) -> PageRequest {
    let page = req.query::<i64>("page").unwrap_or(0);
    let size = req.query::<i64>("size").unwrap_or(10);

    if let Some(sort) = req.query::<String>("sort") {
        let mut parts = sort.splitn(2, ',');
        let sort_by = parts.next().unwrap_or("nombre").to_owned();
        let sort_dir = parts.next().map_or(SortDir::Asc, SortDir::parse);
        return PageRequest::new(page, size, sort_by, sort_dir);
    }

    let sort_by = req
        .query::<String>("sortBy")
        .unwrap_or_else(|| "nombre".to_owned());
    let sort_dir = req
        .query::<String>("sortDir")
        .map_or(SortDir::Asc, |dir| SortDir::parse(&dir));
    PageRequest::new(page, size, sort_by, sort_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_skips_absent_fields() {
        let envelope = ApiResponse::ok("Aplicación encontrada", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Aplicación encontrada");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn plain_envelope_has_no_data() {
        let envelope = ApiResponse::plain(false, "Identificador inválido");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn statuses_follow_error_variants() {
        assert_eq!(
            status_for(&ServiceError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ServiceError::Conflict("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ServiceError::InvalidState("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ServiceError::Validation(vec![])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ServiceError::DieselError(diesel::result::Error::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
