mod acciones;
mod aplicaciones;
mod healthcheck;
mod response;
mod secciones;
mod tipos_usuario;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use sgca_core::constants::{
    ACCIONES_ROUTE_COMPONENT, API_ROUTE_COMPONENT, APLICACIONES_ROUTE_COMPONENT,
    SECCIONES_ROUTE_COMPONENT, TIPOS_USUARIO_ROUTE_COMPONENT,
};

/// ## Summary
/// Constructs the main API router with every collection mounted under `/api`.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(healthcheck::routes())
        .push(aplicaciones::routes())
        .push(secciones::routes())
        .push(acciones::routes())
        .push(tipos_usuario::routes())
}
