/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";

pub const APLICACIONES_ROUTE_COMPONENT: &str = "aplicaciones";
pub const SECCIONES_ROUTE_COMPONENT: &str = "secciones";
pub const ACCIONES_ROUTE_COMPONENT: &str = "acciones";
pub const TIPOS_USUARIO_ROUTE_COMPONENT: &str = "tipos-usuario";
