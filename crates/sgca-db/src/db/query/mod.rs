pub mod accion;
pub mod aplicacion;
pub mod seccion;
pub mod tipo_usuario;
