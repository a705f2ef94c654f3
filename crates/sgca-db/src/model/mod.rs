pub mod accion;
pub mod aplicacion;
pub mod auditoria;
pub mod permiso;
pub mod seccion;
pub mod sesion;
pub mod tipo_usuario;
pub mod usuario;
