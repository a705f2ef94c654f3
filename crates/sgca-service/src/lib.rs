//! Domain rule layer of the SGCA backend.
//!
//! One module per catalog entity. Each operation takes a pooled connection,
//! enforces the lifecycle and uniqueness invariants and returns either a
//! response DTO or a [`error::ServiceError`] for the HTTP façade to map.

pub mod accion;
pub mod aplicacion;
pub mod dto;
pub mod error;
pub mod seccion;
pub mod tipo_usuario;
