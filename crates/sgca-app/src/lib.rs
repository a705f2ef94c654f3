//! HTTP façade of the SGCA backend, built on salvo.
//!
//! The router injects the connection pool and the settings into the depot;
//! each handler pulls a pooled connection, calls into `sgca-service` and
//! wraps the outcome in the uniform `{success, message, data|errors}`
//! envelope.

pub mod app;
pub mod config;
pub mod db_handler;
pub mod error;
pub mod middleware;
