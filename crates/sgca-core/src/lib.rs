//! Shared foundation for the SGCA backend: configuration, constants and the
//! base error type used by every other crate.

pub mod config;
pub mod constants;
pub mod error;
