//! Request and response DTOs with the wire-level validation rules.
//!
//! JSON keys are camelCase Spanish, matching the public API contract.

use crate::error::FieldViolation;

pub mod accion;
pub mod aplicacion;
pub mod seccion;
pub mod tipo_usuario;

pub(crate) fn check_nombre(errors: &mut Vec<FieldViolation>, nombre: &str) {
    let len = nombre.trim().chars().count();
    if !(2..=100).contains(&len) {
        errors.push(FieldViolation::new(
            "nombre",
            "El nombre debe tener entre 2 y 100 caracteres",
        ));
    }
}

pub(crate) fn check_descripcion(
    errors: &mut Vec<FieldViolation>,
    descripcion: Option<&str>,
    max: usize,
) {
    if let Some(descripcion) = descripcion
        && descripcion.trim().chars().count() > max
    {
        errors.push(FieldViolation::new(
            "descripcion",
            format!("La descripción no debe exceder los {max} caracteres"),
        ));
    }
}

pub(crate) fn check_url(errors: &mut Vec<FieldViolation>, url: &str) {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(FieldViolation::new(
            "url",
            "La URL debe comenzar con http:// o https://",
        ));
    }
    if url.chars().count() > 255 {
        errors.push(FieldViolation::new(
            "url",
            "La URL no debe exceder los 255 caracteres",
        ));
    }
}

pub(crate) fn check_llave(errors: &mut Vec<FieldViolation>, llave: &str) {
    let llave = llave.trim();
    let len = llave.chars().count();
    if !(5..=100).contains(&len) {
        errors.push(FieldViolation::new(
            "llaveIdentificadora",
            "La llave identificadora debe tener entre 5 y 100 caracteres",
        ));
    }
    if !llave
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        errors.push(FieldViolation::new(
            "llaveIdentificadora",
            "La llave identificadora solo puede contener mayúsculas, dígitos y guion bajo",
        ));
    }
}

/// Trims a descripción and maps the empty result to `None`.
#[must_use]
pub fn normalized_descripcion(descripcion: Option<&str>) -> Option<&str> {
    descripcion.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombre_bounds() {
        let mut errors = Vec::new();
        check_nombre(&mut errors, "ab");
        check_nombre(&mut errors, &"x".repeat(100));
        assert!(errors.is_empty());

        check_nombre(&mut errors, "a");
        check_nombre(&mut errors, &"x".repeat(101));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn url_must_have_http_scheme() {
        let mut errors = Vec::new();
        check_url(&mut errors, "https://ejemplo.com");
        check_url(&mut errors, "http://ejemplo.com");
        assert!(errors.is_empty());

        check_url(&mut errors, "ftp://ejemplo.com");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "url");
    }

    #[test]
    fn llave_pattern_and_length() {
        let mut errors = Vec::new();
        check_llave(&mut errors, "SYS_X1");
        assert!(errors.is_empty());

        check_llave(&mut errors, "sys_x1");
        check_llave(&mut errors, "AB");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn descripcion_empty_becomes_none() {
        assert_eq!(normalized_descripcion(Some("  ")), None);
        assert_eq!(normalized_descripcion(Some(" hola ")), Some("hola"));
        assert_eq!(normalized_descripcion(None), None);
    }
}
