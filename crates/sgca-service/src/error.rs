use serde::Serialize;
use thiserror::Error;

/// One violated rule of a request payload, keyed by JSON field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Service layer errors. The façade maps each variant to an HTTP status.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Datos de entrada inválidos")]
    Validation(Vec<FieldViolation>),

    #[error(transparent)]
    DatabaseError(#[from] sgca_db::error::DbError),

    #[error("Error de base de datos")]
    DieselError(diesel::result::Error),
}

/// Unique-index violations become [`ServiceError::Conflict`] so that races
/// between the existence probe and the insert still surface as a 400 rather
/// than a 500. The constraint name picks the message.
impl From<diesel::result::Error> for ServiceError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::Conflict(conflict_message(info.constraint_name())),
            other => Self::DieselError(other),
        }
    }
}

fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("aplicaciones_llave_identificadora_key") => {
            "Ya existe una aplicación con la llave identificadora".to_owned()
        }
        Some("aplicaciones_url_key") => "Ya existe una aplicación con la URL".to_owned(),
        Some("secciones_nombre_activo_key") => "Ya existe una sección con el nombre".to_owned(),
        Some("acciones_nombre_padres_activo_key") => {
            "Ya existe una acción con el nombre en la aplicación y sección especificadas".to_owned()
        }
        Some("tipo_usuario_nombre_aplicacion_activo_key") => {
            "Ya existe un tipo de usuario con ese nombre en la aplicación".to_owned()
        }
        _ => "Ya existe un registro con los mismos datos únicos".to_owned(),
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        let mapped = ServiceError::from(err);
        assert!(matches!(mapped, ServiceError::Conflict(_)));
    }

    #[test]
    fn other_diesel_errors_stay_internal() {
        let mapped = ServiceError::from(diesel::result::Error::NotFound);
        assert!(matches!(mapped, ServiceError::DieselError(_)));
    }

    #[test]
    fn conflict_message_picks_constraint() {
        assert_eq!(
            conflict_message(Some("aplicaciones_url_key")),
            "Ya existe una aplicación con la URL"
        );
        assert_eq!(
            conflict_message(None),
            "Ya existe un registro con los mismos datos únicos"
        );
    }
}
