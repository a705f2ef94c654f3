use serde::{Deserialize, Serialize};

use sgca_db::model::seccion::Seccion;

use crate::dto::{check_descripcion, check_nombre};
use crate::error::FieldViolation;

/// Payload for `POST /api/secciones` and `PUT /api/secciones/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardarSeccion {
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl GuardarSeccion {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 1000);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Wire shape of a sección.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeccionResponse {
    pub id: uuid::Uuid,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Seccion> for SeccionResponse {
    fn from(row: Seccion) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            descripcion: row.descripcion,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Parent summary embedded in acción responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeccionBasica {
    pub id: uuid::Uuid,
    pub nombre: String,
}

impl From<&Seccion> for SeccionBasica {
    fn from(row: &Seccion) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre.clone(),
        }
    }
}

/// Response of `GET /api/secciones/verificar-nombre`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisponibilidadNombre {
    pub nombre: String,
    pub disponible: bool,
    pub existe: bool,
}

/// Response of `GET /api/secciones/estadisticas`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasSeccion {
    pub total_secciones: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descripcion_over_limit_is_rejected() {
        let p = GuardarSeccion {
            nombre: "Gestión de Usuarios".to_owned(),
            descripcion: Some("x".repeat(1001)),
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors[0].field, "descripcion");
    }

    #[test]
    fn disponibilidad_is_consistent() {
        let d = DisponibilidadNombre {
            nombre: "Gestión".to_owned(),
            disponible: false,
            existe: true,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["disponible"], false);
        assert_eq!(json["existe"], true);
    }
}
