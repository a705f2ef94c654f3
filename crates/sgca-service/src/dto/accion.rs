use serde::{Deserialize, Serialize};

use sgca_db::model::accion::AccionConPadres;

use crate::dto::aplicacion::AplicacionBasica;
use crate::dto::seccion::SeccionBasica;
use crate::dto::{check_descripcion, check_nombre};
use crate::error::FieldViolation;

/// Payload for `POST /api/acciones` and `PUT /api/acciones/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardarAccion {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub aplicacion_id: Option<uuid::Uuid>,
    pub seccion_id: Option<uuid::Uuid>,
}

impl GuardarAccion {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 1000);
        if self.aplicacion_id.is_none() {
            errors.push(FieldViolation::new(
                "aplicacionId",
                "La aplicación es requerida",
            ));
        }
        if self.seccion_id.is_none() {
            errors.push(FieldViolation::new("seccionId", "La sección es requerida"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Wire shape of an acción, with basic info of both parents embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccionResponse {
    pub id: uuid::Uuid,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub aplicacion: AplicacionBasica,
    pub seccion: SeccionBasica,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccionConPadres> for AccionResponse {
    fn from(row: AccionConPadres) -> Self {
        Self {
            id: row.accion.id,
            nombre: row.accion.nombre,
            descripcion: row.accion.descripcion,
            aplicacion: AplicacionBasica::from(&row.aplicacion),
            seccion: SeccionBasica::from(&row.seccion),
            created_at: row.accion.created_at,
            updated_at: row.accion.updated_at,
        }
    }
}

/// Response of `GET /api/acciones/estadisticas`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasAccion {
    pub total_acciones: i64,
    pub acciones_por_aplicacion: i64,
    pub acciones_por_seccion: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parents_are_reported_by_field() {
        let p = GuardarAccion {
            nombre: "Crear".to_owned(),
            descripcion: None,
            aplicacion_id: None,
            seccion_id: None,
        };
        let errors = p.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"aplicacionId"));
        assert!(fields.contains(&"seccionId"));
    }
}
