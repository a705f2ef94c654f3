use serde::{Deserialize, Serialize};

use sgca_db::db::enums::EstadoTipoUsuario;
use sgca_db::model::tipo_usuario::TipoUsuario;

use crate::dto::{check_descripcion, check_nombre};
use crate::error::FieldViolation;

/// Payload for `POST /api/tipos-usuario`. The estado is always `ACTIVO` on
/// create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearTipoUsuario {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub aplicacion_id: Option<uuid::Uuid>,
}

impl CrearTipoUsuario {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 500);
        if self.aplicacion_id.is_none() {
            errors.push(FieldViolation::new(
                "aplicacionId",
                "La aplicación es requerida",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload for `PUT /api/tipos-usuario/{id}`. An unparseable estado is a
/// validation error rather than being silently ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarTipoUsuario {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub aplicacion_id: Option<uuid::Uuid>,
    pub estado: Option<String>,
}

impl ActualizarTipoUsuario {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 500);
        if self.aplicacion_id.is_none() {
            errors.push(FieldViolation::new(
                "aplicacionId",
                "La aplicación es requerida",
            ));
        }
        if let Some(estado) = &self.estado
            && EstadoTipoUsuario::parse(estado).is_none()
        {
            errors.push(FieldViolation::new(
                "estado",
                "El estado debe ser ACTIVO o INACTIVO",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Wire shape of a tipo de usuario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipoUsuarioResponse {
    pub id: uuid::Uuid,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub aplicacion_id: uuid::Uuid,
    pub estado: EstadoTipoUsuario,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TipoUsuario> for TipoUsuarioResponse {
    fn from(row: TipoUsuario) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            descripcion: row.descripcion,
            aplicacion_id: row.aplicacion_id,
            estado: row.estado,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Response of `GET /api/tipos-usuario/estadisticas`. Buckets whose filter is
/// absent report zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasTipoUsuario {
    pub total_tipos_usuario: i64,
    pub tipos_usuario_por_aplicacion: i64,
    pub tipos_usuario_por_estado: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descripcion_limit_is_500() {
        let p = CrearTipoUsuario {
            nombre: "Administrador".to_owned(),
            descripcion: Some("x".repeat(501)),
            aplicacion_id: Some(uuid::Uuid::nil()),
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors[0].field, "descripcion");
    }

    #[test]
    fn unparseable_estado_is_rejected_on_update() {
        let p = ActualizarTipoUsuario {
            nombre: "Administrador".to_owned(),
            descripcion: None,
            aplicacion_id: Some(uuid::Uuid::nil()),
            estado: Some("SUSPENDIDO".to_owned()),
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors[0].field, "estado");
    }
}
