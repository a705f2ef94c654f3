use serde::{Deserialize, Serialize};

use sgca_db::db::enums::EstadoAplicacion;
use sgca_db::model::aplicacion::Aplicacion;

use crate::dto::{check_descripcion, check_llave, check_nombre, check_url};
use crate::error::FieldViolation;

/// Payload for `POST /api/aplicaciones`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearAplicacion {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub url: String,
    pub llave_identificadora: String,
    /// `ACTIVO` when absent.
    pub estado: Option<String>,
}

impl CrearAplicacion {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 1000);
        check_url(&mut errors, &self.url);
        check_llave(&mut errors, &self.llave_identificadora);
        if let Some(estado) = &self.estado
            && EstadoAplicacion::parse(estado).is_none()
        {
            errors.push(FieldViolation::new(
                "estado",
                "El estado debe ser ACTIVO o INACTIVO",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    #[must_use]
    pub fn estado_or_default(&self) -> EstadoAplicacion {
        self.estado
            .as_deref()
            .and_then(EstadoAplicacion::parse)
            .unwrap_or(EstadoAplicacion::Activo)
    }
}

/// Payload for `PUT /api/aplicaciones/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarAplicacion {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub url: String,
    pub llave_identificadora: String,
    pub estado: Option<String>,
}

impl ActualizarAplicacion {
    /// ## Errors
    /// Returns the violated fields when the payload breaks a format rule.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut errors = Vec::new();
        check_nombre(&mut errors, &self.nombre);
        check_descripcion(&mut errors, self.descripcion.as_deref(), 1000);
        check_url(&mut errors, &self.url);
        check_llave(&mut errors, &self.llave_identificadora);
        if let Some(estado) = &self.estado
            && EstadoAplicacion::parse(estado).is_none()
        {
            errors.push(FieldViolation::new(
                "estado",
                "El estado debe ser ACTIVO o INACTIVO",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Wire shape of an aplicación.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AplicacionResponse {
    pub id: uuid::Uuid,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub url: String,
    pub llave_identificadora: String,
    pub estado: EstadoAplicacion,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Aplicacion> for AplicacionResponse {
    fn from(row: Aplicacion) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            descripcion: row.descripcion,
            url: row.url,
            llave_identificadora: row.llave_identificadora,
            estado: row.estado,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Parent summary embedded in acción responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AplicacionBasica {
    pub id: uuid::Uuid,
    pub nombre: String,
    pub llave_identificadora: String,
}

impl From<&Aplicacion> for AplicacionBasica {
    fn from(row: &Aplicacion) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre.clone(),
            llave_identificadora: row.llave_identificadora.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CrearAplicacion {
        CrearAplicacion {
            nombre: "Sistema X".to_owned(),
            descripcion: Some("d".to_owned()),
            url: "https://x.example".to_owned(),
            llave_identificadora: "SYS_X".to_owned(),
            estado: Some("ACTIVO".to_owned()),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn estado_defaults_to_activo() {
        let mut p = payload();
        p.estado = None;
        assert!(p.validate().is_ok());
        assert_eq!(p.estado_or_default(), EstadoAplicacion::Activo);
    }

    #[test]
    fn invalid_estado_is_rejected() {
        let mut p = payload();
        p.estado = Some("SUSPENDIDO".to_owned());
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "estado");
    }

    #[test]
    fn multiple_violations_are_collected() {
        let p = CrearAplicacion {
            nombre: "a".to_owned(),
            descripcion: None,
            url: "ejemplo.com".to_owned(),
            llave_identificadora: "ab".to_owned(),
            estado: None,
        };
        let errors = p.validate().unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn response_omits_null_descripcion() {
        let response = AplicacionResponse {
            id: uuid::Uuid::nil(),
            nombre: "Sistema X".to_owned(),
            descripcion: None,
            url: "https://x.example".to_owned(),
            llave_identificadora: "SYS_X".to_owned(),
            estado: EstadoAplicacion::Activo,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("descripcion").is_none());
        assert_eq!(json["llaveIdentificadora"], "SYS_X");
        assert_eq!(json["estado"], "ACTIVO");
    }
}
