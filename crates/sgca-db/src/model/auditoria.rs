use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::EstadoAuditoria, schema};

/// Registro de auditoría de accesos. La tabla lleva clave primaria compuesta
/// `(id, fecha)` pensada para particionar por rango de fechas. Inerte por
/// ahora.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::auditoria_accesos)]
#[diesel(primary_key(id, fecha))]
#[diesel(check_for_backend(Pg))]
pub struct AuditoriaAcceso {
    pub id: uuid::Uuid,
    pub fecha: chrono::NaiveDate,
    pub email_usuario: String,
    pub ip_origen: String,
    pub informacion_dispositivo: Option<String>,
    pub mensaje: Option<String>,
    pub estado: EstadoAuditoria,
    pub usuario_id: Option<uuid::Uuid>,
    pub aplicacion_id: uuid::Uuid,
    pub accion_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}
