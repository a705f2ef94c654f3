use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::EstadoSesion, schema};

/// Sesión de usuario. Modelada y migrada, sin lógica de servicio todavía.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::sesiones)]
#[diesel(check_for_backend(Pg))]
pub struct Sesion {
    pub id: uuid::Uuid,
    pub token: String,
    pub email_usuario: String,
    pub ip_origen: String,
    pub informacion_dispositivo: Option<String>,
    pub fecha_expiracion: chrono::DateTime<chrono::Utc>,
    pub fecha_inicio: chrono::DateTime<chrono::Utc>,
    pub fecha_fin: Option<chrono::DateTime<chrono::Utc>>,
    pub estado: EstadoSesion,
    pub usuario_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}
