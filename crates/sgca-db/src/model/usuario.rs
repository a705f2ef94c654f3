use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::EstadoUsuario, schema};

/// Usuario del sistema. Modelado y migrado, sin lógica de servicio todavía.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::usuarios)]
#[diesel(check_for_backend(Pg))]
pub struct Usuario {
    pub id: uuid::Uuid,
    pub nombres: String,
    pub apellidos: String,
    pub email: String,
    pub contrasena: String,
    pub estado: EstadoUsuario,
    pub dos_factor_activo: bool,
    pub dos_factor_secreto_totp: Option<String>,
    pub intentos_fallidos_sesion: i32,
    pub fecha_ultimo_intento_fallido: Option<chrono::DateTime<chrono::Utc>>,
    pub fecha_bloqueo_sesion: Option<chrono::DateTime<chrono::Utc>>,
    pub fecha_ultimo_cambio_contrasena: chrono::DateTime<chrono::Utc>,
    pub requiere_cambio_contrasena: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Usuario {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
