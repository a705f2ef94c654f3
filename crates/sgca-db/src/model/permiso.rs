use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Permiso que concede una acción a un tipo de usuario. Inerte por ahora.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::permisos_tipo_usuario)]
#[diesel(check_for_backend(Pg))]
pub struct PermisoTipoUsuario {
    pub id: uuid::Uuid,
    pub tipo_usuario_id: uuid::Uuid,
    pub accion_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Asignación de un tipo de usuario a un usuario. Inerte por ahora.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::usuarios_tipo_usuario)]
#[diesel(check_for_backend(Pg))]
pub struct UsuarioTipoUsuario {
    pub id: uuid::Uuid,
    pub usuario_id: uuid::Uuid,
    pub tipo_usuario_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}
