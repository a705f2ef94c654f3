use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::EstadoTipoUsuario, schema};
use crate::model::aplicacion::Aplicacion;

/// Tipo de usuario (rol) dentro de una aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::tipo_usuario)]
#[diesel(check_for_backend(Pg))]
pub struct TipoUsuario {
    pub id: uuid::Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub aplicacion_id: uuid::Uuid,
    pub estado: EstadoTipoUsuario,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TipoUsuario {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Tipo de usuario junto con su aplicación propietaria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipoUsuarioConAplicacion {
    pub tipo_usuario: TipoUsuario,
    pub aplicacion: Aplicacion,
}

/// Insert struct for creating tipos de usuario
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::tipo_usuario)]
pub struct NewTipoUsuario<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub aplicacion_id: uuid::Uuid,
    pub estado: EstadoTipoUsuario,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::tipo_usuario)]
#[diesel(treat_none_as_null = true)]
pub struct TipoUsuarioChangeset<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub aplicacion_id: uuid::Uuid,
    pub estado: EstadoTipoUsuario,
}
