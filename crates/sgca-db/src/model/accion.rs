use diesel::{pg::Pg, prelude::*};

use crate::db::schema;
use crate::model::{aplicacion::Aplicacion, seccion::Seccion};

/// Acción protegida, siempre asociada a una aplicación y a una sección.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::acciones)]
#[diesel(check_for_backend(Pg))]
pub struct Accion {
    pub id: uuid::Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub aplicacion_id: uuid::Uuid,
    pub seccion_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Accion {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Acción junto con sus dos padres, como las devuelven los joins de lectura.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccionConPadres {
    pub accion: Accion,
    pub aplicacion: Aplicacion,
    pub seccion: Seccion,
}

/// Insert struct for creating acciones
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::acciones)]
pub struct NewAccion<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub aplicacion_id: uuid::Uuid,
    pub seccion_id: uuid::Uuid,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::acciones)]
#[diesel(treat_none_as_null = true)]
pub struct AccionChangeset<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub aplicacion_id: uuid::Uuid,
    pub seccion_id: uuid::Uuid,
}
