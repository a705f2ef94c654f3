use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Sección funcional bajo la que se agrupan acciones.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::secciones)]
#[diesel(check_for_backend(Pg))]
pub struct Seccion {
    pub id: uuid::Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Seccion {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Insert struct for creating secciones
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::secciones)]
pub struct NewSeccion<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::secciones)]
#[diesel(treat_none_as_null = true)]
pub struct SeccionChangeset<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
}
