use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::EstadoAplicacion, schema};

/// Aplicación registrada en el sistema de control de accesos.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::aplicaciones)]
#[diesel(check_for_backend(Pg))]
pub struct Aplicacion {
    pub id: uuid::Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub url: String,
    pub llave_identificadora: String,
    pub estado: EstadoAplicacion,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Aplicacion {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Insert struct for creating aplicaciones
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::aplicaciones)]
pub struct NewAplicacion<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub url: &'a str,
    pub llave_identificadora: &'a str,
    pub estado: EstadoAplicacion,
}

/// Changeset applied by `update`. `llave_identificadora` is written too, so
/// key changes go through the same global unique index.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::aplicaciones)]
#[diesel(treat_none_as_null = true)]
pub struct AplicacionChangeset<'a> {
    pub nombre: &'a str,
    pub descripcion: Option<&'a str>,
    pub url: &'a str,
    pub llave_identificadora: &'a str,
    pub estado: EstadoAplicacion,
}
