//! Database enum types with Diesel serialization.
//!
//! Estado values are stored as uppercase text, mirroring the wire format
//! (`ACTIVO` / `INACTIVO`). Each enum implements `ToSql` and `FromSql` for
//! automatic conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Lifecycle state of an Aplicación.
///
/// Maps to `aplicaciones.estado` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
pub enum EstadoAplicacion {
    #[serde(rename = "ACTIVO")]
    Activo,
    #[serde(rename = "INACTIVO")]
    Inactivo,
}

impl ToSql<Text, Pg> for EstadoAplicacion {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EstadoAplicacion {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ACTIVO" => Ok(Self::Activo),
            b"INACTIVO" => Ok(Self::Inactivo),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EstadoAplicacion {
    /// Returns the database string representation of this estado.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activo => "ACTIVO",
            Self::Inactivo => "INACTIVO",
        }
    }

    /// Parses the uppercase wire representation, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVO" => Some(Self::Activo),
            "INACTIVO" => Some(Self::Inactivo),
            _ => None,
        }
    }
}

impl fmt::Display for EstadoAplicacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a Tipo de Usuario.
///
/// Maps to `tipo_usuario.estado` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
pub enum EstadoTipoUsuario {
    #[serde(rename = "ACTIVO")]
    Activo,
    #[serde(rename = "INACTIVO")]
    Inactivo,
}

impl ToSql<Text, Pg> for EstadoTipoUsuario {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EstadoTipoUsuario {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ACTIVO" => Ok(Self::Activo),
            b"INACTIVO" => Ok(Self::Inactivo),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EstadoTipoUsuario {
    /// Returns the database string representation of this estado.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activo => "ACTIVO",
            Self::Inactivo => "INACTIVO",
        }
    }

    /// Parses the uppercase wire representation, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVO" => Some(Self::Activo),
            "INACTIVO" => Some(Self::Inactivo),
            _ => None,
        }
    }
}

impl fmt::Display for EstadoTipoUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a Usuario (inert data model).
///
/// Maps to `usuarios.estado` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum EstadoUsuario {
    Activo,
    Inactivo,
    Bloqueado,
}

impl ToSql<Text, Pg> for EstadoUsuario {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EstadoUsuario {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ACTIVO" => Ok(Self::Activo),
            b"INACTIVO" => Ok(Self::Inactivo),
            b"BLOQUEADO" => Ok(Self::Bloqueado),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EstadoUsuario {
    /// Returns the database string representation of this estado.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activo => "ACTIVO",
            Self::Inactivo => "INACTIVO",
            Self::Bloqueado => "BLOQUEADO",
        }
    }
}

impl fmt::Display for EstadoUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a Sesión (inert data model).
///
/// Maps to `sesiones.estado` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum EstadoSesion {
    Activa,
    Cerrada,
    Expirada,
}

impl ToSql<Text, Pg> for EstadoSesion {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EstadoSesion {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ACTIVA" => Ok(Self::Activa),
            b"CERRADA" => Ok(Self::Cerrada),
            b"EXPIRADA" => Ok(Self::Expirada),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EstadoSesion {
    /// Returns the database string representation of this estado.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activa => "ACTIVA",
            Self::Cerrada => "CERRADA",
            Self::Expirada => "EXPIRADA",
        }
    }
}

impl fmt::Display for EstadoSesion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access-audit record (inert data model).
///
/// Maps to `auditoria_accesos.estado` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum EstadoAuditoria {
    Permitido,
    Denegado,
}

impl ToSql<Text, Pg> for EstadoAuditoria {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EstadoAuditoria {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"PERMITIDO" => Ok(Self::Permitido),
            b"DENEGADO" => Ok(Self::Denegado),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EstadoAuditoria {
    /// Returns the database string representation of this estado.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permitido => "PERMITIDO",
            Self::Denegado => "DENEGADO",
        }
    }
}

impl fmt::Display for EstadoAuditoria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_aplicacion_parse_is_case_insensitive() {
        assert_eq!(
            EstadoAplicacion::parse("activo"),
            Some(EstadoAplicacion::Activo)
        );
        assert_eq!(
            EstadoAplicacion::parse(" INACTIVO "),
            Some(EstadoAplicacion::Inactivo)
        );
        assert_eq!(EstadoAplicacion::parse("SUSPENDIDO"), None);
    }

    #[test]
    fn estado_tipo_usuario_round_trips_as_str() {
        for estado in [EstadoTipoUsuario::Activo, EstadoTipoUsuario::Inactivo] {
            assert_eq!(EstadoTipoUsuario::parse(estado.as_str()), Some(estado));
        }
    }
}
