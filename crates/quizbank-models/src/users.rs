//! User records and the user DTO.
//!
//! The persisted user carries credentials; the DTO never does.

use crate::ids::UserId;
use crate::roles::{RoleData, RoleRecord};
use chrono::{DateTime, Utc};
use quizbank_core::Field;
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table, with roles when they were eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub roles: Option<Vec<RoleRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<UserId>,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub roles: Option<Vec<RoleData>>,
}

impl UserData {
    /// A user that has not been persisted yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Field::Absent,
            name: name.into(),
            email: email.into(),
            email_verified_at: None,
            roles: None,
        }
    }

    /// Names of the loaded roles; empty when roles were not loaded.
    pub fn role_names(&self) -> Vec<&str> {
        self.roles
            .iter()
            .flatten()
            .map(|role| role.name.as_str())
            .collect()
    }
}

impl From<UserRecord> for UserData {
    fn from(record: UserRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            name: record.name,
            email: record.email,
            email_verified_at: record.email_verified_at,
            roles: record
                .roles
                .map(|roles| roles.into_iter().map(RoleData::from).collect()),
        }
    }
}

impl Exportable for UserData {
    fn declaration() -> Declaration {
        ShapeDecl::new("UserData", file!())
            .field(FieldDef::new("id", UserId::type_ref()).optional())
            .field(FieldDef::new("name", TypeRef::String))
            .field(FieldDef::new("email", TypeRef::String))
            .field(FieldDef::new("email_verified_at", TypeRef::DateTime).nullable())
            .field(FieldDef::relation(
                "roles",
                TypeRef::list(TypeRef::shape("RoleData")),
            ))
            .into()
    }
}
