//! Permission names and the permission DTO.

use crate::ids::PermissionId;
use quizbank_core::{Field, string_enum};
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    /// Every permission name known to the application.
    pub enum Permission {
        ViewQuizzes => "quizzes.view",
        CreateQuizzes => "quizzes.create",
        UpdateQuizzes => "quizzes.update",
        DeleteQuizzes => "quizzes.delete",
        TakeQuizzes => "quizzes.take",
        ManageQuestions => "questions.manage",
        ManageUsers => "users.manage",
        ManageRoles => "roles.manage",
    }
}

/// A row of the `permissions` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<PermissionId>,
    pub name: String,
}

impl PermissionData {
    /// A permission that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Field::Absent,
            name: name.into(),
        }
    }
}

impl From<PermissionRecord> for PermissionData {
    fn from(record: PermissionRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            name: record.name,
        }
    }
}

impl From<Permission> for PermissionData {
    fn from(permission: Permission) -> Self {
        Self::new(permission.to_string())
    }
}

impl Exportable for PermissionData {
    fn declaration() -> Declaration {
        ShapeDecl::new("PermissionData", file!())
            .field(FieldDef::new("id", PermissionId::type_ref()).optional())
            .field(FieldDef::new("name", TypeRef::String))
            .into()
    }
}
