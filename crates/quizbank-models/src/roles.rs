//! Role names and the role DTO.

use crate::ids::RoleId;
use crate::permissions::{Permission, PermissionData, PermissionRecord};
use quizbank_core::{Field, string_enum};
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    /// The roles users can be assigned.
    pub enum Role {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
    }
}

impl Role {
    /// Permissions a freshly seeded role is granted.
    pub fn default_permissions(self) -> &'static [Permission] {
        match self {
            Self::Admin => &[
                Permission::ViewQuizzes,
                Permission::CreateQuizzes,
                Permission::UpdateQuizzes,
                Permission::DeleteQuizzes,
                Permission::TakeQuizzes,
                Permission::ManageQuestions,
                Permission::ManageUsers,
                Permission::ManageRoles,
            ],
            Self::Teacher => &[
                Permission::ViewQuizzes,
                Permission::CreateQuizzes,
                Permission::UpdateQuizzes,
                Permission::DeleteQuizzes,
                Permission::ManageQuestions,
            ],
            Self::Student => &[Permission::ViewQuizzes, Permission::TakeQuizzes],
        }
    }
}

/// A row of the `roles` table, with its permissions when they were loaded.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: String,
    #[sqlx(skip)]
    pub permissions: Option<Vec<PermissionRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<RoleId>,
    pub name: String,
    pub permissions: Option<Vec<PermissionData>>,
}

impl From<RoleRecord> for RoleData {
    fn from(record: RoleRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            name: record.name,
            permissions: record
                .permissions
                .map(|permissions| permissions.into_iter().map(PermissionData::from).collect()),
        }
    }
}

impl From<Role> for RoleData {
    /// An unsaved role carrying its default permissions.
    fn from(role: Role) -> Self {
        Self {
            id: Field::Absent,
            name: role.to_string(),
            permissions: Some(
                role.default_permissions()
                    .iter()
                    .copied()
                    .map(PermissionData::from)
                    .collect(),
            ),
        }
    }
}

impl Exportable for RoleData {
    fn declaration() -> Declaration {
        ShapeDecl::new("RoleData", file!())
            .field(FieldDef::new("id", RoleId::type_ref()).optional())
            .field(FieldDef::new("name", TypeRef::String))
            .field(FieldDef::relation(
                "permissions",
                TypeRef::list(TypeRef::shape("PermissionData")),
            ))
            .into()
    }
}
