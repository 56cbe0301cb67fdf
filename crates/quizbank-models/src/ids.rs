//! Strongly-typed ID newtypes for persisted entities.
//!
//! Each entity gets its own wrapper around the `bigint` primary key so that
//! a `QuizId` can never be passed where a `QuestionId` is expected.

use quizbank_typegen::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Client-side type of this ID.
            pub fn type_ref() -> TypeRef {
                TypeRef::Integer
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// ID of a user account.
    UserId
);

define_id!(
    /// ID of a role.
    RoleId
);

define_id!(
    /// ID of a permission.
    PermissionId
);

define_id!(
    /// ID of a quiz.
    QuizId
);

define_id!(
    /// ID of a question.
    QuestionId
);

define_id!(
    /// ID of an answer option.
    OptionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&QuizId::new(42)).unwrap(), "42");
        let id: QuestionId = serde_json::from_str("7").unwrap();
        assert_eq!(id, QuestionId::from(7));
    }

    #[test]
    fn test_id_debug_and_display() {
        assert_eq!(format!("{:?}", UserId::new(3)), "UserId(3)");
        assert_eq!(UserId::new(3).to_string(), "3");
        assert_eq!(i64::from(OptionId::new(9)), 9);
    }
}
