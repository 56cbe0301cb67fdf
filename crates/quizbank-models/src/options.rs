//! Answer options.
//!
//! Two client shapes exist for the same record. [`OptionData`] is the
//! authoring shape and carries `is_correct`; [`PublicOptionData`] is what a
//! quiz taker receives and has no such member at all.

use crate::ids::{OptionId, QuestionId};
use quizbank_core::Field;
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `options` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OptionRecord {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub body: String,
    pub is_correct: bool,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<OptionId>,
    pub question_id: QuestionId,
    pub body: String,
    pub is_correct: bool,
    pub position: i32,
}

impl OptionData {
    pub fn new(question_id: QuestionId, body: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: Field::Absent,
            question_id,
            body: body.into(),
            is_correct,
            position: 0,
        }
    }
}

impl From<OptionRecord> for OptionData {
    fn from(record: OptionRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            question_id: record.question_id,
            body: record.body,
            is_correct: record.is_correct,
            position: record.position,
        }
    }
}

impl Exportable for OptionData {
    fn declaration() -> Declaration {
        ShapeDecl::new("OptionData", file!())
            .field(FieldDef::new("id", OptionId::type_ref()).optional())
            .field(FieldDef::new("question_id", QuestionId::type_ref()))
            .field(FieldDef::new("body", TypeRef::String))
            .field(FieldDef::new("is_correct", TypeRef::Boolean))
            .field(FieldDef::new("position", TypeRef::Integer))
            .into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicOptionData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<OptionId>,
    pub question_id: QuestionId,
    pub body: String,
    pub position: i32,
}

impl From<OptionRecord> for PublicOptionData {
    fn from(record: OptionRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            question_id: record.question_id,
            body: record.body,
            position: record.position,
        }
    }
}

impl From<OptionData> for PublicOptionData {
    fn from(data: OptionData) -> Self {
        Self {
            id: data.id,
            question_id: data.question_id,
            body: data.body,
            position: data.position,
        }
    }
}

impl Exportable for PublicOptionData {
    fn declaration() -> Declaration {
        ShapeDecl::new("PublicOptionData", file!())
            .field(FieldDef::new("id", OptionId::type_ref()).optional())
            .field(FieldDef::new("question_id", QuestionId::type_ref()))
            .field(FieldDef::new("body", TypeRef::String))
            .field(FieldDef::new("position", TypeRef::Integer))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_keys_match_declaration;

    fn record() -> OptionRecord {
        OptionRecord {
            id: OptionId::new(11),
            question_id: QuestionId::new(4),
            body: "Paris".to_string(),
            is_correct: true,
            position: 1,
        }
    }

    #[test]
    fn test_public_shape_never_exposes_correctness() {
        let json = serde_json::to_value(PublicOptionData::from(record())).unwrap();
        assert!(json.get("is_correct").is_none());

        let from_authoring = PublicOptionData::from(OptionData::from(record()));
        assert_eq!(from_authoring, PublicOptionData::from(record()));
    }

    #[test]
    fn test_new_option_has_absent_id() {
        let json =
            serde_json::to_value(OptionData::new(QuestionId::new(4), "Lyon", false)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["is_correct"], serde_json::json!(false));
    }

    #[test]
    fn test_serialized_keys_match_declarations() {
        assert_keys_match_declaration(&OptionData::from(record()), OptionData::declaration());
        assert_keys_match_declaration(
            &PublicOptionData::from(record()),
            PublicOptionData::declaration(),
        );
    }
}
