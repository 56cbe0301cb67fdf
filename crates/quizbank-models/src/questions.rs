//! Questions, their kinds, and the two client shapes.

use crate::ids::{QuestionId, QuizId};
use crate::options::{OptionData, OptionRecord, PublicOptionData};
use crate::quizzes::{QuizData, QuizRecord};
use quizbank_core::{Field, string_enum};
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    /// How a question is answered.
    pub enum QuestionType {
        SingleChoice => "single_choice",
        MultipleChoice => "multiple_choice",
        TrueFalse => "true_false",
        ShortAnswer => "short_answer",
    }
}

pg_text_enum!(QuestionType);

impl QuestionType {
    /// Whether answers are picked from a list of options.
    pub fn has_options(self) -> bool {
        !matches!(self, Self::ShortAnswer)
    }
}

/// A row of the `questions` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub quiz_id: QuizId,
    pub body: String,
    #[sqlx(rename = "type")]
    pub question_type: QuestionType,
    pub position: i32,
    pub points: i32,
    #[sqlx(skip)]
    pub quiz: Option<Box<QuizRecord>>,
    #[sqlx(skip)]
    pub options: Option<Vec<OptionRecord>>,
}

/// Authoring view of a question. Options carry `is_correct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<QuestionId>,
    pub quiz_id: QuizId,
    pub body: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub position: i32,
    pub points: i32,
    pub quiz: Option<Box<QuizData>>,
    pub options: Option<Vec<OptionData>>,
}

impl QuestionData {
    /// A question that has not been persisted yet, worth one point.
    pub fn new(quiz_id: QuizId, body: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: Field::Absent,
            quiz_id,
            body: body.into(),
            question_type,
            position: 0,
            points: 1,
            quiz: None,
            options: None,
        }
    }
}

impl From<QuestionRecord> for QuestionData {
    fn from(record: QuestionRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            quiz_id: record.quiz_id,
            body: record.body,
            question_type: record.question_type,
            position: record.position,
            points: record.points,
            quiz: record.quiz.map(|quiz| Box::new(QuizData::from(*quiz))),
            options: record
                .options
                .map(|options| options.into_iter().map(OptionData::from).collect()),
        }
    }
}

impl Exportable for QuestionData {
    fn declaration() -> Declaration {
        ShapeDecl::new("QuestionData", file!())
            .field(FieldDef::new("id", QuestionId::type_ref()).optional())
            .field(FieldDef::new("quiz_id", QuizId::type_ref()))
            .field(FieldDef::new("body", TypeRef::String))
            .field(FieldDef::new("type", TypeRef::of_enum::<QuestionType>()))
            .field(FieldDef::new("position", TypeRef::Integer))
            .field(FieldDef::new("points", TypeRef::Integer))
            .field(FieldDef::relation("quiz", TypeRef::shape("QuizData")))
            .field(FieldDef::relation(
                "options",
                TypeRef::list(TypeRef::shape("OptionData")),
            ))
            .into()
    }
}

/// What a quiz taker sees. There is no way back to the quiz and no option
/// reveals whether it is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestionData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<QuestionId>,
    pub quiz_id: QuizId,
    pub body: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub position: i32,
    pub points: i32,
    pub options: Option<Vec<PublicOptionData>>,
}

impl From<QuestionRecord> for PublicQuestionData {
    fn from(record: QuestionRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            quiz_id: record.quiz_id,
            body: record.body,
            question_type: record.question_type,
            position: record.position,
            points: record.points,
            options: record
                .options
                .map(|options| options.into_iter().map(PublicOptionData::from).collect()),
        }
    }
}

impl Exportable for PublicQuestionData {
    fn declaration() -> Declaration {
        ShapeDecl::new("PublicQuestionData", file!())
            .field(FieldDef::new("id", QuestionId::type_ref()).optional())
            .field(FieldDef::new("quiz_id", QuizId::type_ref()))
            .field(FieldDef::new("body", TypeRef::String))
            .field(FieldDef::new("type", TypeRef::of_enum::<QuestionType>()))
            .field(FieldDef::new("position", TypeRef::Integer))
            .field(FieldDef::new("points", TypeRef::Integer))
            .field(FieldDef::relation(
                "options",
                TypeRef::list(TypeRef::shape("PublicOptionData")),
            ))
            .into()
    }
}
