//! Quizzes, their lifecycle status, and listing summaries.

use crate::ids::{QuizId, UserId};
use crate::questions::{QuestionData, QuestionRecord};
use crate::users::{UserData, UserRecord};
use chrono::{DateTime, Utc};
use quizbank_core::{Field, string_enum};
use quizbank_typegen::{Declaration, Exportable, FieldDef, ShapeDecl, TypeRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    /// Lifecycle of a quiz.
    pub enum QuizStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

pg_text_enum!(QuizStatus);

impl QuizStatus {
    pub fn is_takeable(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// A row of the `quizzes` table, with author and questions when loaded.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct QuizRecord {
    pub id: QuizId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: QuizStatus,
    pub time_limit_minutes: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub author: Option<Box<UserRecord>>,
    #[sqlx(skip)]
    pub questions: Option<Vec<QuestionRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<QuizId>,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: QuizStatus,
    /// May be left out entirely, or sent as null to mean "no limit".
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub time_limit_minutes: Field<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: Option<Box<UserData>>,
    pub questions: Option<Vec<QuestionData>>,
}

impl QuizData {
    /// A new, unsaved draft owned by `user_id`.
    pub fn draft(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id: Field::Absent,
            user_id,
            title: title.into(),
            description: None,
            status: QuizStatus::Draft,
            time_limit_minutes: Field::Absent,
            created_at: None,
            updated_at: None,
            author: None,
            questions: None,
        }
    }

    /// Total points over the loaded questions, if they were loaded.
    pub fn total_points(&self) -> Option<i64> {
        self.questions
            .as_ref()
            .map(|questions| questions.iter().map(|q| i64::from(q.points)).sum())
    }
}

impl From<QuizRecord> for QuizData {
    fn from(record: QuizRecord) -> Self {
        Self {
            id: Field::Present(record.id),
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            status: record.status,
            time_limit_minutes: Field::from(record.time_limit_minutes),
            created_at: record.created_at,
            updated_at: record.updated_at,
            author: record.author.map(|author| Box::new(UserData::from(*author))),
            questions: record
                .questions
                .map(|questions| questions.into_iter().map(QuestionData::from).collect()),
        }
    }
}

impl Exportable for QuizData {
    fn declaration() -> Declaration {
        ShapeDecl::new("QuizData", file!())
            .field(FieldDef::new("id", QuizId::type_ref()).optional())
            .field(FieldDef::new("user_id", UserId::type_ref()))
            .field(FieldDef::new("title", TypeRef::String))
            .field(FieldDef::new("description", TypeRef::String).nullable())
            .field(FieldDef::new("status", TypeRef::of_enum::<QuizStatus>()))
            .field(
                FieldDef::new("time_limit_minutes", TypeRef::Integer)
                    .optional()
                    .nullable(),
            )
            .field(FieldDef::new("created_at", TypeRef::DateTime).nullable())
            .field(FieldDef::new("updated_at", TypeRef::DateTime).nullable())
            .field(FieldDef::relation("author", TypeRef::shape("UserData")))
            .field(FieldDef::relation(
                "questions",
                TypeRef::list(TypeRef::shape("QuestionData")),
            ))
            .into()
    }
}

/// A quiz row joined with its question count, as used by listings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct QuizSummaryRecord {
    pub id: QuizId,
    pub title: String,
    pub question_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummaryData {
    pub id: QuizId,
    pub title: String,
    pub question_count: i64,
}

impl From<QuizSummaryRecord> for QuizSummaryData {
    fn from(record: QuizSummaryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            question_count: record.question_count,
        }
    }
}

impl Exportable for QuizSummaryData {
    fn declaration() -> Declaration {
        ShapeDecl::new("QuizSummaryData", file!())
            .field(FieldDef::new("id", QuizId::type_ref()))
            .field(FieldDef::new("title", TypeRef::String))
            .field(FieldDef::new("question_count", TypeRef::Integer))
            .into()
    }
}
