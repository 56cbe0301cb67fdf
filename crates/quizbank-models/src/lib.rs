//! # Quizbank Models
//!
//! Persistent record types, client-facing DTOs and closed string
//! enumerations for the Quizbank API.
//!
//! ## Layout
//!
//! Each domain module holds three things:
//!
//! - `*Record`: a row as the persistence layer returns it (`sqlx::FromRow`).
//!   Relations are `#[sqlx(skip)]` and only populated when eagerly loaded.
//! - `*Data`: the DTO sent to and received from the frontend. Every DTO is a
//!   total projection of its record and implements
//!   [`quizbank_typegen::Exportable`] so its TypeScript declaration can be
//!   generated.
//! - the string enumerations used by that domain.
//!
//! [`registry()`] is the manifest of everything that gets exported.

#[macro_use]
mod pg;

pub mod ids;
pub mod options;
pub mod permissions;
pub mod questions;
pub mod quizzes;
pub mod registry;
pub mod roles;
pub mod users;

#[cfg(test)]
mod test_support;

pub use ids::{OptionId, PermissionId, QuestionId, QuizId, RoleId, UserId};
pub use options::{OptionData, OptionRecord, PublicOptionData};
pub use permissions::{Permission, PermissionData, PermissionRecord};
pub use questions::{PublicQuestionData, QuestionData, QuestionRecord, QuestionType};
pub use quizzes::{QuizData, QuizRecord, QuizStatus, QuizSummaryData, QuizSummaryRecord};
pub use registry::registry;
pub use roles::{Role, RoleData, RoleRecord};
pub use users::{UserData, UserRecord};
