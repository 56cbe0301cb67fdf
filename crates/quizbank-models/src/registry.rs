//! The export manifest.

use quizbank_typegen::Registry;

use crate::options::{OptionData, PublicOptionData};
use crate::permissions::{Permission, PermissionData};
use crate::questions::{PublicQuestionData, QuestionData, QuestionType};
use crate::quizzes::{QuizData, QuizStatus, QuizSummaryData};
use crate::roles::{Role, RoleData};
use crate::users::UserData;

/// Every shape and enumeration shared with the frontend, in output order.
///
/// A type that is not listed here is not exported.
pub fn registry() -> Registry {
    Registry::new()
        .enumeration::<Role>()
        .enumeration::<Permission>()
        .enumeration::<QuestionType>()
        .enumeration::<QuizStatus>()
        .shape::<PermissionData>()
        .shape::<RoleData>()
        .shape::<UserData>()
        .shape::<OptionData>()
        .shape::<PublicOptionData>()
        .shape::<QuestionData>()
        .shape::<PublicQuestionData>()
        .shape::<QuizData>()
        .shape::<QuizSummaryData>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_typegen::extract;

    #[test]
    fn test_manifest_is_consistent() {
        let extraction = extract(&registry());
        let failures: Vec<String> = extraction.report.errors().map(|e| e.to_string()).collect();
        assert!(failures.is_empty(), "{failures:#?}");
        assert_eq!(extraction.report.outcomes.len(), 13);
    }

    #[test]
    fn test_declarations_point_at_their_source_files() {
        let registry = registry();
        let quiz = registry.find("QuizData").unwrap();
        assert!(quiz.source().ends_with("quizzes.rs"));
        let role = registry.find("Role").unwrap();
        assert!(role.source().ends_with("roles.rs"));
    }

    #[test]
    fn test_public_option_shape_has_no_correctness_member() {
        let extraction = extract(&registry());
        let public = extraction
            .output
            .split("export type PublicOptionData = {")
            .nth(1)
            .and_then(|rest| rest.split("};").next())
            .unwrap();
        assert!(!public.contains("is_correct"));
    }
}
