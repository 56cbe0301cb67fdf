//! One complete extraction pass.
//!
//! Every pass regenerates the whole output from the registry; there is no
//! incremental mode. Declarations that fail validation are left out and
//! reported, everything else is emitted.

use quizbank_config::TypegenConfig;
use tracing::{error, info, warn};

use crate::emit;
use crate::error::{DeclarationError, WriteError};
use crate::registry::Registry;
use crate::schema::Declaration;
use crate::validate::validate;
use crate::writer::{WriteOutcome, write_atomic};

/// Result of extracting a single declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationOutcome {
    pub name: String,
    pub source: String,
    pub result: Result<(), Vec<DeclarationError>>,
}

impl DeclarationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-declaration results of one extraction pass, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub outcomes: Vec<DeclarationOutcome>,
}

impl ExtractionReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(DeclarationOutcome::is_success)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DeclarationOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeclarationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn outcome(&self, name: &str) -> Option<&DeclarationOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// All declaration errors, flattened.
    pub fn errors(&self) -> impl Iterator<Item = &DeclarationError> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err())
            .flatten()
    }
}

/// Rendered output plus the report it was produced with.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub output: String,
    pub report: ExtractionReport,
}

/// Validate and render every declaration in `registry`.
pub fn extract(registry: &Registry) -> Extraction {
    let validation = validate(registry);

    let mut emitted: Vec<&Declaration> = Vec::new();
    let mut outcomes = Vec::with_capacity(registry.len());

    for (decl, errors) in registry.declarations().iter().zip(validation) {
        let result = if errors.is_empty() {
            emitted.push(decl);
            Ok(())
        } else {
            Err(errors)
        };
        outcomes.push(DeclarationOutcome {
            name: decl.name().to_string(),
            source: decl.source().to_string(),
            result,
        });
    }

    Extraction {
        output: emit::render(&emitted),
        report: ExtractionReport { outcomes },
    }
}

/// Summary of [`generate`].
#[derive(Debug)]
pub struct GenerateSummary {
    pub report: ExtractionReport,
    pub write: Result<WriteOutcome, WriteError>,
}

impl GenerateSummary {
    /// True when every declaration was emitted and the file is up to date.
    pub fn is_success(&self) -> bool {
        self.report.is_success() && self.write.is_ok()
    }
}

/// Extract `registry` and write the result to the configured output path.
///
/// Declaration errors and write errors are logged and returned; neither
/// aborts the caller.
pub fn generate(registry: &Registry, config: &TypegenConfig) -> GenerateSummary {
    let Extraction { output, report } = extract(registry);

    for err in report.errors() {
        error!(
            declaration = %err.declaration(),
            source_file = %err.source_file(),
            "{}",
            err
        );
    }

    let write = write_atomic(&config.output_path, &output);
    match &write {
        Ok(outcome) => info!(
            path = %config.output_path.display(),
            exported = report.succeeded().count(),
            failed = report.failures().count(),
            outcome = ?outcome,
            "Client types generated"
        ),
        Err(e) => warn!(
            path = %config.output_path.display(),
            error = %e,
            "Failed to write client types; previous file left in place"
        ),
    }

    GenerateSummary { report, write }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumDecl, FieldDef, ShapeDecl, TypeRef};

    fn registry_with_one_broken_shape() -> Registry {
        Registry::new()
            .push(
                EnumDecl::new("ReviewStatus", "enums.rs")
                    .variant("Pending", "pending")
                    .variant("Approved", "approved")
                    .variant("Rejected", "rejected"),
            )
            .push(
                ShapeDecl::new("ReviewData", "reviews.rs")
                    .field(FieldDef::new("id", TypeRef::Integer).optional())
                    .field(FieldDef::new("status", TypeRef::enumeration("ReviewStatus")))
                    .field(FieldDef::relation("reviewer", TypeRef::shape("ReviewerData"))),
            )
            .push(
                ShapeDecl::new("CommentData", "comments.rs")
                    .field(FieldDef::new("body", TypeRef::String))
                    .field(FieldDef::new("edited_at", TypeRef::DateTime).nullable()),
            )
    }

    #[test]
    fn test_partial_failure_still_emits_the_rest() {
        let extraction = extract(&registry_with_one_broken_shape());

        assert!(!extraction.report.is_success());
        let failed: Vec<&str> = extraction
            .report
            .failures()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(failed, vec!["ReviewData"]);

        let outcome = extraction.report.outcome("ReviewData").unwrap();
        assert_eq!(outcome.source, "reviews.rs");

        assert!(!extraction.output.contains("ReviewData"));
        assert!(extraction.output.contains("export type CommentData = {"));
        assert!(extraction.output.contains(
            "export type ReviewStatus = 'pending' | 'approved' | 'rejected';"
        ));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let registry = registry_with_one_broken_shape();
        assert_eq!(extract(&registry).output, extract(&registry).output);
    }

    #[test]
    fn test_one_definition_per_declaration() {
        let registry = Registry::new()
            .push(ShapeDecl::new("AData", "a.rs").field(FieldDef::new("x", TypeRef::String)))
            .push(ShapeDecl::new("BData", "b.rs").field(FieldDef::new("y", TypeRef::Float)));

        let extraction = extract(&registry);
        assert!(extraction.report.is_success());
        assert_eq!(extraction.output.matches("export type ").count(), 2);
    }

    #[test]
    fn test_generate_writes_even_with_declaration_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = TypegenConfig::default().with_output_path(dir.path().join("types.d.ts"));

        let summary = generate(&registry_with_one_broken_shape(), &config);

        assert!(!summary.is_success());
        assert!(matches!(summary.write, Ok(WriteOutcome::Written)));
        let written = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(written.contains("CommentData"));
    }
}
