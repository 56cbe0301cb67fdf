//! # Quizbank Typegen
//!
//! Schema extraction: renders the exported data shapes and enumerations of
//! the backend as TypeScript declarations for the frontend.
//!
//! - [`schema`]: declaration model ([`ShapeDecl`], [`EnumDecl`], [`Exportable`])
//! - [`registry`]: the explicit export manifest
//! - [`validate`]: per-declaration consistency checks
//! - [`emit`]: TypeScript rendering
//! - [`writer`]: atomic replacement of the output file
//! - [`extract`]: a full extraction pass and its per-declaration report
//!
//! # Example
//!
//! ```ignore
//! use quizbank_config::TypegenConfig;
//! use quizbank_typegen::generate;
//!
//! let summary = generate(&quizbank_models::registry(), &TypegenConfig::from_env());
//! for failure in summary.report.failures() {
//!     eprintln!("{} failed", failure.name);
//! }
//! ```

pub mod emit;
pub mod error;
pub mod extract;
pub mod registry;
pub mod schema;
pub mod validate;
pub mod writer;

pub use error::{DeclarationError, WriteError};
pub use extract::{
    DeclarationOutcome, Extraction, ExtractionReport, GenerateSummary, extract, generate,
};
pub use registry::Registry;
pub use schema::{
    DATA_NAMESPACE, Declaration, ENUM_NAMESPACE, EnumDecl, EnumVariant, Exportable, FieldDef,
    ShapeDecl, TypeRef,
};
pub use writer::{WriteOutcome, write_atomic};
