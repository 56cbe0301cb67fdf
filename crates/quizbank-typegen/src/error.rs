//! Error types for schema extraction.

use std::path::PathBuf;

/// A malformed or inconsistent declaration.
///
/// Every variant names the offending declaration and the file it is declared
/// in. A declaration error only excludes that declaration (and anything that
/// depends on it) from the output; the rest of the run still completes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("{declaration} ({source_file}): name is already declared in {first_source}")]
    DuplicateName {
        declaration: String,
        source_file: String,
        first_source: String,
    },

    #[error("{declaration} ({source_file}): field `{field}` is declared more than once")]
    DuplicateField {
        declaration: String,
        source_file: String,
        field: String,
    },

    #[error("{declaration} ({source_file}): field `{field}` references undeclared {kind} `{target}`")]
    UnknownReference {
        declaration: String,
        source_file: String,
        field: String,
        kind: &'static str,
        target: String,
    },

    #[error("{declaration} ({source_file}): relation `{field}` must reference a shape")]
    InvalidRelation {
        declaration: String,
        source_file: String,
        field: String,
    },

    #[error("{declaration} ({source_file}): field `{field}` depends on `{dependency}`, which failed validation")]
    FailedDependency {
        declaration: String,
        source_file: String,
        field: String,
        dependency: String,
    },

    #[error("{declaration} ({source_file}): enumeration has no variants")]
    EmptyEnumeration {
        declaration: String,
        source_file: String,
    },

    #[error("{declaration} ({source_file}): value '{value}' appears more than once")]
    DuplicateValue {
        declaration: String,
        source_file: String,
        value: String,
    },

    #[error("{declaration} ({source_file}): symbol `{symbol}` appears more than once")]
    DuplicateSymbol {
        declaration: String,
        source_file: String,
        symbol: String,
    },
}

impl DeclarationError {
    /// Name of the offending declaration.
    pub fn declaration(&self) -> &str {
        match self {
            Self::DuplicateName { declaration, .. }
            | Self::DuplicateField { declaration, .. }
            | Self::UnknownReference { declaration, .. }
            | Self::InvalidRelation { declaration, .. }
            | Self::FailedDependency { declaration, .. }
            | Self::EmptyEnumeration { declaration, .. }
            | Self::DuplicateValue { declaration, .. }
            | Self::DuplicateSymbol { declaration, .. } => declaration,
        }
    }

    /// File the offending declaration lives in.
    pub fn source_file(&self) -> &str {
        match self {
            Self::DuplicateName { source_file, .. }
            | Self::DuplicateField { source_file, .. }
            | Self::UnknownReference { source_file, .. }
            | Self::InvalidRelation { source_file, .. }
            | Self::FailedDependency { source_file, .. }
            | Self::EmptyEnumeration { source_file, .. }
            | Self::DuplicateValue { source_file, .. }
            | Self::DuplicateSymbol { source_file, .. } => source_file,
        }
    }
}

/// The output artifact could not be written. The previous file is left intact.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write temporary file next to {path}: {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
