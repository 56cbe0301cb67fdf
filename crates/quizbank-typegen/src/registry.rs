//! The explicit export manifest.

use quizbank_core::StringEnum;

use crate::schema::{Declaration, EnumDecl, Exportable};

/// Ordered list of declarations to export.
///
/// The order in which declarations are registered is the order in which they
/// are emitted, so the same registry always yields the same output.
///
/// # Example
///
/// ```ignore
/// let registry = Registry::new()
///     .enumeration::<QuestionType>()
///     .shape::<OptionData>()
///     .shape::<QuestionData>();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    declarations: Vec<Declaration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape<T: Exportable>(self) -> Self {
        self.push(T::declaration())
    }

    pub fn enumeration<E: StringEnum>(self) -> Self {
        self.push(EnumDecl::of::<E>())
    }

    pub fn push(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }
}
