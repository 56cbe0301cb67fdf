//! Declaration model for exportable shapes and enumerations.
//!
//! Declarations are plain descriptive values: they are built from the
//! explicit export manifest on every extraction pass and never mutated
//! afterwards.

use quizbank_core::StringEnum;

/// Namespace shapes are exported under unless stated otherwise.
pub const DATA_NAMESPACE: &str = "App.Data";
/// Namespace enumerations are exported under unless stated otherwise.
pub const ENUM_NAMESPACE: &str = "App.Enums";

/// Semantic type of a shape field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    String,
    Integer,
    Float,
    Boolean,
    /// RFC 3339 timestamp, transported as a string.
    DateTime,
    /// Calendar date (`YYYY-MM-DD`), transported as a string.
    Date,
    /// Arbitrary JSON.
    Unknown,
    List(Box<TypeRef>),
    /// Reference to another exported shape, by name.
    Shape(String),
    /// Reference to an exported enumeration, by name.
    Enum(String),
}

impl TypeRef {
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn shape(name: impl Into<String>) -> Self {
        Self::Shape(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Reference to the enumeration declared by `E`.
    pub fn of_enum<E: StringEnum>() -> Self {
        Self::Enum(E::NAME.to_string())
    }

    /// The shape this type points at, looking through lists.
    pub fn referenced_shape(&self) -> Option<&str> {
        match self {
            Self::Shape(name) => Some(name),
            Self::List(inner) => inner.referenced_shape(),
            _ => None,
        }
    }
}

/// One member of a shape.
///
/// `optional` means the member may be missing from an instance; `nullable`
/// means it may be present with a null value. Both can hold at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub nullable: bool,
    pub optional: bool,
    /// Set for eagerly-loadable relations. Relations are null when not loaded.
    pub relation: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            optional: false,
            relation: false,
        }
    }

    /// A relation to another shape. Always nullable.
    pub fn relation(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            nullable: true,
            relation: true,
            ..Self::new(name, ty)
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDecl {
    pub name: String,
    pub namespace: String,
    /// Source file the shape is declared in.
    pub source: String,
    pub fields: Vec<FieldDef>,
}

impl ShapeDecl {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DATA_NAMESPACE.to_string(),
            source: source.into(),
            fields: Vec::new(),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

/// One `(symbol, value)` pair of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub symbol: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub namespace: String,
    pub source: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: ENUM_NAMESPACE.to_string(),
            source: source.into(),
            variants: Vec::new(),
        }
    }

    /// Declaration of a [`StringEnum`], preserving declaration order.
    pub fn of<E: StringEnum>() -> Self {
        E::pairs()
            .into_iter()
            .fold(Self::new(E::NAME, E::SOURCE), |decl, (symbol, value)| {
                decl.variant(symbol, value)
            })
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn variant(mut self, symbol: impl Into<String>, value: impl Into<String>) -> Self {
        self.variants.push(EnumVariant {
            symbol: symbol.into(),
            value: value.into(),
        });
        self
    }

    /// Underlying values in declaration order.
    pub fn values(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.value.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Shape(ShapeDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Shape(shape) => &shape.name,
            Self::Enum(decl) => &decl.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Shape(shape) => &shape.namespace,
            Self::Enum(decl) => &decl.namespace,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Shape(shape) => &shape.source,
            Self::Enum(decl) => &decl.source,
        }
    }

    /// Fully qualified client-side name, e.g. `App.Data.QuizData`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }
}

impl From<ShapeDecl> for Declaration {
    fn from(shape: ShapeDecl) -> Self {
        Self::Shape(shape)
    }
}

impl From<EnumDecl> for Declaration {
    fn from(decl: EnumDecl) -> Self {
        Self::Enum(decl)
    }
}

/// A data shape that is exported to the client.
///
/// Implementors are listed in the export manifest; extraction never
/// discovers them by reflection.
pub trait Exportable {
    fn declaration() -> Declaration;
}

#[cfg(test)]
mod tests {
    use super::*;

    quizbank_core::string_enum! {
        enum Decision {
            Pending => "pending",
            Approved => "approved",
            Rejected => "rejected",
        }
    }

    #[test]
    fn test_enum_decl_of_keeps_declaration_order() {
        let decl = EnumDecl::of::<Decision>();
        assert_eq!(decl.name, "Decision");
        assert_eq!(decl.namespace, ENUM_NAMESPACE);
        assert_eq!(decl.values(), vec!["pending", "approved", "rejected"]);
        assert_eq!(decl.variants[1].symbol, "Approved");
    }

    #[test]
    fn test_relation_is_nullable() {
        let field = FieldDef::relation("quiz", TypeRef::shape("QuizData"));
        assert!(field.nullable);
        assert!(field.relation);
        assert!(!field.optional);
    }

    #[test]
    fn test_referenced_shape_looks_through_lists() {
        let ty = TypeRef::list(TypeRef::shape("OptionData"));
        assert_eq!(ty.referenced_shape(), Some("OptionData"));
        assert_eq!(TypeRef::String.referenced_shape(), None);
        assert_eq!(TypeRef::enumeration("Role").referenced_shape(), None);
    }

    #[test]
    fn test_qualified_name() {
        let decl: Declaration = ShapeDecl::new("QuizData", file!()).into();
        assert_eq!(decl.qualified_name(), "App.Data.QuizData");
    }
}
