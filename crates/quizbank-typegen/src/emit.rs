//! TypeScript rendering.
//!
//! Shapes become object type aliases, enumerations become unions of string
//! literals. Declarations are grouped into `declare namespace` blocks in the
//! order their namespace first appears; within a block they keep registry
//! order. Nothing volatile (timestamps, hashes) is written, so rendering the
//! same declarations twice yields identical bytes.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::schema::{Declaration, EnumDecl, FieldDef, ShapeDecl, TypeRef};

/// First line of every generated file.
pub const HEADER: &str =
    "/* This file is generated by quizbank-typegen. Do not edit it by hand. */";

const INDENT: &str = "    ";

/// Render `declarations` into a complete declaration file.
///
/// References are qualified with the namespace of the declaration they point
/// at. Callers are expected to pass validated declarations only.
pub fn render(declarations: &[&Declaration]) -> String {
    let namespaces: HashMap<&str, &str> = declarations
        .iter()
        .map(|d| (d.name(), d.namespace()))
        .collect();

    let mut order: Vec<&str> = Vec::new();
    for decl in declarations {
        if !order.contains(&decl.namespace()) {
            order.push(decl.namespace());
        }
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for namespace in order {
        let _ = writeln!(out, "declare namespace {namespace} {{");
        for decl in declarations.iter().filter(|d| d.namespace() == namespace) {
            match decl {
                Declaration::Shape(shape) => render_shape(&mut out, shape, &namespaces),
                Declaration::Enum(decl) => render_enum(&mut out, decl),
            }
        }
        out.push_str("}\n");
    }

    out
}

fn render_shape(out: &mut String, shape: &ShapeDecl, namespaces: &HashMap<&str, &str>) {
    if shape.fields.is_empty() {
        let _ = writeln!(out, "{INDENT}export type {} = {{}};", shape.name);
        return;
    }

    let _ = writeln!(out, "{INDENT}export type {} = {{", shape.name);
    for field in &shape.fields {
        let _ = writeln!(out, "{INDENT}{INDENT}{};", render_field(field, namespaces));
    }
    let _ = writeln!(out, "{INDENT}}};");
}

fn render_enum(out: &mut String, decl: &EnumDecl) {
    let union = if decl.variants.is_empty() {
        "never".to_string()
    } else {
        decl.variants
            .iter()
            .map(|v| string_literal(&v.value))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let _ = writeln!(out, "{INDENT}export type {} = {};", decl.name, union);
}

/// `name?: T | null` style member signature, without the trailing `;`.
pub fn render_field(field: &FieldDef, namespaces: &HashMap<&str, &str>) -> String {
    let mut ty = render_type(&field.ty, namespaces);
    if field.nullable {
        ty.push_str(" | null");
    }
    format!(
        "{}{}: {}",
        property_name(&field.name),
        if field.optional { "?" } else { "" },
        ty
    )
}

pub fn render_type(ty: &TypeRef, namespaces: &HashMap<&str, &str>) -> String {
    match ty {
        TypeRef::String | TypeRef::DateTime | TypeRef::Date => "string".to_string(),
        TypeRef::Integer | TypeRef::Float => "number".to_string(),
        TypeRef::Boolean => "boolean".to_string(),
        TypeRef::Unknown => "unknown".to_string(),
        TypeRef::List(inner) => format!("Array<{}>", render_type(inner, namespaces)),
        TypeRef::Shape(name) | TypeRef::Enum(name) => match namespaces.get(name.as_str()) {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name.clone(),
        },
    }
}

fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumDecl, FieldDef, ShapeDecl};

    fn no_namespaces() -> HashMap<&'static str, &'static str> {
        HashMap::new()
    }

    #[test]
    fn test_optional_nullable_field_keeps_both_markers() {
        let field = FieldDef::new("time_limit_minutes", TypeRef::Integer)
            .optional()
            .nullable();
        assert_eq!(
            render_field(&field, &no_namespaces()),
            "time_limit_minutes?: number | null"
        );
    }

    #[test]
    fn test_optional_only_and_nullable_only() {
        let id = FieldDef::new("id", TypeRef::Integer).optional();
        let description = FieldDef::new("description", TypeRef::String).nullable();
        assert_eq!(render_field(&id, &no_namespaces()), "id?: number");
        assert_eq!(
            render_field(&description, &no_namespaces()),
            "description: string | null"
        );
    }

    #[test]
    fn test_scalar_mapping() {
        let ns = no_namespaces();
        assert_eq!(render_type(&TypeRef::DateTime, &ns), "string");
        assert_eq!(render_type(&TypeRef::Float, &ns), "number");
        assert_eq!(render_type(&TypeRef::Boolean, &ns), "boolean");
        assert_eq!(render_type(&TypeRef::Unknown, &ns), "unknown");
        assert_eq!(
            render_type(&TypeRef::list(TypeRef::String), &ns),
            "Array<string>"
        );
    }

    #[test]
    fn test_references_are_qualified_not_inlined() {
        let mut ns = HashMap::new();
        ns.insert("OptionData", "App.Data");
        let field = FieldDef::relation("options", TypeRef::list(TypeRef::shape("OptionData")));
        assert_eq!(
            render_field(&field, &ns),
            "options: Array<App.Data.OptionData> | null"
        );
    }

    #[test]
    fn test_unusual_property_names_are_quoted() {
        let field = FieldDef::new("is-correct", TypeRef::Boolean);
        assert_eq!(render_field(&field, &no_namespaces()), "'is-correct': boolean");
    }

    #[test]
    fn test_enum_literals_keep_order_and_escape() {
        let decl: Declaration = EnumDecl::new("Answer", "enums.rs")
            .variant("Yes", "yes")
            .variant("Quoted", "it's")
            .variant("Abstain", "abstain")
            .into();
        let output = render(&[&decl]);
        assert!(output.contains("export type Answer = 'yes' | 'it\\'s' | 'abstain';"));
    }

    #[test]
    fn test_full_file_layout() {
        let status: Declaration = EnumDecl::new("QuizStatus", "enums.rs")
            .variant("Draft", "draft")
            .variant("Published", "published")
            .into();
        let quiz: Declaration = ShapeDecl::new("QuizData", "quizzes.rs")
            .field(FieldDef::new("id", TypeRef::Integer).optional())
            .field(FieldDef::new("status", TypeRef::enumeration("QuizStatus")))
            .into();
        let empty: Declaration = ShapeDecl::new("EmptyData", "empty.rs").into();

        let output = render(&[&quiz, &status, &empty]);
        let expected = "\
/* This file is generated by quizbank-typegen. Do not edit it by hand. */
declare namespace App.Data {
    export type QuizData = {
        id?: number;
        status: App.Enums.QuizStatus;
    };
    export type EmptyData = {};
}
declare namespace App.Enums {
    export type QuizStatus = 'draft' | 'published';
}
";
        assert_eq!(output, expected);
    }
}
