//! Consistency checks over a registry.
//!
//! Validation is per declaration: the result holds one error list for every
//! registered declaration, in registry order. An empty list means the
//! declaration can be emitted.

use std::collections::{HashMap, HashSet};

use crate::error::DeclarationError;
use crate::registry::Registry;
use crate::schema::{Declaration, EnumDecl, ShapeDecl, TypeRef};

#[derive(Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Shape,
    Enum,
}

impl RefKind {
    fn label(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Enum => "enum",
        }
    }
}

fn collect_refs<'a>(ty: &'a TypeRef, out: &mut Vec<(RefKind, &'a str)>) {
    match ty {
        TypeRef::Shape(name) => out.push((RefKind::Shape, name)),
        TypeRef::Enum(name) => out.push((RefKind::Enum, name)),
        TypeRef::List(inner) => collect_refs(inner, out),
        _ => {}
    }
}

/// Validate every declaration in `registry`.
pub fn validate(registry: &Registry) -> Vec<Vec<DeclarationError>> {
    let declarations = registry.declarations();

    // First declaration of a name wins; later ones are duplicates.
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, decl) in declarations.iter().enumerate() {
        index.entry(decl.name()).or_insert(i);
    }

    let mut errors: Vec<Vec<DeclarationError>> = declarations
        .iter()
        .enumerate()
        .map(|(i, decl)| {
            let mut errs = Vec::new();
            let first = index[decl.name()];
            if first != i {
                errs.push(DeclarationError::DuplicateName {
                    declaration: decl.name().to_string(),
                    source_file: decl.source().to_string(),
                    first_source: declarations[first].source().to_string(),
                });
            }
            match decl {
                Declaration::Shape(shape) => check_shape(shape, declarations, &index, &mut errs),
                Declaration::Enum(decl) => check_enum(decl, &mut errs),
            }
            errs
        })
        .collect();

    propagate_failures(declarations, &index, &mut errors);
    errors
}

fn check_shape(
    shape: &ShapeDecl,
    declarations: &[Declaration],
    index: &HashMap<&str, usize>,
    errs: &mut Vec<DeclarationError>,
) {
    let mut seen = HashSet::new();
    for field in &shape.fields {
        if !seen.insert(field.name.as_str()) {
            errs.push(DeclarationError::DuplicateField {
                declaration: shape.name.clone(),
                source_file: shape.source.clone(),
                field: field.name.clone(),
            });
        }

        if field.relation && field.ty.referenced_shape().is_none() {
            errs.push(DeclarationError::InvalidRelation {
                declaration: shape.name.clone(),
                source_file: shape.source.clone(),
                field: field.name.clone(),
            });
        }

        let mut refs = Vec::new();
        collect_refs(&field.ty, &mut refs);
        for (kind, target) in refs {
            let resolved = index.get(target).map(|&i| &declarations[i]);
            let matches = matches!(
                (kind, resolved),
                (RefKind::Shape, Some(Declaration::Shape(_)))
                    | (RefKind::Enum, Some(Declaration::Enum(_)))
            );
            if !matches {
                errs.push(DeclarationError::UnknownReference {
                    declaration: shape.name.clone(),
                    source_file: shape.source.clone(),
                    field: field.name.clone(),
                    kind: kind.label(),
                    target: target.to_string(),
                });
            }
        }
    }
}

fn check_enum(decl: &EnumDecl, errs: &mut Vec<DeclarationError>) {
    if decl.variants.is_empty() {
        errs.push(DeclarationError::EmptyEnumeration {
            declaration: decl.name.clone(),
            source_file: decl.source.clone(),
        });
        return;
    }

    let mut values = HashSet::new();
    let mut symbols = HashSet::new();
    for variant in &decl.variants {
        if !values.insert(variant.value.as_str()) {
            errs.push(DeclarationError::DuplicateValue {
                declaration: decl.name.clone(),
                source_file: decl.source.clone(),
                value: variant.value.clone(),
            });
        }
        if !symbols.insert(variant.symbol.as_str()) {
            errs.push(DeclarationError::DuplicateSymbol {
                declaration: decl.name.clone(),
                source_file: decl.source.clone(),
                symbol: variant.symbol.clone(),
            });
        }
    }
}

/// A shape that references a failed declaration would emit a dangling type
/// reference, so it fails too. Repeats until no new failures appear.
fn propagate_failures(
    declarations: &[Declaration],
    index: &HashMap<&str, usize>,
    errors: &mut [Vec<DeclarationError>],
) {
    loop {
        let mut changed = false;
        for (i, decl) in declarations.iter().enumerate() {
            let Declaration::Shape(shape) = decl else {
                continue;
            };
            if !errors[i].is_empty() {
                continue;
            }
            let failed = shape.fields.iter().find_map(|field| {
                let mut refs = Vec::new();
                collect_refs(&field.ty, &mut refs);
                refs.into_iter()
                    .filter_map(|(_, target)| index.get(target).map(|&j| (target, j)))
                    .find(|&(_, j)| !errors[j].is_empty())
                    .map(|(target, _)| (field.name.clone(), target.to_string()))
            });
            if let Some((field, dependency)) = failed {
                errors[i].push(DeclarationError::FailedDependency {
                    declaration: shape.name.clone(),
                    source_file: shape.source.clone(),
                    field,
                    dependency,
                });
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}
