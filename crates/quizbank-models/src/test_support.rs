use quizbank_typegen::Declaration;
use serde::Serialize;

/// Assert that a serialized DTO has exactly the members its declaration
/// lists. `value` must have every optional member present.
pub fn assert_keys_match_declaration<T: Serialize>(value: &T, declaration: Declaration) {
    let json = serde_json::to_value(value).expect("DTO serializes");
    let mut keys: Vec<String> = json
        .as_object()
        .expect("DTO serializes to an object")
        .keys()
        .cloned()
        .collect();
    keys.sort();

    let Declaration::Shape(shape) = declaration else {
        panic!("{} is not a shape", declaration.name());
    };
    let mut fields: Vec<String> = shape.fields.into_iter().map(|f| f.name).collect();
    fields.sort();

    assert_eq!(keys, fields, "members of {}", shape.name);
}
