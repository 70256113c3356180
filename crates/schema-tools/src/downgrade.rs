//! `OpenAPI` 3.1 -> 3.0.3 nullable downgrade.
//!
//! `OpenAPI` 3.1 encodes an optional value as a union with the null type
//! (`anyOf: [{...}, {"type": "null"}]`). 3.0.3 predates the null type and
//! uses a `nullable: true` flag on the schema instead. This module rewrites
//! a 3.1-style document tree into the 3.0.3 encoding without changing
//! validation semantics otherwise.
//!
//! The transform is intentionally permissive and best-effort: it is total
//! over any JSON value, never raises, and passes unrecognized shapes through
//! unchanged. It is not a validator.

use serde_json::{Map, Value};

/// Recursively rewrite 3.1 nullable unions into the 3.0.3 `nullable` flag.
///
/// The rewrite is applied to every mapping node found anywhere in the tree
/// (property schemas, array item schemas, `components` definitions, query
/// parameter schemas). A new tree is built bottom-up; the input is never
/// mutated.
///
/// Running the transform on its own output is a no-op.
#[must_use]
pub fn downgrade_schema(value: &Value) -> Value {
    match value {
        Value::Object(map) => downgrade_mapping(map),
        Value::Array(items) => Value::Array(items.iter().map(downgrade_schema).collect()),
        scalar => scalar.clone(),
    }
}

fn downgrade_mapping(map: &Map<String, Value>) -> Value {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        out.insert(key.clone(), downgrade_schema(value));
    }
    rewrite_null_union(&mut out);
    Value::Object(out)
}

/// True for the literal singleton `{"type": "null"}` fragment.
fn is_null_type(fragment: &Value) -> bool {
    let Value::Object(map) = fragment else {
        return false;
    };
    map.len() == 1 && map.get("type").and_then(Value::as_str) == Some("null")
}

/// Rewrite an `anyOf` union containing the null type at this mapping level.
///
/// - One surviving alternative: its keys are merged into the mapping (the
///   alternative wins on key conflict, since it is the sole surviving
///   schema) and `anyOf` is dropped.
/// - Several surviving alternatives: `anyOf` keeps them, minus the null type.
/// - None (the union was only the null type): `anyOf` is dropped entirely,
///   leaving an unconstrained nullable schema.
///
/// In every case a null alternative was removed, `nullable: true` is set on
/// the mapping. Unions without a null alternative are left untouched.
fn rewrite_null_union(map: &mut Map<String, Value>) {
    let Some(Value::Array(alternatives)) = map.get("anyOf") else {
        return;
    };

    let non_null: Vec<Value> = alternatives
        .iter()
        .filter(|fragment| !is_null_type(fragment))
        .cloned()
        .collect();
    if non_null.len() == alternatives.len() {
        // No null alternative; not a nullable union.
        return;
    }

    if non_null.len() > 1 {
        map.insert("anyOf".to_string(), Value::Array(non_null));
    } else if let Some(Value::Object(fields)) = non_null.first() {
        // Sole surviving schema: fold it into this mapping.
        let fields = fields.clone();
        map.shift_remove("anyOf");
        for (key, value) in fields {
            map.insert(key, value);
        }
    } else if non_null.is_empty() {
        // The union was only the null type; what survives is an
        // unconstrained nullable schema.
        map.shift_remove("anyOf");
    } else {
        // A lone non-mapping alternative (e.g. a boolean schema) has no keys
        // to merge; keep it under anyOf.
        map.insert("anyOf".to_string(), Value::Array(non_null));
    }

    map.insert("nullable".to_string(), Value::Bool(true));
}
