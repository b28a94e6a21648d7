//! Key-case translation between the persisted wire form and the in-memory shape.
//!
//! Records are stored with `snake_case` object keys and handled everywhere else
//! with `camelCase` keys. The translation walks nested objects and arrays and
//! only ever rewrites object keys, never values.

use serde_json::{Map, Value};

/// Convert a `snake_case` key to `camelCase`.
///
/// Only an underscore followed by a lowercase ASCII letter is folded, so
/// `full_name` becomes `fullName` while `line_1` is left untouched.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Convert a `camelCase` key to `snake_case`.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrite every object key in `value` to `camelCase`.
pub fn camelize_keys(value: Value) -> Value {
    rewrite_keys(value, &to_camel_case)
}

/// Rewrite every object key in `value` to `snake_case`.
pub fn snake_case_keys(value: Value) -> Value {
    rewrite_keys(value, &to_snake_case)
}

fn rewrite_keys(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_keys(item, convert))
                .collect(),
        ),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, field) in fields {
                out.insert(convert(&key), rewrite_keys(field, convert));
            }
            Value::Object(out)
        }
        other => other,
    }
}
