//
//  apigee-mint
//  mapper/value.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Coercion helpers shared by entity setters.
//!
//! Strings accept numbers and booleans and render them as text. `null`
//! always means unset. Objects and arrays are rejected where a scalar is
//! expected.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A value whose JSON kind the setter cannot accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ValueError {
    pub fn new(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            found: kind(value),
        }
    }
}

/// JSON kind name of a value.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn opt_string(value: &Value) -> Result<Option<String>, ValueError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(ValueError::new("string", other)),
    }
}

pub fn opt_bool(value: &Value) -> Result<Option<bool>, ValueError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        other => Err(ValueError::new("boolean", other)),
    }
}

pub fn opt_i64(value: &Value) -> Result<Option<i64>, ValueError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_i64().map(Some).ok_or(ValueError::new("integer", value)),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ValueError::new("integer", value)),
        other => Err(ValueError::new("integer", other)),
    }
}

/// Accepts an array of strings; `null` yields an empty list.
pub fn string_list(value: &Value) -> Result<Vec<String>, ValueError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ValueError::new("array of strings", other)),
            })
            .collect(),
        other => Err(ValueError::new("array of strings", other)),
    }
}

/// Deserializes a structured value, rejecting it with `expected` on mismatch.
pub fn structured<T: DeserializeOwned>(
    value: &Value,
    expected: &'static str,
) -> Result<T, ValueError> {
    serde_json::from_value(value.clone()).map_err(|_| ValueError::new(expected, value))
}
