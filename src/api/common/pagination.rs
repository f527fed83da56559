//
//  apigee-mint
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Paging and List Payloads
//!
//! Mint list endpoints page with `page`/`size` query parameters and wrap
//! their items in an object keyed by a wrapper tag:
//!
//! ```json
//! {"developerRatePlan": [{"id": "..."}], "totalRecords": 1}
//! ```
//!
//! Edge management endpoints return either a bare array of names or, with
//! `expand=true`, an object keyed by the resource's wrapper tag.

use serde_json::Value;

use super::ApiError;
use crate::mapper::RawPayload;

/// Page selection for paged list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Suffix appended to a cache key so each page is cached separately.
    pub fn cache_suffix(&self) -> String {
        format!(":page:{}:{}", self.page, self.size)
    }
}

/// Extracts the list of raw item payloads from a list response.
///
/// Accepts a wrapper object keyed by `wrapper_tag` or a bare array. A wrapper
/// with a `null` list yields no items.
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedPayload`] when the wrapper is missing or an
/// item is not an object.
pub fn extract_list(payload: Value, wrapper_tag: &str) -> Result<Vec<RawPayload>, ApiError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(wrapper_tag) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(ApiError::UnexpectedPayload(format!(
                    "'{}' is not a list (found {})",
                    wrapper_tag,
                    crate::mapper::value::kind(&other)
                )))
            }
            None => {
                return Err(ApiError::UnexpectedPayload(format!(
                    "missing '{}' in list response",
                    wrapper_tag
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(ApiError::UnexpectedPayload(format!(
                "expected a list, found {}",
                crate::mapper::value::kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(object) => Ok(object),
            other => Err(ApiError::UnexpectedPayload(format!(
                "list item is {}, expected an object",
                crate::mapper::value::kind(&other)
            ))),
        })
        .collect()
}

/// Extracts a list of names from a non-expanded management list response.
pub fn extract_names(payload: Value) -> Result<Vec<String>, ApiError> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(name),
                other => Err(ApiError::UnexpectedPayload(format!(
                    "name list item is {}",
                    crate::mapper::value::kind(&other)
                ))),
            })
            .collect(),
        other => Err(ApiError::UnexpectedPayload(format!(
            "expected a list of names, found {}",
            crate::mapper::value::kind(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_list() {
        let items = extract_list(
            json!({"developerRatePlan": [{"id": "a"}, {"id": "b"}], "totalRecords": 2}),
            "developerRatePlan",
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "b");
    }

    #[test]
    fn test_bare_and_empty_lists() {
        assert_eq!(extract_list(json!([{"id": "a"}]), "app").unwrap().len(), 1);
        assert!(extract_list(json!({"app": null}), "app").unwrap().is_empty());
        assert!(extract_list(Value::Null, "app").unwrap().is_empty());
    }

    #[test]
    fn test_missing_wrapper() {
        let err = extract_list(json!({"other": []}), "app").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedPayload(_)));
    }

    #[test]
    fn test_non_object_item() {
        assert!(extract_list(json!(["a"]), "app").is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(
            extract_names(json!(["one", "two"])).unwrap(),
            vec!["one".to_string(), "two".to_string()]
        );
        assert!(extract_names(json!({"app": []})).is_err());
    }

    #[test]
    fn test_cache_suffix() {
        assert_eq!(PageRequest::new(2, 50).cache_suffix(), ":page:2:50");
    }
}
