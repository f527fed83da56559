//
//  apigee-mint
//  api/common/attributes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A custom name/value attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Ordered attribute list with name-based access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, replacing any existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Removes an attribute; returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|a| a.name != name);
        self.0.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|a| serde_json::json!({ "name": a.name, "value": a.value }))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.set("DisplayName", "One");
        attrs.set("Notes", "n");
        attrs.set("DisplayName", "Two");

        assert_eq!(attrs.get("DisplayName"), Some("Two"));
        assert_eq!(attrs.iter().next().map(|a| a.name.as_str()), Some("DisplayName"));
    }

    #[test]
    fn test_remove() {
        let mut attrs = Attributes::new();
        attrs.set("a", "1");
        assert!(attrs.remove("a"));
        assert!(!attrs.remove("a"));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_deserialize_without_value() {
        let attrs: Attributes = serde_json::from_str(r#"[{"name":"flag"}]"#).unwrap();
        assert_eq!(attrs.get("flag"), Some(""));
    }
}
