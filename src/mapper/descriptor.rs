//
//  apigee-mint
//  mapper/descriptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Static per-entity dispatch tables.

use serde_json::Value;

use super::value::ValueError;
use super::{HydrateError, Mapper, RawPayload};

/// Setter invoked with the raw value of one payload field.
pub type FieldSetter<E> = fn(&mut E, &Value) -> Result<(), ValueError>;

/// Hook that attaches (or clears) a nested reference.
///
/// Receives `None` when the payload value is null, empty, not an object or
/// lacks the identity.
pub type AttachFn<E> =
    for<'a> fn(&mut E, Option<NestedPayload<'a>>, &Mapper) -> Result<(), HydrateError>;

/// A scalar field and the setter that accepts it.
pub struct Field<E: 'static> {
    /// Payload field name
    pub name: &'static str,
    /// Setter for the field
    pub set: FieldSetter<E>,
}

/// A field whose value is the payload of a related entity.
pub struct NestedField<E: 'static> {
    /// Payload field name
    pub name: &'static str,
    /// Path to the related entity's identity inside the nested payload
    pub identity_path: &'static [&'static str],
    /// Attach hook
    pub attach: AttachFn<E>,
}

/// Nested payload whose identity has been resolved.
#[derive(Debug, Clone)]
pub struct NestedPayload<'a> {
    /// Identity found at the declared path
    pub identity: String,
    /// The full nested payload
    pub payload: &'a RawPayload,
}

/// Everything the mapper needs to hydrate one entity type.
pub struct Descriptor<E: 'static> {
    /// Entity name used in diagnostics and errors
    pub entity: &'static str,
    /// Scalar fields with setters
    pub fields: &'static [Field<E>],
    /// Nested references, handled after the scalar pass
    pub nested: &'static [NestedField<E>],
    /// Fields that are recognised but never hydrated
    pub ignored: &'static [&'static str],
}

impl<E: 'static> Descriptor<E> {
    /// Looks up the setter for a payload field.
    pub fn setter(&self, field: &str) -> Option<FieldSetter<E>> {
        self.fields.iter().find(|f| f.name == field).map(|f| f.set)
    }

    /// Whether the field is nested or ignored and so skipped by the scalar pass.
    pub fn handles_separately(&self, field: &str) -> bool {
        self.nested.iter().any(|n| n.name == field) || self.ignored.contains(&field)
    }

    /// Names of every scalar field with a setter.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}
