//
//  apigee-mint
//  mapper/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Mapper
//!
//! Converts raw JSON payloads returned by the Edge and Mint APIs into typed
//! entities.
//!
//! ## Overview
//!
//! Every entity type publishes a static [`Descriptor`]: a dispatch table from
//! payload field name to setter function, the list of nested-reference fields
//! and the fields that are deliberately ignored. The [`Mapper`] walks a
//! payload in order, invokes the setter registered for each field and hands
//! nested references to the descriptor's attach hook once the scalar pass is
//! done.
//!
//! Fields without a setter never abort hydration. They are reported to the
//! injected [`DiagnosticSink`] and skipped. Hydration only fails when a setter
//! rejects the shape of a value.
//!
//! ## Example
//!
//! ```rust
//! use apigee_mint::api::mint::DeveloperRatePlan;
//! use apigee_mint::mapper::{Entity, Mapper, RawPayload};
//!
//! let payload: RawPayload = serde_json::from_str(
//!     r#"{"id":"rp1","startDate":"2020-01-01","ratePlan":{"monetizationPackage":{"id":"pkg1"}}}"#,
//! ).unwrap();
//!
//! let mut plan = DeveloperRatePlan::new("dev@example.com");
//! Mapper::default().hydrate(&mut plan, &payload, &[], false).unwrap();
//!
//! assert_eq!(plan.id(), Some("rp1"));
//! assert_eq!(plan.rate_plan().map(|rp| rp.package_id()), Some("pkg1"));
//! ```

mod descriptor;
mod diagnostics;
pub mod value;

pub use descriptor::*;
pub use diagnostics::*;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use value::ValueError;

/// An untyped, ordered JSON object as produced by the decoder.
pub type RawPayload = serde_json::Map<String, Value>;

/// Raised when a setter rejects a payload value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HydrateError {
    /// The value had a shape the setter cannot accept.
    #[error("Invalid value for {entity}.{field}: expected {expected}, found {found}")]
    InvalidValue {
        /// Entity being hydrated
        entity: &'static str,
        /// Payload field name
        field: String,
        /// What the setter accepts
        expected: &'static str,
        /// JSON kind that was supplied
        found: &'static str,
    },
}

impl HydrateError {
    fn from_value(entity: &'static str, field: &str, err: ValueError) -> Self {
        Self::InvalidValue {
            entity,
            field: field.to_string(),
            expected: err.expected,
            found: err.found,
        }
    }
}

/// A typed record mirroring one REST resource.
///
/// Implementors own their construction context (developer id, company name,
/// package id). That context survives [`init_values`](Entity::init_values)
/// and is copied by [`instantiate_new`](Entity::instantiate_new).
pub trait Entity: Sized + 'static {
    /// Payload field holding the identifier.
    const ID_FIELD: &'static str;

    /// Whether the server assigns the identifier on creation.
    const ID_AUTOGENERATED: bool;

    /// Static dispatch table consumed by the [`Mapper`].
    fn descriptor() -> &'static Descriptor<Self>;

    /// Returns every payload-settable field to its unset state.
    fn init_values(&mut self);

    /// Builds an empty entity sharing this one's construction context.
    fn instantiate_new(&self) -> Self;

    /// The identifier, if known.
    fn id(&self) -> Option<&str>;

    /// Deterministic projection of the entity to a raw payload.
    ///
    /// Unset fields are omitted. Server-only fields are not projected.
    fn to_payload(&self) -> RawPayload;
}

/// Hydrates entities from raw payloads.
///
/// Cheap to clone; clones share the diagnostic sink.
#[derive(Clone)]
pub struct Mapper {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Mapper {
    /// A mapper that discards diagnostics.
    fn default() -> Self {
        Self::new(Arc::new(NoopSink))
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper").finish_non_exhaustive()
    }
}

impl Mapper {
    /// Creates a mapper reporting to the given sink.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Creates a mapper that forwards diagnostics to `tracing`.
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    /// Populates `entity` from `payload`.
    ///
    /// # Parameters
    ///
    /// * `entity` - The entity to populate
    /// * `payload` - Decoded JSON object
    /// * `excluded` - Field names the caller handles itself; skipped entirely,
    ///   including nested references
    /// * `reset` - Run [`Entity::init_values`] before hydrating
    ///
    /// # Errors
    ///
    /// Returns [`HydrateError`] only when a setter rejects a value. Unknown
    /// fields are reported to the sink and skipped.
    pub fn hydrate<E: Entity>(
        &self,
        entity: &mut E,
        payload: &RawPayload,
        excluded: &[&str],
        reset: bool,
    ) -> Result<(), HydrateError> {
        if reset {
            entity.init_values();
        }

        let descriptor = E::descriptor();

        for (field, value) in payload {
            if excluded.contains(&field.as_str()) || descriptor.handles_separately(field) {
                continue;
            }

            match descriptor.setter(field) {
                Some(set) => {
                    set(entity, value)
                        .map_err(|e| HydrateError::from_value(descriptor.entity, field, e))?;
                }
                None => self.notice(&Diagnostic::UnmappedField {
                    entity: descriptor.entity,
                    field: field.clone(),
                }),
            }
        }

        for nested in descriptor.nested {
            if excluded.contains(&nested.name) {
                continue;
            }
            let Some(value) = payload.get(nested.name) else {
                continue;
            };

            let resolved = match value.as_object() {
                Some(object) if !object.is_empty() => {
                    match resolve_identity(object, nested.identity_path) {
                        Some(identity) => Some(NestedPayload {
                            identity,
                            payload: object,
                        }),
                        None => {
                            self.notice(&Diagnostic::MissingNestedIdentity {
                                entity: descriptor.entity,
                                field: nested.name,
                                path: nested.identity_path.join("."),
                            });
                            None
                        }
                    }
                }
                _ => None,
            };

            (nested.attach)(entity, resolved, self)?;
        }

        Ok(())
    }

    /// Builds a fresh entity from `prototype` and hydrates it.
    pub fn hydrate_new<E: Entity>(
        &self,
        prototype: &E,
        payload: &RawPayload,
    ) -> Result<E, HydrateError> {
        let mut entity = prototype.instantiate_new();
        self.hydrate(&mut entity, payload, &[], false)?;
        Ok(entity)
    }

    /// Forwards a diagnostic to the sink.
    pub fn notice(&self, diagnostic: &Diagnostic) {
        self.sink.notice(diagnostic);
    }
}

/// Follows `path` through nested objects and returns the identity found there.
fn resolve_identity(payload: &RawPayload, path: &[&str]) -> Option<String> {
    let (last, parents) = path.split_last()?;
    let mut current = payload;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }

    match current.get(*last)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
