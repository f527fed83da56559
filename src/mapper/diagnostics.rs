//
//  apigee-mint
//  mapper/diagnostics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Non-fatal hydration notices and the sinks that receive them.

use std::fmt;
use std::sync::Mutex;

/// A non-fatal observation made during hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The payload carried a field the entity has no setter for.
    UnmappedField {
        entity: &'static str,
        field: String,
    },
    /// A nested payload was present but its identity could not be resolved.
    MissingNestedIdentity {
        entity: &'static str,
        field: &'static str,
        path: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedField { entity, field } => write!(
                f,
                "Method {}::{} does not exist",
                entity,
                setter_name(field)
            ),
            Self::MissingNestedIdentity {
                entity,
                field,
                path,
            } => write!(
                f,
                "{}.{} has no identity at {}; nested reference left unset",
                entity, field, path
            ),
        }
    }
}

/// Canonical setter name for a payload field: `"set"` plus the field name
/// with its first character upper-cased.
pub fn setter_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Receives hydration diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Records one diagnostic.
    fn notice(&self, diagnostic: &Diagnostic);
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn notice(&self, _diagnostic: &Diagnostic) {}
}

/// Logs diagnostics through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notice(&self, diagnostic: &Diagnostic) {
        tracing::info!("{}", diagnostic);
    }
}

/// Keeps diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn notice(&self, diagnostic: &Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
