//
//  apigee-mint
//  api/mint/rate_plan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Rate plans published under a monetization package.

use serde_json::{json, Value};

use crate::mapper::value::{self, ValueError};
use crate::mapper::{Descriptor, Entity, Field, RawPayload};

/// A rate plan of a monetization package.
///
/// The package id is construction context: it is known before the plan is
/// loaded and survives [`Entity::init_values`].
///
/// # Fields
///
/// | Field | Payload key |
/// |-------|-------------|
/// | `id` | `id` |
/// | `name` | `name` |
/// | `display_name` | `displayName` |
/// | `description` | `description` |
/// | `start_date` | `startDate` |
/// | `end_date` | `endDate` |
/// | `plan_type` | `type` (`STANDARD`, `DEVELOPER`, ...) |
/// | `currency_code` | `currencyCode` |
/// | `currency_id` | `currency.id` |
///
/// [`currency_code`](Self::currency_code) prefers `currencyCode` and falls
/// back to `currency.id`, whatever order the two arrive in.
/// | `is_private` | `isPrivate` |
/// | `published` | `published` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatePlan {
    package_id: String,
    id: Option<String>,
    name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    plan_type: Option<String>,
    currency_code: Option<String>,
    currency_id: Option<String>,
    is_private: Option<bool>,
    published: Option<bool>,
}

static DESCRIPTOR: Descriptor<RatePlan> = Descriptor {
    entity: "RatePlan",
    fields: &[
        Field { name: "id", set: set::id },
        Field { name: "name", set: set::name },
        Field { name: "displayName", set: set::display_name },
        Field { name: "description", set: set::description },
        Field { name: "startDate", set: set::start_date },
        Field { name: "endDate", set: set::end_date },
        Field { name: "type", set: set::plan_type },
        Field { name: "currencyCode", set: set::currency_code },
        Field { name: "currency", set: set::currency },
        Field { name: "isPrivate", set: set::is_private },
        Field { name: "published", set: set::published },
    ],
    nested: &[],
    ignored: &["monetizationPackage", "organization", "ratePlanDetails", "developer"],
};

mod set {
    use super::*;

    pub fn id(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.id = value::opt_string(v)?;
        Ok(())
    }

    pub fn name(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.name = value::opt_string(v)?;
        Ok(())
    }

    pub fn display_name(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.display_name = value::opt_string(v)?;
        Ok(())
    }

    pub fn description(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.description = value::opt_string(v)?;
        Ok(())
    }

    pub fn start_date(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.start_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn end_date(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.end_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn plan_type(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.plan_type = value::opt_string(v)?;
        Ok(())
    }

    pub fn currency_code(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.currency_code = value::opt_string(v)?;
        Ok(())
    }

    /// Mint embeds the currency as `{"id": "usd", "name": "USD", ...}`.
    pub fn currency(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.currency_id = match v {
            Value::Object(currency) => match currency.get("id") {
                Some(id) => value::opt_string(id)?,
                None => None,
            },
            other => value::opt_string(other)?,
        };
        Ok(())
    }

    pub fn is_private(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.is_private = value::opt_bool(v)?;
        Ok(())
    }

    pub fn published(e: &mut RatePlan, v: &Value) -> Result<(), ValueError> {
        e.published = value::opt_bool(v)?;
        Ok(())
    }
}

impl RatePlan {
    /// Creates an empty rate plan of the given monetization package.
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            id: None,
            name: None,
            display_name: None,
            description: None,
            start_date: None,
            end_date: None,
            plan_type: None,
            currency_code: None,
            currency_id: None,
            is_private: None,
            published: None,
        }
    }

    /// Creates a rate plan reference carrying only its id.
    pub fn with_id(package_id: impl Into<String>, id: impl Into<String>) -> Self {
        let mut plan = Self::new(package_id);
        plan.id = Some(id.into());
        plan
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    pub fn plan_type(&self) -> Option<&str> {
        self.plan_type.as_deref()
    }

    /// `currencyCode` when present, otherwise the embedded currency's id.
    pub fn currency_code(&self) -> Option<&str> {
        self.currency_code.as_deref().or(self.currency_id.as_deref())
    }

    pub fn is_private(&self) -> Option<bool> {
        self.is_private
    }

    pub fn published(&self) -> Option<bool> {
        self.published
    }
}

impl Entity for RatePlan {
    const ID_FIELD: &'static str = "id";
    const ID_AUTOGENERATED: bool = true;

    fn descriptor() -> &'static Descriptor<Self> {
        &DESCRIPTOR
    }

    fn init_values(&mut self) {
        *self = Self::new(std::mem::take(&mut self.package_id));
    }

    fn instantiate_new(&self) -> Self {
        Self::new(self.package_id.clone())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_payload(&self) -> RawPayload {
        let mut payload = RawPayload::new();
        let strings = [
            ("id", &self.id),
            ("name", &self.name),
            ("displayName", &self.display_name),
            ("description", &self.description),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("type", &self.plan_type),
            ("currencyCode", &self.currency_code),
        ];
        for (key, field) in strings {
            if let Some(v) = field {
                payload.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        if let Some(id) = &self.currency_id {
            payload.insert("currency".to_string(), json!({ "id": id }));
        }
        if let Some(v) = self.is_private {
            payload.insert("isPrivate".to_string(), Value::Bool(v));
        }
        if let Some(v) = self.published {
            payload.insert("published".to_string(), Value::Bool(v));
        }
        payload.insert(
            "monetizationPackage".to_string(),
            json!({ "id": self.package_id }),
        );
        payload
    }
}

impl std::fmt::Display for RatePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.to_payload()))
    }
}
