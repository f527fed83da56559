//
//  apigee-mint
//  api/mint/developer_rate_plan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! A developer's acceptance of a rate plan.

use serde_json::{json, Value};

use super::RatePlan;
use crate::api::common::ApiError;
use crate::mapper::value::{self, ValueError};
use crate::mapper::{
    Descriptor, Entity, Field, HydrateError, Mapper, NestedField, NestedPayload, RawPayload,
};

/// A rate plan accepted by a developer.
///
/// The developer id is construction context. The id is assigned by Mint when
/// the acceptance is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperRatePlan {
    developer_id: String,
    id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    renewal_date: Option<String>,
    next_recurring_fee_date: Option<String>,
    rate_plan: Option<Box<RatePlan>>,
}

static DESCRIPTOR: Descriptor<DeveloperRatePlan> = Descriptor {
    entity: "DeveloperRatePlan",
    fields: &[
        Field { name: "id", set: set::id },
        Field { name: "startDate", set: set::start_date },
        Field { name: "endDate", set: set::end_date },
        Field { name: "renewalDate", set: set::renewal_date },
        Field { name: "nextRecurringFeeDate", set: set::next_recurring_fee_date },
    ],
    nested: &[NestedField {
        name: "ratePlan",
        identity_path: &["monetizationPackage", "id"],
        attach: set::rate_plan,
    }],
    ignored: &["developer"],
};

mod set {
    use super::*;

    pub fn id(e: &mut DeveloperRatePlan, v: &Value) -> Result<(), ValueError> {
        e.id = value::opt_string(v)?;
        Ok(())
    }

    pub fn start_date(e: &mut DeveloperRatePlan, v: &Value) -> Result<(), ValueError> {
        e.start_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn end_date(e: &mut DeveloperRatePlan, v: &Value) -> Result<(), ValueError> {
        e.end_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn renewal_date(e: &mut DeveloperRatePlan, v: &Value) -> Result<(), ValueError> {
        e.renewal_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn next_recurring_fee_date(e: &mut DeveloperRatePlan, v: &Value) -> Result<(), ValueError> {
        e.next_recurring_fee_date = value::opt_string(v)?;
        Ok(())
    }

    pub fn rate_plan(
        e: &mut DeveloperRatePlan,
        nested: Option<NestedPayload<'_>>,
        mapper: &Mapper,
    ) -> Result<(), HydrateError> {
        e.rate_plan = match nested {
            Some(nested) => {
                let mut plan = RatePlan::new(nested.identity);
                mapper.hydrate(&mut plan, nested.payload, &[], false)?;
                Some(Box::new(plan))
            }
            None => None,
        };
        Ok(())
    }
}

impl DeveloperRatePlan {
    /// Creates an empty acceptance record for a developer (id or email).
    pub fn new(developer_id: impl Into<String>) -> Self {
        Self {
            developer_id: developer_id.into(),
            id: None,
            start_date: None,
            end_date: None,
            renewal_date: None,
            next_recurring_fee_date: None,
            rate_plan: None,
        }
    }

    pub fn developer_id(&self) -> &str {
        &self.developer_id
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    pub fn renewal_date(&self) -> Option<&str> {
        self.renewal_date.as_deref()
    }

    pub fn next_recurring_fee_date(&self) -> Option<&str> {
        self.next_recurring_fee_date.as_deref()
    }

    pub fn rate_plan(&self) -> Option<&RatePlan> {
        self.rate_plan.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn set_start_date(&mut self, date: impl Into<String>) {
        self.start_date = Some(date.into());
    }

    pub fn set_end_date(&mut self, date: Option<String>) {
        self.end_date = date;
    }

    pub fn set_rate_plan(&mut self, plan: RatePlan) {
        self.rate_plan = Some(Box::new(plan));
    }

    /// Request body for the accept/update endpoints.
    ///
    /// ```json
    /// {"developer": {"id": "..."}, "startDate": "...", "endDate": "...", "ratePlan": {"id": "..."}}
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parameter`] when the rate plan or its id is missing,
    /// or when `include_id` is set and the record has no id.
    pub fn request_body(&self, include_id: bool) -> Result<RawPayload, ApiError> {
        let plan_id = self
            .rate_plan()
            .ok_or_else(|| {
                ApiError::Parameter("A rate plan is required to save a developer rate plan".into())
            })?
            .id()
            .ok_or_else(|| ApiError::Parameter("The rate plan has no id".into()))?;

        let mut body = RawPayload::new();
        if include_id {
            let id = self.id().ok_or_else(|| {
                ApiError::Parameter("Cannot update a developer rate plan without an id".into())
            })?;
            body.insert("id".to_string(), Value::String(id.to_string()));
        }
        body.insert("developer".to_string(), json!({ "id": self.developer_id }));
        if let Some(start) = &self.start_date {
            body.insert("startDate".to_string(), Value::String(start.clone()));
        }
        if let Some(end) = &self.end_date {
            body.insert("endDate".to_string(), Value::String(end.clone()));
        }
        body.insert("ratePlan".to_string(), json!({ "id": plan_id }));
        Ok(body)
    }
}

impl Entity for DeveloperRatePlan {
    const ID_FIELD: &'static str = "id";
    const ID_AUTOGENERATED: bool = true;

    fn descriptor() -> &'static Descriptor<Self> {
        &DESCRIPTOR
    }

    fn init_values(&mut self) {
        *self = Self::new(std::mem::take(&mut self.developer_id));
    }

    fn instantiate_new(&self) -> Self {
        Self::new(self.developer_id.clone())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Renewal and recurring-fee dates are server-computed and not projected.
    fn to_payload(&self) -> RawPayload {
        let mut payload = RawPayload::new();
        payload.insert("developer".to_string(), json!({ "id": self.developer_id }));
        if let Some(end) = &self.end_date {
            payload.insert("endDate".to_string(), Value::String(end.clone()));
        }
        if let Some(start) = &self.start_date {
            payload.insert("startDate".to_string(), Value::String(start.clone()));
        }
        if let Some(id) = &self.id {
            payload.insert("id".to_string(), Value::String(id.clone()));
        }
        payload.insert(
            "ratePlan".to_string(),
            self.rate_plan
                .as_ref()
                .map_or(Value::Null, |plan| Value::Object(plan.to_payload())),
        );
        payload
    }
}

impl std::fmt::Display for DeveloperRatePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.to_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> RawPayload {
        serde_json::from_str(json).unwrap()
    }

    fn accepted() -> DeveloperRatePlan {
        Mapper::default()
            .hydrate_new(
                &DeveloperRatePlan::new("dev@example.com"),
                &payload(
                    r#"{"id":"rp1","startDate":"2020-01-01","endDate":"2020-12-31",
                        "renewalDate":"2020-07-01","nextRecurringFeeDate":"2020-02-01",
                        "developer":{"id":"dev@example.com","name":"Dev"},
                        "ratePlan":{"id":"gold","name":"Gold","monetizationPackage":{"id":"pkg1"}}}"#,
                ),
            )
            .unwrap()
    }

    #[test]
    fn test_hydrate_server_fields() {
        let plan = accepted();
        assert_eq!(plan.renewal_date(), Some("2020-07-01"));
        assert_eq!(plan.next_recurring_fee_date(), Some("2020-02-01"));
        assert_eq!(plan.rate_plan().and_then(|rp| rp.name()), Some("Gold"));
    }

    #[test]
    fn test_round_trip_excludes_server_fields() {
        let plan = accepted();
        let copy = Mapper::default()
            .hydrate_new(&plan, &plan.to_payload())
            .unwrap();

        assert_eq!(copy.renewal_date(), None);
        assert_eq!(copy.next_recurring_fee_date(), None);

        let mut expected = plan.clone();
        expected.renewal_date = None;
        expected.next_recurring_fee_date = None;
        assert_eq!(copy, expected);
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut plan = DeveloperRatePlan::new("dev");
        plan.set_id("rp1");
        assert_eq!(
            plan.to_string(),
            r#"{"developer":{"id":"dev"},"id":"rp1","ratePlan":null}"#
        );
    }

    #[test]
    fn test_create_body() {
        let plan = accepted();
        let body = Value::Object(plan.request_body(false).unwrap());
        assert_eq!(
            body,
            json!({
                "developer": {"id": "dev@example.com"},
                "startDate": "2020-01-01",
                "endDate": "2020-12-31",
                "ratePlan": {"id": "gold"}
            })
        );
    }

    #[test]
    fn test_update_body_includes_id() {
        let body = accepted().request_body(true).unwrap();
        assert_eq!(body.get("id"), Some(&json!("rp1")));
    }

    #[test]
    fn test_body_requires_rate_plan() {
        let mut plan = DeveloperRatePlan::new("dev");
        assert!(matches!(plan.request_body(false), Err(ApiError::Parameter(_))));

        plan.set_rate_plan(RatePlan::new("pkg"));
        assert!(matches!(plan.request_body(false), Err(ApiError::Parameter(_))));

        plan.set_rate_plan(RatePlan::with_id("pkg", "gold"));
        assert!(plan.request_body(false).is_ok());
        assert!(matches!(plan.request_body(true), Err(ApiError::Parameter(_))));
    }
}
