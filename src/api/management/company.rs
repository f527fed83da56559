//
//  apigee-mint
//  api/management/company.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde_json::Value;

use crate::api::common::Attributes;
use crate::mapper::value::{self, ValueError};
use crate::mapper::{Descriptor, Entity, Field, RawPayload};

/// A company: a group of developers sharing apps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    name: Option<String>,
    display_name: Option<String>,
    status: Option<String>,
    apps: Vec<String>,
    attributes: Attributes,
    created_at: Option<i64>,
    created_by: Option<String>,
    last_modified_at: Option<i64>,
    last_modified_by: Option<String>,
}

static DESCRIPTOR: Descriptor<Company> = Descriptor {
    entity: "Company",
    fields: &[
        Field { name: "name", set: set::name },
        Field { name: "displayName", set: set::display_name },
        Field { name: "status", set: set::status },
        Field { name: "apps", set: set::apps },
        Field { name: "attributes", set: set::attributes },
        Field { name: "createdAt", set: set::created_at },
        Field { name: "createdBy", set: set::created_by },
        Field { name: "lastModifiedAt", set: set::last_modified_at },
        Field { name: "lastModifiedBy", set: set::last_modified_by },
    ],
    nested: &[],
    ignored: &["organization"],
};

mod set {
    use super::*;

    pub fn name(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.name = value::opt_string(v)?;
        Ok(())
    }

    pub fn display_name(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.display_name = value::opt_string(v)?;
        Ok(())
    }

    pub fn status(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.status = value::opt_string(v)?;
        Ok(())
    }

    pub fn apps(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.apps = value::string_list(v)?;
        Ok(())
    }

    pub fn attributes(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.attributes = match v {
            Value::Null => Attributes::new(),
            other => value::structured(other, "array of attributes")?,
        };
        Ok(())
    }

    pub fn created_at(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.created_at = value::opt_i64(v)?;
        Ok(())
    }

    pub fn created_by(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.created_by = value::opt_string(v)?;
        Ok(())
    }

    pub fn last_modified_at(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.last_modified_at = value::opt_i64(v)?;
        Ok(())
    }

    pub fn last_modified_by(e: &mut Company, v: &Value) -> Result<(), ValueError> {
        e.last_modified_by = value::opt_string(v)?;
        Ok(())
    }
}

impl Company {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Names of the company's apps.
    pub fn apps(&self) -> &[String] {
        &self.apps
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> Option<i64> {
        self.last_modified_at
    }

    /// Whether the company owns an app with this name.
    pub fn has_app(&self, app_name: &str) -> bool {
        self.apps.iter().any(|a| a == app_name)
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = Some(display_name.into());
    }
}

impl Entity for Company {
    const ID_FIELD: &'static str = "name";
    const ID_AUTOGENERATED: bool = false;

    fn descriptor() -> &'static Descriptor<Self> {
        &DESCRIPTOR
    }

    fn init_values(&mut self) {
        *self = Self::default();
    }

    fn instantiate_new(&self) -> Self {
        Self::default()
    }

    fn id(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn to_payload(&self) -> RawPayload {
        let mut payload = RawPayload::new();
        if let Some(name) = &self.name {
            payload.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(display_name) = &self.display_name {
            payload.insert("displayName".to_string(), Value::String(display_name.clone()));
        }
        if let Some(status) = &self.status {
            payload.insert("status".to_string(), Value::String(status.clone()));
        }
        payload.insert("attributes".to_string(), self.attributes.to_value());
        payload
    }
}
