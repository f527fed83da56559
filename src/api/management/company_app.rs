//
//  apigee-mint
//  api/management/company_app.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Apps owned by a company.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::Attributes;
use crate::mapper::value::{self, ValueError};
use crate::mapper::{Descriptor, Entity, Field, RawPayload};

/// Attribute holding the app's display name.
pub const DISPLAY_NAME_ATTRIBUTE: &str = "DisplayName";

/// Attribute holding the app's description.
pub const NOTES_ATTRIBUTE: &str = "Notes";

/// API product attached to a credential, with its approval status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProduct {
    #[serde(rename = "apiproduct")]
    pub api_product: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// A consumer key/secret pair issued to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub api_products: Vec<CredentialProduct>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub issued_at: Option<i64>,
    /// `-1` when the key never expires
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// An app registered to a company.
///
/// The app name is the identifier and is chosen by the caller. The display
/// name and description are stored as the `DisplayName` and `Notes`
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyApp {
    company: String,
    name: Option<String>,
    app_id: Option<String>,
    api_products: Vec<String>,
    attributes: Attributes,
    callback_url: Option<String>,
    status: Option<String>,
    scopes: Vec<String>,
    credentials: Vec<Credential>,
    created_at: Option<i64>,
    created_by: Option<String>,
    last_modified_at: Option<i64>,
    last_modified_by: Option<String>,
}

static DESCRIPTOR: Descriptor<CompanyApp> = Descriptor {
    entity: "CompanyApp",
    fields: &[
        Field { name: "name", set: set::name },
        Field { name: "appId", set: set::app_id },
        Field { name: "apiProducts", set: set::api_products },
        Field { name: "attributes", set: set::attributes },
        Field { name: "callbackUrl", set: set::callback_url },
        Field { name: "status", set: set::status },
        Field { name: "scopes", set: set::scopes },
        Field { name: "credentials", set: set::credentials },
        Field { name: "createdAt", set: set::created_at },
        Field { name: "createdBy", set: set::created_by },
        Field { name: "lastModifiedAt", set: set::last_modified_at },
        Field { name: "lastModifiedBy", set: set::last_modified_by },
    ],
    nested: &[],
    ignored: &["companyName", "appFamily", "developerId"],
};

mod set {
    use super::*;

    pub fn name(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.name = value::opt_string(v)?;
        Ok(())
    }

    pub fn app_id(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.app_id = value::opt_string(v)?;
        Ok(())
    }

    pub fn api_products(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.api_products = value::string_list(v)?;
        Ok(())
    }

    pub fn attributes(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.attributes = match v {
            Value::Null => Attributes::new(),
            other => value::structured(other, "array of attributes")?,
        };
        Ok(())
    }

    pub fn callback_url(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.callback_url = value::opt_string(v)?;
        Ok(())
    }

    pub fn status(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.status = value::opt_string(v)?;
        Ok(())
    }

    pub fn scopes(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.scopes = value::string_list(v)?;
        Ok(())
    }

    pub fn credentials(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.credentials = match v {
            Value::Null => Vec::new(),
            other => value::structured(other, "array of credentials")?,
        };
        Ok(())
    }

    pub fn created_at(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.created_at = value::opt_i64(v)?;
        Ok(())
    }

    pub fn created_by(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.created_by = value::opt_string(v)?;
        Ok(())
    }

    pub fn last_modified_at(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.last_modified_at = value::opt_i64(v)?;
        Ok(())
    }

    pub fn last_modified_by(e: &mut CompanyApp, v: &Value) -> Result<(), ValueError> {
        e.last_modified_by = value::opt_string(v)?;
        Ok(())
    }
}

impl CompanyApp {
    /// Creates an empty app of the given company.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            name: None,
            app_id: None,
            api_products: Vec::new(),
            attributes: Attributes::new(),
            callback_url: None,
            status: None,
            scopes: Vec::new(),
            credentials: Vec::new(),
            created_at: None,
            created_by: None,
            last_modified_at: None,
            last_modified_by: None,
        }
    }

    /// Creates an unsaved app with a name.
    pub fn named(company: impl Into<String>, name: impl Into<String>) -> Self {
        let mut app = Self::new(company);
        app.name = Some(name.into());
        app
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn api_products(&self) -> &[String] {
        &self.api_products
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> Option<i64> {
        self.last_modified_at
    }

    pub fn display_name(&self) -> Option<&str> {
        self.attributes.get(DISPLAY_NAME_ATTRIBUTE)
    }

    pub fn description(&self) -> Option<&str> {
        self.attributes.get(NOTES_ATTRIBUTE)
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.attributes.set(DISPLAY_NAME_ATTRIBUTE, display_name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.attributes.set(NOTES_ATTRIBUTE, description);
    }

    pub fn set_callback_url(&mut self, url: Option<String>) {
        self.callback_url = url;
    }

    pub fn set_api_products(&mut self, products: Vec<String>) {
        self.api_products = products;
    }

    /// Products across the app's credentials, in first-seen order.
    pub fn credential_products(&self) -> Vec<&str> {
        let mut products: Vec<&str> = Vec::new();
        for product in self.credentials.iter().flat_map(|c| c.api_products.iter()) {
            if !products.contains(&product.api_product.as_str()) {
                products.push(&product.api_product);
            }
        }
        products
    }
}

impl Entity for CompanyApp {
    const ID_FIELD: &'static str = "name";
    const ID_AUTOGENERATED: bool = false;

    fn descriptor() -> &'static Descriptor<Self> {
        &DESCRIPTOR
    }

    fn init_values(&mut self) {
        *self = Self::new(std::mem::take(&mut self.company));
    }

    fn instantiate_new(&self) -> Self {
        Self::new(self.company.clone())
    }

    fn id(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Projects the fields Edge accepts on create and update. Server-assigned
    /// fields (app id, status, credentials, audit stamps) are not projected.
    fn to_payload(&self) -> RawPayload {
        let mut payload = RawPayload::new();
        if let Some(name) = &self.name {
            payload.insert("name".to_string(), Value::String(name.clone()));
        }
        payload.insert(
            "apiProducts".to_string(),
            Value::Array(self.api_products.iter().cloned().map(Value::String).collect()),
        );
        payload.insert("attributes".to_string(), self.attributes.to_value());
        if let Some(url) = &self.callback_url {
            payload.insert("callbackUrl".to_string(), Value::String(url.clone()));
        }
        if !self.scopes.is_empty() {
            payload.insert(
                "scopes".to_string(),
                Value::Array(self.scopes.iter().cloned().map(Value::String).collect()),
            );
        }
        payload
    }
}

impl std::fmt::Display for CompanyApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.to_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;

    const LOADED: &str = r#"{
        "appId": "6f0c",
        "attributes": [{"name":"DisplayName","value":"Phone App"},{"name":"Notes","value":"iOS client"}],
        "callbackUrl": "https://example.com/cb",
        "companyName": "acme",
        "createdAt": 1577836800000,
        "createdBy": "admin@example.com",
        "credentials": [{
            "apiProducts": [{"apiproduct":"gold","status":"approved"}],
            "consumerKey": "key1",
            "consumerSecret": "secret1",
            "expiresAt": -1,
            "issuedAt": 1577836800000,
            "scopes": [],
            "status": "approved"
        }],
        "lastModifiedAt": "1577836900000",
        "lastModifiedBy": "admin@example.com",
        "name": "phone",
        "scopes": [],
        "status": "approved"
    }"#;

    #[test]
    fn test_hydrate_loaded_app() {
        let app = Mapper::default()
            .hydrate_new(
                &CompanyApp::new("acme"),
                &serde_json::from_str(LOADED).unwrap(),
            )
            .unwrap();

        assert_eq!(app.id(), Some("phone"));
        assert_eq!(app.app_id(), Some("6f0c"));
        assert_eq!(app.display_name(), Some("Phone App"));
        assert_eq!(app.description(), Some("iOS client"));
        assert_eq!(app.status(), Some("approved"));
        assert_eq!(app.created_at(), Some(1577836800000));
        assert_eq!(app.last_modified_at(), Some(1577836900000));
        assert_eq!(app.credentials()[0].consumer_key, "key1");
        assert_eq!(app.credential_products(), vec!["gold"]);
    }

    #[test]
    fn test_projection_omits_server_fields() {
        let mut app = CompanyApp::named("acme", "phone");
        app.set_display_name("Phone App");
        app.set_api_products(vec!["gold".to_string()]);

        let payload = Value::Object(app.to_payload());
        assert_eq!(
            payload,
            serde_json::json!({
                "name": "phone",
                "apiProducts": ["gold"],
                "attributes": [{"name": "DisplayName", "value": "Phone App"}]
            })
        );
    }

    #[test]
    fn test_bad_attributes_rejected() {
        let mut app = CompanyApp::new("acme");
        let err = Mapper::default()
            .hydrate(
                &mut app,
                &serde_json::from_str(r#"{"attributes":"DisplayName=x"}"#).unwrap(),
                &[],
                false,
            )
            .unwrap_err();
        assert!(err.to_string().contains("CompanyApp.attributes"));
    }

    #[test]
    fn test_rehydrate_with_reset_is_idempotent() {
        let mapper = Mapper::default();
        let data: RawPayload = serde_json::from_str(LOADED).unwrap();

        let mut app = CompanyApp::new("acme");
        mapper.hydrate(&mut app, &data, &[], false).unwrap();
        let first = app.clone();

        mapper.hydrate(&mut app, &data, &[], true).unwrap();
        assert_eq!(app, first);
    }

    #[test]
    fn test_round_trip() {
        let mapper = Mapper::default();
        let data: RawPayload = serde_json::from_str(
            r#"{"name":"phone","apiProducts":["gold","silver"],
                "attributes":[{"name":"DisplayName","value":"Phone"},{"name":"Notes","value":"iOS"}],
                "callbackUrl":"https://example.com/cb","scopes":["read","write"]}"#,
        )
        .unwrap();

        let app = mapper.hydrate_new(&CompanyApp::new("acme"), &data).unwrap();
        let copy = mapper.hydrate_new(&app, &app.to_payload()).unwrap();
        assert_eq!(copy, app);
    }

    #[test]
    fn test_round_trip_drops_only_server_fields() {
        let mapper = Mapper::default();
        let loaded = mapper
            .hydrate_new(&CompanyApp::new("acme"), &serde_json::from_str(LOADED).unwrap())
            .unwrap();
        let copy = mapper.hydrate_new(&loaded, &loaded.to_payload()).unwrap();

        assert_eq!(copy.name(), loaded.name());
        assert_eq!(copy.api_products(), loaded.api_products());
        assert_eq!(copy.attributes(), loaded.attributes());
        assert_eq!(copy.callback_url(), loaded.callback_url());
        assert_eq!(copy.scopes(), loaded.scopes());
        assert_eq!(copy.app_id(), None);
        assert!(copy.credentials().is_empty());
    }

    #[test]
    fn test_init_values_keeps_company() {
        let mut app = CompanyApp::named("acme", "phone");
        app.set_description("x");
        app.init_values();
        assert_eq!(app, CompanyApp::new("acme"));
    }
}
