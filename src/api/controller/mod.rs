//
//  apigee-mint
//  api/controller/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Entity Controllers
//!
//! A controller binds one entity type to one collection endpoint and turns
//! load/list/create/update/delete into HTTP calls, hydrating every response
//! through the [`Mapper`].
//!
//! ## Identifier rules
//!
//! | Operation | Body carries the identifier? |
//! |-----------|------------------------------|
//! | create | only when the caller chooses it (`ID_AUTOGENERATED == false`) |
//! | update | always; a missing identifier fails before any request |
//!
//! ## Error re-classification
//!
//! Mutations turn an [`ApiError::Response`] whose code starts with `mint.`
//! into [`ApiError::Mint`]. Every other error passes through unchanged.
//!
//! ## Submodules
//!
//! - [`companies`]: Company and company app controllers
//! - [`rate_plans`]: Developer rate plan acceptance

pub mod companies;
pub mod rate_plans;

pub use companies::*;
pub use rate_plans::*;

use serde_json::Value;

use super::client::{EdgeClient, ResourcePath};
use super::common::{extract_list, extract_names, ApiError};
use crate::mapper::{Entity, Mapper, RawPayload};

/// Generic CRUD controller over one collection endpoint.
pub struct EntityController<'c, E: Entity> {
    client: &'c EdgeClient,
    mapper: Mapper,
    collection: ResourcePath,
    wrapper_tag: &'static str,
    prototype: E,
}

impl<'c, E: Entity> EntityController<'c, E> {
    /// Creates a controller.
    ///
    /// # Parameters
    ///
    /// * `client` - Client the requests go through
    /// * `mapper` - Mapper used to hydrate responses
    /// * `collection` - Collection path; items live at `collection/{id}`
    /// * `wrapper_tag` - Key holding the items in expanded list responses
    /// * `prototype` - Source of construction context for new entities
    pub fn new(
        client: &'c EdgeClient,
        mapper: Mapper,
        collection: ResourcePath,
        wrapper_tag: &'static str,
        prototype: E,
    ) -> Self {
        Self {
            client,
            mapper,
            collection,
            wrapper_tag,
            prototype,
        }
    }

    pub fn client(&self) -> &EdgeClient {
        self.client
    }

    pub fn collection(&self) -> &ResourcePath {
        &self.collection
    }

    fn item_path(&self, id: &str) -> ResourcePath {
        self.collection.clone().segment(id)
    }

    /// Loads one entity by identifier.
    pub async fn load(&self, id: &str) -> Result<E, ApiError> {
        require_non_empty(id, E::descriptor().entity)?;
        let payload: Value = self.client.get(&self.item_path(id)).await?;
        let object = as_object(payload, E::descriptor().entity)?;
        Ok(self.mapper.hydrate_new(&self.prototype, &object)?)
    }

    /// Lists every entity, fully expanded.
    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        let path = self.collection.clone().query("expand", "true");
        let payload: Value = self.client.get(&path).await?;
        extract_list(payload, self.wrapper_tag)?
            .iter()
            .map(|item| self.mapper.hydrate_new(&self.prototype, item).map_err(ApiError::from))
            .collect()
    }

    /// Lists entity identifiers only.
    pub async fn list_names(&self) -> Result<Vec<String>, ApiError> {
        let payload: Value = self.client.get(&self.collection).await?;
        extract_names(payload)
    }

    /// Creates the entity and hydrates the server's answer back onto it.
    pub async fn create(&self, entity: &mut E) -> Result<(), ApiError> {
        let body = create_body(&*entity);
        let response: Value = self
            .client
            .post(&self.collection, &body)
            .await
            .map_err(ApiError::reclassify)?;
        self.hydrate_response(entity, response)
    }

    /// Updates the entity and hydrates the server's answer back onto it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parameter`] without sending anything when the
    /// entity has no identifier.
    pub async fn update(&self, entity: &mut E) -> Result<(), ApiError> {
        let id = require_id(&*entity)?.to_string();
        let body = update_body(&*entity)?;
        let response: Value = self
            .client
            .put(&self.item_path(&id), &body)
            .await
            .map_err(ApiError::reclassify)?;
        self.hydrate_response(entity, response)
    }

    /// Deletes by identifier. The response body is discarded.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        require_non_empty(id, E::descriptor().entity)?;
        let _: Value = self
            .client
            .delete(&self.item_path(id))
            .await
            .map_err(ApiError::reclassify)?;
        Ok(())
    }

    fn hydrate_response(&self, entity: &mut E, response: Value) -> Result<(), ApiError> {
        match response {
            Value::Object(object) => Ok(self.mapper.hydrate(entity, &object, &[], false)?),
            _ => Ok(()),
        }
    }
}

/// Create body: the projection, minus the identifier when the server assigns it.
pub fn create_body<E: Entity>(entity: &E) -> RawPayload {
    let mut body = entity.to_payload();
    if E::ID_AUTOGENERATED {
        body.remove(E::ID_FIELD);
    }
    body
}

/// Update body: the projection, always with the identifier.
pub fn update_body<E: Entity>(entity: &E) -> Result<RawPayload, ApiError> {
    let id = require_id(entity)?;
    let mut body = entity.to_payload();
    body.insert(E::ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(body)
}

/// The entity's identifier, or a parameter error naming the entity.
pub fn require_id<E: Entity>(entity: &E) -> Result<&str, ApiError> {
    match entity.id() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::Parameter(format!(
            "{} has no {}; it must be saved before it can be updated",
            E::descriptor().entity,
            E::ID_FIELD
        ))),
    }
}

fn require_non_empty(id: &str, entity: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::Parameter(format!("{} identifier is empty", entity)));
    }
    Ok(())
}

fn as_object(payload: Value, entity: &str) -> Result<RawPayload, ApiError> {
    match payload {
        Value::Object(object) => Ok(object),
        other => Err(ApiError::UnexpectedPayload(format!(
            "{} response is {}, expected an object",
            entity,
            crate::mapper::value::kind(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::management::CompanyApp;
    use crate::api::mint::{DeveloperRatePlan, RatePlan};

    #[test]
    fn test_create_body_omits_autogenerated_id() {
        let mut plan = DeveloperRatePlan::new("dev");
        plan.set_id("rp1");
        plan.set_rate_plan(RatePlan::with_id("pkg", "gold"));
        assert!(!create_body(&plan).contains_key("id"));
    }

    #[test]
    fn test_create_body_keeps_caller_id() {
        let app = CompanyApp::named("acme", "phone");
        assert_eq!(create_body(&app).get("name"), Some(&Value::from("phone")));
    }

    #[test]
    fn test_update_body_requires_id() {
        let plan = DeveloperRatePlan::new("dev");
        assert!(matches!(update_body(&plan), Err(ApiError::Parameter(_))));

        let app = CompanyApp::named("acme", "phone");
        assert_eq!(update_body(&app).unwrap().get("name"), Some(&Value::from("phone")));
    }
}
