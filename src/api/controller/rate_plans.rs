//
//  apigee-mint
//  api/controller/rate_plans.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Rate plans accepted by a developer.
//!
//! Reads go through `developer-accepted-rateplans` and are cached per
//! developer. Writes go through `developer-rateplans`.
//!
//! ```rust,no_run
//! use apigee_mint::api::controller::{DeveloperRatePlanController, SaveMode};
//! use apigee_mint::api::mint::RatePlan;
//! use apigee_mint::api::EdgeClient;
//! use apigee_mint::cache::CacheAside;
//! use apigee_mint::mapper::Mapper;
//!
//! # async fn example() -> Result<(), apigee_mint::api::ApiError> {
//! let client = EdgeClient::new("https://api.enterprise.apigee.com/v1", "acme")?;
//! let controller = DeveloperRatePlanController::new(
//!     &client,
//!     CacheAside::disabled(Mapper::default()),
//!     "dev@example.com",
//! );
//!
//! let mut plan = controller.new_plan();
//! plan.set_rate_plan(RatePlan::with_id("pkg", "gold"));
//! plan.set_start_date("2026-02-01");
//! controller.save(&mut plan, SaveMode::Create).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::require_id;
use crate::api::client::{EdgeClient, ResourcePath};
use crate::api::common::{extract_list, ApiError, PageRequest};
use crate::api::mint::DeveloperRatePlan;
use crate::cache::CacheAside;

/// Wrapper tag of the accepted-rate-plan list.
pub const DEVELOPER_RATE_PLAN_TAG: &str = "developerRatePlan";

/// Prefix of the per-developer cache key.
pub const DEVELOPER_RATE_PLAN_CACHE_PREFIX: &str = "developer_accepted_rateplan";

/// How [`DeveloperRatePlanController::save`] sends the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// POST a new acceptance; the server assigns the id
    Create,
    /// PUT an existing acceptance by id
    Update,
}

impl FromStr for SaveMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            other => Err(ApiError::Parameter(format!(
                "Unsupported save method argument: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
        })
    }
}

/// Controller for one developer's accepted rate plans.
pub struct DeveloperRatePlanController<'c> {
    client: &'c EdgeClient,
    cache: CacheAside,
    developer: String,
}

impl<'c> DeveloperRatePlanController<'c> {
    pub fn new(client: &'c EdgeClient, cache: CacheAside, developer: &str) -> Self {
        Self {
            client,
            cache,
            developer: developer.to_string(),
        }
    }

    pub fn developer(&self) -> &str {
        &self.developer
    }

    /// An empty record bound to this controller's developer.
    pub fn new_plan(&self) -> DeveloperRatePlan {
        DeveloperRatePlan::new(self.developer.as_str())
    }

    /// `developer_accepted_rateplan:{developer}`, plus `:page:{n}:{size}` when paged.
    pub fn cache_key(&self, page: Option<PageRequest>) -> String {
        let key = format!("{}:{}", DEVELOPER_RATE_PLAN_CACHE_PREFIX, self.developer);
        match page {
            Some(page) => key + &page.cache_suffix(),
            None => key,
        }
    }

    fn developer_path(&self) -> ResourcePath {
        self.client
            .mint_path()
            .segment("developers")
            .segment(self.developer.as_str())
    }

    fn mutation_path(&self) -> ResourcePath {
        self.developer_path().segment("developer-rateplans")
    }

    /// Lists accepted rate plans through the cache.
    pub async fn list(
        &self,
        page: Option<PageRequest>,
    ) -> Result<Vec<DeveloperRatePlan>, ApiError> {
        let mut path = self.developer_path().segment("developer-accepted-rateplans");
        if let Some(page) = page {
            path = path.query("page", page.page).query("size", page.size);
        }

        let client = self.client;
        self.cache
            .get_list(&self.cache_key(page), &self.new_plan(), move || async move {
                let payload: Value = client.get(&path).await?;
                extract_list(payload, DEVELOPER_RATE_PLAN_TAG)
            })
            .await
    }

    /// Creates or updates the acceptance.
    ///
    /// The server's answer is hydrated back onto `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parameter`] before any request when the rate plan
    /// is missing, when updating without an id, or when the record belongs to
    /// another developer. Server errors with a Mint code become [`ApiError::Mint`].
    pub async fn save(&self, plan: &mut DeveloperRatePlan, mode: SaveMode) -> Result<(), ApiError> {
        self.check_developer(plan)?;

        let response: Value = match mode {
            SaveMode::Create => {
                let body = plan.request_body(false)?;
                self.client.post(&self.mutation_path(), &body).await
            }
            SaveMode::Update => {
                let body = plan.request_body(true)?;
                let path = self.mutation_path().segment(require_id(&*plan)?);
                self.client.put(&path, &body).await
            }
        }
        .map_err(ApiError::reclassify)?;

        self.hydrate_response(plan, response)
    }

    /// [`save`](Self::save) with the mode given by name (`"create"` or `"update"`).
    pub async fn save_as(&self, plan: &mut DeveloperRatePlan, mode: &str) -> Result<(), ApiError> {
        let mode = mode.parse()?;
        self.save(plan, mode).await
    }

    /// Creates the acceptance, asking Mint to suppress overlap warnings.
    pub async fn force_save(&self, plan: &mut DeveloperRatePlan) -> Result<(), ApiError> {
        self.check_developer(plan)?;

        let mut body = plan.request_body(false)?;
        body.insert("suppressWarning".to_string(), Value::Bool(true));

        let response: Value = self
            .client
            .post(&self.mutation_path(), &body)
            .await
            .map_err(ApiError::reclassify)?;

        self.hydrate_response(plan, response)
    }

    /// Deletes an acceptance by id.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::Parameter(
                "Cannot delete a developer rate plan without an id".to_string(),
            ));
        }
        let _: Value = self
            .client
            .delete(&self.mutation_path().segment(id))
            .await
            .map_err(ApiError::reclassify)?;
        Ok(())
    }

    fn check_developer(&self, plan: &DeveloperRatePlan) -> Result<(), ApiError> {
        if plan.developer_id() != self.developer {
            return Err(ApiError::Parameter(format!(
                "Rate plan record belongs to developer '{}', not '{}'",
                plan.developer_id(),
                self.developer
            )));
        }
        Ok(())
    }

    fn hydrate_response(&self, plan: &mut DeveloperRatePlan, response: Value) -> Result<(), ApiError> {
        if let Value::Object(object) = response {
            self.cache.mapper().hydrate(plan, &object, &[], false)?;
        }
        Ok(())
    }
}
