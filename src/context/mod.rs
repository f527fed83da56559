//
//  apigee-mint
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Organization Context
//!
//! Works out which organization, endpoint and credentials a command runs
//! against.
//!
//! ## Resolution Order
//!
//! 1. Command-line flags and environment variables (`MINT_ORG`,
//!    `MINT_ENDPOINT`, `MINT_USER`, `MINT_PASSWORD`, `MINT_TOKEN`)
//! 2. The configuration file (`[core] default_org`, `[orgs.<org>]`)
//! 3. The password stored in the system keyring for `user@endpoint`
//!
//! Without an organization from steps 1 or 2 resolution fails.

mod resolver;

pub use resolver::*;

use std::time::Duration;

use crate::api::{ApiError, EdgeClient};
use crate::auth::AuthCredential;

/// Everything needed to talk to one organization.
#[derive(Debug, Clone)]
pub struct OrgContext {
    /// Organization name
    pub org: String,
    /// Normalized management endpoint
    pub endpoint: String,
    /// Organization user, when known
    pub user: Option<String>,
    /// Credentials, when a password or token was found
    pub auth: Option<AuthCredential>,
    /// Request timeout
    pub timeout: Duration,
}

impl OrgContext {
    /// Builds an [`EdgeClient`] for this context.
    pub fn client(&self) -> Result<EdgeClient, ApiError> {
        let client = EdgeClient::with_timeout(&self.endpoint, &self.org, self.timeout)?;
        Ok(match &self.auth {
            Some(auth) => client.with_auth(auth.clone()),
            None => client,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }
}
