//
//  apigee-mint
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::time::Duration;

use anyhow::Result;

use super::OrgContext;
use crate::auth::{credential_key, AuthCredential, KeyringStore};
use crate::cli::GlobalOptions;
use crate::config::{normalize_endpoint, Config, DEFAULT_ENDPOINT};

/// Resolves an [`OrgContext`] from options, configuration and the keyring.
pub struct ContextResolver {
    config: Config,
    keyring: Option<KeyringStore>,
}

impl ContextResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            keyring: Some(KeyringStore::new()),
        }
    }

    /// A resolver that never consults the system keyring.
    pub fn without_keyring(config: Config) -> Self {
        Self {
            config,
            keyring: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The organization to use: `--org`/`MINT_ORG`, then `default_org`.
    pub fn org(&self, options: &GlobalOptions) -> Result<String> {
        options
            .org
            .clone()
            .or_else(|| self.config.core.default_org.clone())
            .filter(|org| !org.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No organization given. Use --org, set MINT_ORG, or run 'mint config set default_org <org>'"
                )
            })
    }

    pub fn resolve(&self, options: &GlobalOptions) -> Result<OrgContext> {
        // Priority: CLI flags/environment > config file > keyring
        let org = self.org(options)?;
        let org_config = self.config.org_config(&org);

        let endpoint = normalize_endpoint(
            options
                .endpoint
                .as_deref()
                .or_else(|| org_config.and_then(|o| o.endpoint.as_deref()))
                .unwrap_or(DEFAULT_ENDPOINT),
        );

        let user = options
            .user
            .clone()
            .or_else(|| org_config.and_then(|o| o.user.clone()));

        let auth = match (&options.token, &user) {
            (Some(token), _) => Some(AuthCredential::bearer(token.as_str())),
            (None, Some(user)) => options
                .password
                .clone()
                .or_else(|| self.stored_password(user, &endpoint))
                .map(|password| AuthCredential::basic(user.as_str(), password)),
            (None, None) => None,
        };

        Ok(OrgContext {
            org,
            endpoint,
            user,
            auth,
            timeout: Duration::from_secs(self.config.core.timeout_secs),
        })
    }

    fn stored_password(&self, user: &str, endpoint: &str) -> Option<String> {
        let keyring = self.keyring.as_ref()?;
        match keyring.get(&credential_key(user, endpoint)) {
            Ok(password) => password,
            Err(e) => {
                tracing::debug!("Keyring unavailable: {}", e);
                None
            }
        }
    }
}
