//
//  apigee-mint
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Password Storage
//!
//! Organization passwords are kept in the platform keyring (Keychain on
//! macOS, Secret Service on Linux, Credential Manager on Windows), never in
//! the config file.
//!
//! ## Storage Model
//!
//! - **Service**: `apigee-mint`
//! - **Key**: `user@endpoint`, see [`credential_key`]
//! - **Value**: the password
//!
//! ## Example
//!
//! ```rust,no_run
//! use apigee_mint::auth::{credential_key, KeyringStore};
//!
//! fn remember() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     let key = credential_key("me@example.com", "https://api.enterprise.apigee.com/v1");
//!
//!     store.store(&key, "secret")?;
//!     assert_eq!(store.get(&key)?.as_deref(), Some("secret"));
//!     store.delete(&key)?;
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "apigee-mint";

/// Keyring key for a user on an endpoint.
pub fn credential_key(user: &str, endpoint: &str) -> String {
    format!("{}@{}", user, endpoint.trim_end_matches('/'))
}

/// Password storage backed by the system keyring.
///
/// # Notes
///
/// - The keyring may require user interaction on first access.
/// - On Linux, a secret service daemon (GNOME Keyring, KWallet) must be running.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores a password, replacing any existing entry for the key.
    pub fn store(&self, key: &str, password: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(password)?;
        Ok(())
    }

    /// Retrieves a password.
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no entry exists, `Err` for keyring access errors.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a password. Deleting a missing entry succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_key() {
        assert_eq!(
            credential_key("me@example.com", "https://api.enterprise.apigee.com/v1/"),
            "me@example.com@https://api.enterprise.apigee.com/v1"
        );
    }
}
