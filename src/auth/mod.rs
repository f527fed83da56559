//
//  apigee-mint
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Edge accepts HTTP basic authentication with the organization user's
//! credentials, or a bearer token obtained from the Edge SSO service.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure password storage using the system keyring
//!
//! ## Example
//!
//! ```rust
//! use apigee_mint::auth::AuthCredential;
//!
//! let credential = AuthCredential::basic("me@example.com", "secret");
//! assert_eq!(credential.username(), Some("me@example.com"));
//! ```

mod keyring;

pub use keyring::*;

use reqwest::RequestBuilder;

/// Credentials attached to every request sent by an
/// [`EdgeClient`](crate::api::EdgeClient).
#[derive(Clone)]
pub enum AuthCredential {
    /// Organization user and password, sent as HTTP basic auth
    Basic { username: String, password: String },
    /// OAuth access token, sent as a bearer header
    Bearer { token: String },
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

impl AuthCredential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Applies the credential to an outgoing request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }

    /// The user name, for basic credentials.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::Bearer { .. } => None,
        }
    }

    /// Short label for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let basic = format!("{:?}", AuthCredential::basic("me", "hunter2"));
        assert!(basic.contains("me"));
        assert!(!basic.contains("hunter2"));

        let bearer = format!("{:?}", AuthCredential::bearer("tok123"));
        assert!(!bearer.contains("tok123"));
    }

    #[test]
    fn test_kind() {
        assert_eq!(AuthCredential::basic("a", "b").kind(), "basic");
        assert_eq!(AuthCredential::bearer("t").username(), None);
    }
}
