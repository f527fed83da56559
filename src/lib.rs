//
//  apigee-mint
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Apigee Mint Library
//!
//! Client library for the Apigee Edge management API and its Monetization
//! (Mint) extension, plus the core of the `mint` command-line tool.
//!
//! ## Overview
//!
//! Every response goes the same way: HTTP client, raw JSON payload, the
//! [`mapper::Mapper`], then a typed entity. List reads can go through a
//! cache-aside layer that stores the raw payloads and re-hydrates them on
//! a hit.
//!
//! ## Module Structure
//!
//! - [`mapper`]: Descriptor-driven hydration of entities from raw payloads
//! - [`cache`]: Cache-aside list reads over memory, file or no storage
//! - [`api`]: HTTP client, entities and controllers
//! - [`auth`]: Credentials and keyring storage
//! - [`config`]: Configuration file management
//! - [`context`]: Organization context resolution
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use apigee_mint::api::controller::DeveloperRatePlanController;
//! use apigee_mint::api::EdgeClient;
//! use apigee_mint::auth::AuthCredential;
//! use apigee_mint::cache::{CacheAside, MemoryCache};
//! use apigee_mint::mapper::Mapper;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), apigee_mint::api::ApiError> {
//! let client = EdgeClient::new("https://api.enterprise.apigee.com/v1", "acme")?
//!     .with_auth(AuthCredential::basic("me@example.com", "secret"));
//! let cache = CacheAside::new(Arc::new(MemoryCache::new()), Mapper::with_tracing());
//!
//! let controller = DeveloperRatePlanController::new(&client, cache, "dev@example.com");
//! for plan in controller.list(None).await? {
//!     println!("{}", plan);
//! }
//! # Ok(())
//! # }
//! ```

/// Resource mapping.
///
/// Entities describe their payload fields in static descriptor tables; the
/// mapper applies a payload through them, reports unknown fields to a
/// diagnostic sink and resolves nested references by identity.
pub mod mapper;

/// Cache-aside accessor and cache stores.
pub mod cache;

/// API client, entities and controllers for Edge and Mint.
pub mod api;

/// Credentials and secure storage.
///
/// - Basic (organization user and password) and bearer credentials
/// - Password storage via the system keychain
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/mint/config.toml`
/// - macOS: `~/Library/Application Support/mint/config.toml`
/// - Windows: `%APPDATA%\mint\config.toml`
pub mod config;

/// Organization context resolution from flags, environment, config and keyring.
pub mod context;

/// Command-line interface definitions.
pub mod cli;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

pub use cli::Cli;
pub use config::Config;
pub use context::OrgContext;

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "mint";

/// Application version, taken from Cargo.toml at compile time.
///
/// ```rust
/// use apigee_mint::VERSION;
///
/// println!("mint version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes so scripts can tell failures apart.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16+`: Monetization rule violations
///
/// # Example
///
/// ```rust
/// use apigee_mint::api::ApiError;
/// use apigee_mint::exit_codes;
///
/// let err = anyhow::Error::from(ApiError::Parameter("missing id".into()));
/// assert_eq!(exit_codes::for_error(&err), exit_codes::USAGE);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;
    use crate::cli::NotAuthenticated;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including caller errors caught before
    /// any request was sent.
    pub const USAGE: i32 = 2;

    /// Authentication required or rejected.
    ///
    /// Run `mint auth login` to store credentials.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// The Monetization API rejected the operation (an error code starting
    /// with `mint.`), e.g. overlapping rate plans.
    pub const MINT_ERROR: i32 = 16;

    /// Maps an error to its exit code.
    ///
    /// Looks through the `anyhow` context chain for an [`ApiError`] or
    /// [`NotAuthenticated`]; anything else is [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        if err.chain().any(|cause| cause.is::<NotAuthenticated>()) {
            return AUTH_ERROR;
        }

        let Some(api) = err.chain().find_map(|cause| cause.downcast_ref::<ApiError>()) else {
            return ERROR;
        };

        match api {
            ApiError::Mint(_) => MINT_ERROR,
            ApiError::Parameter(_) => USAGE,
            e if e.is_not_found() => NOT_FOUND,
            e if e.response().is_some_and(|r| r.is_auth()) => AUTH_ERROR,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::api::common::ResponseError;

        fn response(status: u16, code: Option<&str>) -> ResponseError {
            ResponseError {
                status,
                code: code.map(String::from),
                message: "failed".to_string(),
            }
        }

        #[test]
        fn test_for_error() {
            let mint = anyhow::Error::from(ApiError::Mint(response(400, Some("mint.overlap"))));
            assert_eq!(for_error(&mint), MINT_ERROR);

            let missing = anyhow::Error::from(ApiError::Response(response(404, None)));
            assert_eq!(for_error(&missing), NOT_FOUND);

            let denied = anyhow::Error::from(ApiError::Response(response(401, None)));
            assert_eq!(for_error(&denied), AUTH_ERROR);

            let plain = anyhow::anyhow!("boom");
            assert_eq!(for_error(&plain), ERROR);
        }

        #[test]
        fn test_for_error_through_context() {
            let err = anyhow::Error::from(ApiError::Response(response(404, None)))
                .context("Failed to list apps");
            assert_eq!(for_error(&err), NOT_FOUND);

            let err = anyhow::Error::from(NotAuthenticated { org: "acme".into() });
            assert_eq!(for_error(&err), AUTH_ERROR);
        }
    }
}
