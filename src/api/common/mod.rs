//
//  apigee-mint
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Edge and Mint APIs
//!
//! This module provides the error type shared by every controller, the parsed
//! form of an Edge error response, custom attribute lists and list-payload
//! helpers.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ResponseError`] - Status, code and message of a non-2xx response
//! - [`Attribute`] - Name/value pair carried by apps, companies and developers
//! - Pagination and list helpers (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use apigee_mint::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Mint(e)) => println!("Monetization rejected the call: {}", e),
//!         Err(ApiError::Parameter(msg)) => println!("Bad argument: {}", msg),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::mapper::HydrateError;

mod attributes;
mod pagination;

pub use attributes::*;
pub use pagination::*;

/// Prefix carried by every Monetization error code.
pub const MINT_CODE_PREFIX: &str = "mint.";

/// Unified error type for all Edge and Mint API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Response` | Non-2xx response from the server |
/// | `Mint` | Non-2xx response carrying a Monetization error code |
/// | `Parameter` | Caller misuse detected before any request was sent |
/// | `Hydrate` | A payload value had a shape the entity cannot accept |
/// | `UnexpectedPayload` | A list payload was missing its wrapper |
/// | `Network` | Network connectivity issues |
/// | `Decode` | Response body was not valid JSON |
/// | `Url` | The configured endpoint is not a valid URL |
///
/// # Notes
///
/// - `Network`, `Decode`, `Url` and `Hydrate` convert automatically via `?`
/// - Mutations re-classify `Response` into `Mint` when the code qualifies;
///   plain reads leave it untouched
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{0}")]
    Response(ResponseError),

    /// The server answered with a Monetization error code.
    #[error("Monetization error: {0}")]
    Mint(ResponseError),

    /// An argument was invalid; nothing was sent.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of what was wrong with the argument
    #[error("{0}")]
    Parameter(String),

    /// A payload could not be hydrated into an entity.
    #[error(transparent)]
    Hydrate(#[from] HydrateError),

    /// The response body did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Re-classifies a transport error carrying a Mint code.
    ///
    /// Every other error is returned unchanged.
    pub fn reclassify(self) -> Self {
        match self {
            Self::Response(response) if response.is_mint_code() => Self::Mint(response),
            other => other,
        }
    }

    /// The parsed response, for `Response` and `Mint` errors.
    pub fn response(&self) -> Option<&ResponseError> {
        match self {
            Self::Response(r) | Self::Mint(r) => Some(r),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.response().is_some_and(ResponseError::is_not_found)
    }
}

/// A non-2xx response from Edge or Mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    /// HTTP status code
    pub status: u16,
    /// Error code reported in the body, if any
    pub code: Option<String>,
    /// Human readable message
    pub message: String,
}

impl ResponseError {
    /// Parses an Edge error body.
    ///
    /// Edge and Mint return errors in the formats:
    /// ```json
    /// {"code": "mint.resourceDoesNotExist", "message": "Human readable message"}
    /// {"fault": {"faultstring": "Human readable message", "detail": {"errorcode": "..."}}}
    /// ```
    ///
    /// If the body matches neither, the raw body becomes the message.
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code
    /// * `body` - The raw error response body
    pub fn from_body(status: u16, body: &str) -> Self {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            // Management/Mint format: {"code": "...", "message": "..."}
            let code = json.get("code").and_then(|c| c.as_str());
            let message = json.get("message").and_then(|m| m.as_str());
            if code.is_some() || message.is_some() {
                return Self {
                    status,
                    code: code.map(str::to_string),
                    message: message.unwrap_or_default().to_string(),
                };
            }

            // Gateway fault format: {"fault": {"faultstring": "...", "detail": {"errorcode": "..."}}}
            if let Some(fault) = json.get("fault") {
                return Self {
                    status,
                    code: fault
                        .get("detail")
                        .and_then(|d| d.get("errorcode"))
                        .and_then(|c| c.as_str())
                        .map(str::to_string),
                    message: fault
                        .get("faultstring")
                        .and_then(|m| m.as_str())
                        .unwrap_or_default()
                        .to_string(),
                };
            }
        }

        Self {
            status,
            code: None,
            message: body.trim().to_string(),
        }
    }

    /// Whether the code belongs to the Monetization API.
    pub fn is_mint_code(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| c.starts_with(MINT_CODE_PREFIX))
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_auth(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.message.is_empty()) {
            (Some(code), false) => write!(f, "{} ({}, HTTP {})", self.message, code, self.status),
            (Some(code), true) => write!(f, "{} (HTTP {})", code, self.status),
            (None, false) => write!(f, "{} (HTTP {})", self.message, self.status),
            (None, true) => write!(f, "API error (HTTP {})", self.status),
        }
    }
}
