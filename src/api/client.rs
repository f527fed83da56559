//
//  apigee-mint
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Edge and Mint APIs
//!
//! This module provides the HTTP client every controller sends its requests
//! through. It builds organization-scoped URLs, attaches credentials and
//! turns non-2xx responses into typed errors.
//!
//! ## Features
//!
//! - Percent-encoded path segments built with [`ResourcePath`]
//! - Authentication header injection
//! - JSON serialization/deserialization
//! - Edge and Mint error bodies parsed into [`ResponseError`]
//! - Custom User-Agent header

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::common::{ApiError, ResponseError};
use crate::auth::AuthCredential;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path below the management endpoint, plus query parameters.
///
/// Segments are stored raw and percent-encoded when the URL is built, so ids
/// such as developer emails can be passed as-is.
///
/// # Example
///
/// ```rust
/// use apigee_mint::api::ResourcePath;
///
/// let path = ResourcePath::new()
///     .segment("organizations")
///     .segment("acme")
///     .segment("developers")
///     .segment("dev@example.com")
///     .query("expand", "true");
///
/// assert_eq!(path.to_string(), "/organizations/acme/developers/dev@example.com?expand=true");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl ResourcePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one path segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// The HTTP client for one organization on one Edge endpoint.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use apigee_mint::api::EdgeClient;
/// use apigee_mint::auth::AuthCredential;
///
/// let client = EdgeClient::new("https://api.enterprise.apigee.com/v1", "acme")?
///     .with_auth(AuthCredential::basic("me@example.com", "secret"));
/// assert_eq!(client.org(), "acme");
/// # Ok::<(), apigee_mint::api::ApiError>(())
/// ```
pub struct EdgeClient {
    /// The underlying HTTP client
    http: Client,
    /// Management API base URL (e.g. "https://api.enterprise.apigee.com/v1")
    base: Url,
    /// Organization every path is scoped to
    org: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl fmt::Debug for EdgeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeClient")
            .field("base", &self.base.as_str())
            .field("org", &self.org)
            .field("auth", &self.auth)
            .finish()
    }
}

impl EdgeClient {
    /// Creates a client with the default timeout.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - Management API base URL
    /// * `org` - Organization name
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Url`] if the endpoint does not parse, or
    /// [`ApiError::Network`] if the HTTP client could not be created.
    pub fn new(endpoint: &str, org: &str) -> Result<Self, ApiError> {
        Self::with_timeout(endpoint, org, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(endpoint: &str, org: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(endpoint)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Parameter(format!(
                "Endpoint '{}' cannot carry a path",
                endpoint
            )));
        }

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("mint/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
            base,
            org: org.to_string(),
            auth: None,
        })
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    pub fn auth(&self) -> Option<&AuthCredential> {
        self.auth.as_ref()
    }

    /// `organizations/{org}`
    pub fn org_path(&self) -> ResourcePath {
        ResourcePath::new()
            .segment("organizations")
            .segment(self.org.as_str())
    }

    /// `mint/organizations/{org}`
    pub fn mint_path(&self) -> ResourcePath {
        ResourcePath::new()
            .segment("mint")
            .segment("organizations")
            .segment(self.org.as_str())
    }

    /// Builds the absolute URL for a path.
    pub fn url(&self, path: &ResourcePath) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Parameter(format!("Endpoint '{}' cannot carry a path", self.base)))?;
            segments.pop_if_empty().extend(path.segments());
        }
        if !path.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(path.query_pairs());
        }
        Ok(url)
    }

    /// Makes an HTTP GET request.
    ///
    /// An empty response body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Response`] for non-2xx statuses
    /// - [`ApiError::Network`] when the request fails
    /// - [`ApiError::Decode`] when the body is not valid JSON for `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &ResourcePath) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.execute(request).await
    }

    /// Makes an HTTP POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &ResourcePath,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// Makes an HTTP PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &ResourcePath,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// Makes an HTTP DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &ResourcePath) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await
    }

    fn request(&self, method: Method, path: &ResourcePath) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url).header(ACCEPT, "application/json");
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }
        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!("HTTP {}: {}", status.as_u16(), text);
            return Err(ApiError::Response(ResponseError::from_body(
                status.as_u16(),
                &text,
            )));
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}
