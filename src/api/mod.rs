//
//  apigee-mint
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Edge and Mint API
//!
//! Typed entities for the Apigee Edge management API and its Monetization
//! (Mint) extension, the HTTP client the requests go through, and the
//! controllers that tie the two together.

/// Core HTTP client wrapper.
///
/// Provides the [`EdgeClient`] struct which handles:
/// - Organization-scoped, percent-encoded URLs
/// - Authentication header injection
/// - Request/response serialization
/// - Parsing of Edge and Mint error bodies
pub mod client;

/// Common types shared by every controller.
///
/// Includes:
/// - [`ApiError`]: Standardized error type
/// - [`ResponseError`](common::ResponseError): Parsed non-2xx response
/// - [`Attributes`](common::Attributes): Custom attribute lists
/// - [`PageRequest`](common::PageRequest): Mint paging
pub mod common;

/// Load/list/create/update/delete over collection endpoints.
pub mod controller;

/// Edge management entities (companies and their apps).
pub mod management;

/// Monetization entities (rate plans and their acceptance).
pub mod mint;

pub use client::{EdgeClient, ResourcePath};
pub use common::ApiError;
